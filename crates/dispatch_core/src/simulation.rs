//! The simulation object: one owner for the world, the tick schedule, and
//! the retained scenario parameters.
//!
//! Hosts construct a [`Simulation`], drive [`Simulation::tick`] from their
//! frame or timer facility, and issue dispatch commands between ticks. All
//! writes to the entity store flow through `&mut self`, so there is exactly
//! one logical writer at any instant.

use std::time::{Duration, Instant};

use bevy_ecs::prelude::{Schedule, World};

use crate::clock::FrameClock;
use crate::runner::{run_frame, run_tick, tick_schedule};
use crate::scenario::{build_scenario, ScenarioError, ScenarioParams};
use crate::systems::dispatch;
use crate::telemetry::{self, CompletedTripRecord, FleetSnapshot, SimTelemetry};

pub struct Simulation {
    pub world: World,
    schedule: Schedule,
    params: ScenarioParams,
}

impl Simulation {
    /// Build a simulation from scenario parameters. Fails on an invalid
    /// road network or duplicate agent ids. The clock starts paused.
    pub fn new(params: ScenarioParams) -> Result<Self, ScenarioError> {
        let mut world = World::new();
        build_scenario(&mut world, &params)?;
        Ok(Self {
            world,
            schedule: tick_schedule(),
            params,
        })
    }

    pub fn params(&self) -> &ScenarioParams {
        &self.params
    }

    pub fn start(&mut self) {
        self.world.resource_mut::<FrameClock>().play();
    }

    pub fn pause(&mut self) {
        self.world.resource_mut::<FrameClock>().pause();
    }

    pub fn is_playing(&self) -> bool {
        self.world.resource::<FrameClock>().is_playing()
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        self.world
            .resource_mut::<FrameClock>()
            .set_speed_multiplier(multiplier);
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.world.resource::<FrameClock>().speed_multiplier()
    }

    /// Advance one wall-clock frame. Call from the host's frame loop; the
    /// tick is scaled by the time since the previous call.
    pub fn tick(&mut self) -> bool {
        run_frame(&mut self.world, &mut self.schedule, Instant::now())
    }

    /// Advance deterministically by `elapsed`. Applies nothing while
    /// paused.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        run_tick(&mut self.world, &mut self.schedule, elapsed)
    }

    pub fn assign_trip(&mut self, driver_id: &str, rider_id: &str) {
        dispatch::assign_trip(&mut self.world, driver_id, rider_id);
    }

    pub fn assign_random_trips(&mut self) {
        dispatch::assign_random_trips(&mut self.world);
    }

    pub fn set_driver_availability(&mut self, driver_id: &str, online: bool) {
        dispatch::set_driver_availability(&mut self.world, driver_id, online);
    }

    /// Rebuild the world from the seed scenario: seed positions and
    /// statuses, empty routes, riders waiting, trip log cleared. The
    /// playing state and current speed multiplier carry over.
    pub fn reset(&mut self) {
        let playing = self.is_playing();
        let multiplier = self.speed_multiplier();

        let mut world = World::new();
        if build_scenario(&mut world, &self.params).is_err() {
            return;
        }
        self.world = world;
        self.schedule = tick_schedule();

        let mut clock = self.world.resource_mut::<FrameClock>();
        clock.set_speed_multiplier(multiplier);
        if playing {
            clock.play();
        }
    }

    pub fn snapshot(&mut self) -> FleetSnapshot {
        telemetry::capture_snapshot(&mut self.world)
    }

    pub fn route_polyline(&mut self, driver_id: &str) -> Vec<(f64, f64)> {
        telemetry::route_polyline(&mut self.world, driver_id)
    }

    pub fn completed_trips(&self) -> &[CompletedTripRecord] {
        &self.world.resource::<SimTelemetry>().completed_trips
    }
}
