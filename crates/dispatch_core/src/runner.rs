//! Tick driving: converts host frames into scaled simulation ticks.
//!
//! The host schedules frames (a timer, a render loop, a test); this module
//! turns each frame into one run of the tick schedule with a [`TickScale`]
//! computed from the elapsed time. Nothing runs while the clock is paused.

use std::time::{Duration, Instant};

use bevy_ecs::prelude::{Schedule, World};

use crate::clock::FrameClock;
use crate::systems::movement::movement_system;

/// Build the per-tick schedule.
pub fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(movement_system);
    schedule
}

/// Advance by one wall-clock frame. Returns `false` while paused and on the
/// anchoring frame right after a resume.
pub fn run_frame(world: &mut World, schedule: &mut Schedule, now: Instant) -> bool {
    let Some(elapsed) = world.resource_mut::<FrameClock>().begin_frame(now) else {
        return false;
    };
    run_elapsed(world, schedule, elapsed)
}

/// Advance by an explicit elapsed duration. Deterministic entry point for
/// tests and headless runs; applies nothing while paused.
pub fn run_tick(world: &mut World, schedule: &mut Schedule, elapsed: Duration) -> bool {
    if !world.resource::<FrameClock>().is_playing() {
        return false;
    }
    run_elapsed(world, schedule, elapsed)
}

fn run_elapsed(world: &mut World, schedule: &mut Schedule, elapsed: Duration) -> bool {
    if elapsed.is_zero() {
        return false;
    }
    let scale = world.resource_mut::<FrameClock>().tick_scale(elapsed);
    world.insert_resource(scale);
    schedule.run(world);
    true
}
