use std::collections::HashSet;

use bevy_ecs::prelude::World;
use thiserror::Error;

use crate::clock::FrameClock;
use crate::ecs::{ActiveRoute, Driver, DriverInfo, Heading, Position, Rider, RiderInfo};
use crate::map::{MapError, Point, RoadGraph};
use crate::pathfinding::PathCache;
use crate::systems::dispatch::DispatchRng;
use crate::telemetry::SimTelemetry;

use super::params::ScenarioParams;

/// Errors raised while building a scenario world.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("road network: {0}")]
    Map(#[from] MapError),

    #[error("duplicate agent id '{0}'")]
    DuplicateAgent(String),
}

/// Populate `world` with the road graph, clock, RNG, telemetry, and the
/// seed fleet described by `params`.
///
/// Every agent starts with an empty route; riders start `waiting`. Agent
/// ids must be unique across drivers and riders so host commands resolve
/// unambiguously.
pub fn build_scenario(world: &mut World, params: &ScenarioParams) -> Result<(), ScenarioError> {
    let graph = RoadGraph::from_specs(&params.network)?;

    let mut seen = HashSet::new();
    for id in params
        .drivers
        .iter()
        .map(|d| &d.id)
        .chain(params.riders.iter().map(|r| &r.id))
    {
        if !seen.insert(id.as_str()) {
            return Err(ScenarioError::DuplicateAgent(id.clone()));
        }
    }

    world.insert_resource(graph);
    world.insert_resource(PathCache::with_capacity(params.path_cache_capacity));

    let mut clock = FrameClock::default();
    clock.set_speed_multiplier(params.speed_multiplier);
    world.insert_resource(clock);

    let seed = params.seed.unwrap_or(0);
    world.insert_resource(DispatchRng::seeded(seed.wrapping_add(0xd15c_beef)));
    world.insert_resource(SimTelemetry::default());

    for seed in &params.drivers {
        world.spawn((
            Driver::new(seed.status, params.driver_speed),
            DriverInfo {
                id: seed.id.clone(),
                name: seed.name.clone(),
                vehicle: seed.vehicle.clone(),
            },
            Position(Point::new(seed.x, seed.y)),
            Heading::default(),
            ActiveRoute::default(),
        ));
    }

    for seed in &params.riders {
        world.spawn((
            Rider::waiting(),
            RiderInfo {
                id: seed.id.clone(),
                name: seed.name.clone(),
                destination: seed.destination.clone(),
            },
            Position(Point::new(seed.x, seed.y)),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::DriverStatus;
    use crate::scenario::{DriverSeed, RiderSeed};

    #[test]
    fn builds_the_default_scenario() {
        let mut world = World::new();
        build_scenario(&mut world, &ScenarioParams::default()).expect("build");

        assert!(world.contains_resource::<RoadGraph>());
        assert!(world.contains_resource::<FrameClock>());

        let drivers = world.query::<&Driver>().iter(&world).count();
        let riders = world.query::<&Rider>().iter(&world).count();
        assert_eq!(drivers, 5);
        assert_eq!(riders, 3);

        let offline = world
            .query::<&Driver>()
            .iter(&world)
            .filter(|d| d.status == DriverStatus::Offline)
            .count();
        assert_eq!(offline, 1);
    }

    #[test]
    fn empty_network_fails_construction() {
        let mut world = World::new();
        let params = ScenarioParams {
            network: Vec::new(),
            ..ScenarioParams::default()
        };
        let err = build_scenario(&mut world, &params).expect_err("empty network");
        assert!(matches!(err, ScenarioError::Map(MapError::EmptyNetwork)));
    }

    #[test]
    fn duplicate_agent_ids_fail_construction() {
        let mut world = World::new();
        let mut params = ScenarioParams::default();
        params.riders.push(RiderSeed {
            id: "d1".to_string(),
            name: "Shadow".to_string(),
            destination: "Anywhere".to_string(),
            x: 0.0,
            y: 0.0,
        });
        let err = build_scenario(&mut world, &params).expect_err("duplicate id");
        assert!(matches!(err, ScenarioError::DuplicateAgent(id) if id == "d1"));
    }

    #[test]
    fn seed_status_and_speed_are_applied() {
        let mut world = World::new();
        let params = ScenarioParams {
            drivers: vec![DriverSeed {
                id: "d1".to_string(),
                name: "Solo".to_string(),
                vehicle: "Van".to_string(),
                x: 10.0,
                y: 20.0,
                status: DriverStatus::Offline,
            }],
            riders: Vec::new(),
            ..ScenarioParams::default()
        }
        .with_driver_speed(0.05);
        build_scenario(&mut world, &params).expect("build");

        let driver = world
            .query::<&Driver>()
            .iter(&world)
            .next()
            .expect("driver");
        assert_eq!(driver.status, DriverStatus::Offline);
        assert_eq!(driver.speed, 0.05);
    }
}
