//! Shared fixtures for tests: small networks and pre-built scenario worlds.

use bevy_ecs::prelude::World;

use crate::ecs::DriverStatus;
use crate::map::NodeSpec;
use crate::scenario::{build_scenario, DriverSeed, RiderSeed, ScenarioParams};

/// A straight line of `count` nodes with `spacing` between neighbors,
/// labeled `n1..n{count}`.
pub fn line_network(count: usize, spacing: f64) -> Vec<NodeSpec> {
    (0..count)
        .map(|i| {
            let mut connections = Vec::new();
            if i > 0 {
                connections.push(format!("n{}", i));
            }
            if i + 1 < count {
                connections.push(format!("n{}", i + 2));
            }
            NodeSpec {
                id: format!("n{}", i + 1),
                x: i as f64 * spacing,
                y: 0.0,
                zone: "grid".to_string(),
                connections,
            }
        })
        .collect()
}

/// Two connected west-side nodes plus a disconnected island far east.
pub fn split_network() -> Vec<NodeSpec> {
    vec![
        NodeSpec {
            id: "a".to_string(),
            x: 0.0,
            y: 0.0,
            zone: "west".to_string(),
            connections: vec!["b".to_string()],
        },
        NodeSpec {
            id: "b".to_string(),
            x: 1.0,
            y: 0.0,
            zone: "west".to_string(),
            connections: vec![],
        },
        NodeSpec {
            id: "island".to_string(),
            x: 100.0,
            y: 100.0,
            zone: "east".to_string(),
            connections: vec![],
        },
    ]
}

pub fn driver_seed(id: &str, x: f64, y: f64, status: DriverStatus) -> DriverSeed {
    DriverSeed {
        id: id.to_string(),
        name: format!("Driver {id}"),
        vehicle: "Test Van".to_string(),
        x,
        y,
        status,
    }
}

pub fn rider_seed(id: &str, x: f64, y: f64) -> RiderSeed {
    RiderSeed {
        id: id.to_string(),
        name: format!("Rider {id}"),
        destination: "Harbor".to_string(),
        x,
        y,
    }
}

/// One available driver at the west end of a 4-node line, one waiting
/// rider at the east end.
pub fn line_params() -> ScenarioParams {
    ScenarioParams {
        network: line_network(4, 1.0),
        drivers: vec![driver_seed("d1", 0.0, 0.0, DriverStatus::Available)],
        riders: vec![rider_seed("r1", 3.0, 0.0)],
        seed: Some(1),
        ..ScenarioParams::default()
    }
}

/// Build a world from `params`, panicking on configuration errors.
pub fn build_world(params: &ScenarioParams) -> World {
    let mut world = World::new();
    build_scenario(&mut world, params).expect("scenario should build");
    world
}
