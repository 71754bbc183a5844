//! Host-facing views of the simulation: fleet snapshots, aggregate counts,
//! the completed-trip log, and the route polyline query.

use std::collections::HashMap;

use bevy_ecs::prelude::{Entity, Resource, World};
use serde::Serialize;

use crate::clock::FrameClock;
use crate::ecs::{
    ActiveRoute, Driver, DriverInfo, DriverStatus, Heading, Position, Rider, RiderInfo,
    RiderStatus,
};
use crate::map::RoadGraph;

/// One completed trip, recorded when the driver reaches its dropoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTripRecord {
    pub driver: Entity,
    pub rider: Entity,
    pub completed_at_ms: u64,
}

/// Collects simulation telemetry. Cleared by a scenario reset.
#[derive(Debug, Default, Resource)]
pub struct SimTelemetry {
    pub completed_trips: Vec<CompletedTripRecord>,
}

/// Snapshot of one driver for a host UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverSnapshot {
    pub id: String,
    pub name: String,
    pub vehicle: String,
    pub status: DriverStatus,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    /// Seed id of the bound rider, when one is assigned.
    pub rider: Option<String>,
}

/// Snapshot of one rider for a host UI. `destination` is the rider's stated
/// destination label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiderSnapshot {
    pub id: String,
    pub name: String,
    pub destination: String,
    pub status: RiderStatus,
    pub x: f64,
    pub y: f64,
    pub assigned_driver: Option<String>,
}

/// Aggregate fleet counts at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetCounts {
    pub drivers_available: usize,
    pub drivers_busy: usize,
    pub drivers_offline: usize,
    pub drivers_en_route: usize,
    pub drivers_dropping_off: usize,
    pub riders_waiting: usize,
    pub riders_picked_up: usize,
    pub riders_completed: usize,
    pub trips_completed: usize,
}

/// A consistent view of the whole fleet, captured between ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSnapshot {
    pub sim_time_ms: u64,
    pub counts: FleetCounts,
    pub drivers: Vec<DriverSnapshot>,
    pub riders: Vec<RiderSnapshot>,
}

/// Capture a snapshot of every driver and rider plus aggregate counts.
pub fn capture_snapshot(world: &mut World) -> FleetSnapshot {
    let driver_ids: HashMap<Entity, String> = {
        let mut query = world.query::<(Entity, &DriverInfo)>();
        query
            .iter(world)
            .map(|(entity, info)| (entity, info.id.clone()))
            .collect()
    };
    let rider_ids: HashMap<Entity, String> = {
        let mut query = world.query::<(Entity, &RiderInfo)>();
        query
            .iter(world)
            .map(|(entity, info)| (entity, info.id.clone()))
            .collect()
    };

    let mut counts = FleetCounts::default();

    let drivers: Vec<DriverSnapshot> = {
        let mut query = world.query::<(&Driver, &DriverInfo, &Position, &Heading)>();
        query
            .iter(world)
            .map(|(driver, info, position, heading)| {
                match driver.status {
                    DriverStatus::Available => counts.drivers_available += 1,
                    DriverStatus::Busy => counts.drivers_busy += 1,
                    DriverStatus::Offline => counts.drivers_offline += 1,
                    DriverStatus::EnRoute => counts.drivers_en_route += 1,
                    DriverStatus::DroppingOff => counts.drivers_dropping_off += 1,
                }
                DriverSnapshot {
                    id: info.id.clone(),
                    name: info.name.clone(),
                    vehicle: info.vehicle.clone(),
                    status: driver.status,
                    x: position.0.x,
                    y: position.0.y,
                    heading: heading.0,
                    rider: driver
                        .rider
                        .and_then(|entity| rider_ids.get(&entity).cloned()),
                }
            })
            .collect()
    };

    let riders: Vec<RiderSnapshot> = {
        let mut query = world.query::<(&Rider, &RiderInfo, &Position)>();
        query
            .iter(world)
            .map(|(rider, info, position)| {
                match rider.status {
                    RiderStatus::Waiting => counts.riders_waiting += 1,
                    RiderStatus::PickedUp => counts.riders_picked_up += 1,
                    RiderStatus::Completed => counts.riders_completed += 1,
                }
                RiderSnapshot {
                    id: info.id.clone(),
                    name: info.name.clone(),
                    destination: info.destination.clone(),
                    status: rider.status,
                    x: position.0.x,
                    y: position.0.y,
                    assigned_driver: rider
                        .assigned_driver
                        .and_then(|entity| driver_ids.get(&entity).cloned()),
                }
            })
            .collect()
    };

    counts.trips_completed = world.resource::<SimTelemetry>().completed_trips.len();

    FleetSnapshot {
        sim_time_ms: world.resource::<FrameClock>().now_ms(),
        counts,
        drivers,
        riders,
    }
}

/// The polyline from a driver's current interpolated position through the
/// remainder of its route, as ordered `(x, y)` pairs. Purely derived; empty
/// when the driver is unknown or has no traversable route. Route entries
/// that resolve to no node are skipped.
pub fn route_polyline(world: &mut World, driver_id: &str) -> Vec<(f64, f64)> {
    let found = {
        let mut query = world.query::<(&DriverInfo, &Position, &ActiveRoute)>();
        query
            .iter(world)
            .find(|(info, _, _)| info.id == driver_id)
            .map(|(_, position, route)| (position.0, route.clone()))
    };
    let Some((position, route)) = found else {
        return Vec::new();
    };
    if !route.is_traversable() {
        return Vec::new();
    }

    let graph = world.resource::<RoadGraph>();
    let mut points = vec![(position.x, position.y)];
    for node_id in route.path.iter().skip(route.index + 1) {
        if let Some(node) = graph.node(*node_id) {
            points.push((node.position.x, node.position.y));
        }
    }
    points
}
