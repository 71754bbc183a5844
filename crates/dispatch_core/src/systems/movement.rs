//! Motion simulation: advances every driver along its route each tick and
//! applies the end-of-route trip transitions.
//!
//! Each driver's next state depends only on its own previous state, the
//! tick's scale factor, and the immutable road graph, so drivers never
//! observe each other's updates within a tick. A driver whose route
//! references an unknown node is skipped for the tick; the rest of the
//! fleet keeps moving.

use bevy_ecs::prelude::{Entity, Query, Res, ResMut};

use crate::clock::{FrameClock, TickScale};
use crate::ecs::{ActiveRoute, Driver, DriverStatus, Heading, Position, Rider, RiderStatus, TripStop};
use crate::map::{Point, RoadGraph};
use crate::pathfinding::PathCache;
use crate::telemetry::{CompletedTripRecord, SimTelemetry};

use super::dispatch::DispatchRng;

/// Travel direction of the `from -> to` vector, in degrees.
fn heading_degrees(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

#[allow(clippy::too_many_arguments)]
pub fn movement_system(
    scale: Res<TickScale>,
    clock: Res<FrameClock>,
    graph: Res<RoadGraph>,
    mut cache: ResMut<PathCache>,
    mut rng: ResMut<DispatchRng>,
    mut telemetry: ResMut<SimTelemetry>,
    mut drivers: Query<(Entity, &mut Driver, &mut Position, &mut Heading, &mut ActiveRoute)>,
    mut riders: Query<&mut Rider>,
) {
    let now_ms = clock.now_ms();

    for (entity, mut driver, mut position, mut heading, mut route) in drivers.iter_mut() {
        if driver.status == DriverStatus::Offline || !route.is_traversable() {
            continue;
        }

        if route.at_end() {
            match driver.status {
                DriverStatus::EnRoute => {
                    let Some(stop) = driver.pickup.clone() else {
                        driver.status = DriverStatus::Available;
                        route.clear();
                        continue;
                    };
                    let pickup_node = graph.nearest_node(stop.point.x, stop.point.y);
                    let Some(destination) = rng.random_node_excluding(&graph, pickup_node)
                    else {
                        continue;
                    };
                    let path = cache.get_or_compute(&graph, pickup_node, destination);
                    if path.len() < 2 {
                        // No route to the sampled destination; retry on the
                        // next tick with a fresh sample.
                        continue;
                    }
                    let Some(destination_node) = graph.node(destination) else {
                        continue;
                    };
                    if let Some(rider_entity) = driver.rider {
                        if let Ok(mut rider) = riders.get_mut(rider_entity) {
                            rider.status = RiderStatus::PickedUp;
                        }
                    }
                    driver.status = DriverStatus::DroppingOff;
                    driver.dropoff = Some(TripStop {
                        point: destination_node.position,
                        label: destination_node.zone.clone(),
                    });
                    route.restart_with(path);
                }
                DriverStatus::DroppingOff => {
                    if let Some(rider_entity) = driver.rider {
                        if let Ok(mut rider) = riders.get_mut(rider_entity) {
                            rider.status = RiderStatus::Completed;
                            rider.assigned_driver = None;
                        }
                        telemetry.completed_trips.push(CompletedTripRecord {
                            driver: entity,
                            rider: rider_entity,
                            completed_at_ms: now_ms,
                        });
                    }
                    driver.finish_trip();
                    route.clear();
                }
                _ => {
                    driver.status = DriverStatus::Available;
                    route.clear();
                }
            }
            continue;
        }

        let Some((from_id, to_id)) = route.current_edge() else {
            continue;
        };
        let (Some(from), Some(to)) = (graph.node(from_id), graph.node(to_id)) else {
            // Unknown node id in the route; skip this driver for the tick.
            continue;
        };

        let next_progress = route.progress + driver.speed * scale.0;
        heading.0 = heading_degrees(from.position, to.position);
        if next_progress >= 1.0 {
            position.0 = to.position;
            route.index += 1;
            route.progress = 0.0;
        } else {
            position.0 = from.position.lerp(to.position, next_progress);
            route.progress = next_progress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_points_along_the_axes() {
        let origin = Point::new(0.0, 0.0);
        assert_eq!(heading_degrees(origin, Point::new(1.0, 0.0)), 0.0);
        assert_eq!(heading_degrees(origin, Point::new(0.0, 1.0)), 90.0);
        assert_eq!(heading_degrees(origin, Point::new(-1.0, 0.0)), 180.0);
        assert_eq!(heading_degrees(origin, Point::new(0.0, -1.0)), -90.0);
    }

    #[test]
    fn heading_handles_diagonals() {
        let origin = Point::new(0.0, 0.0);
        let diagonal = heading_degrees(origin, Point::new(1.0, 1.0));
        assert!((diagonal - 45.0).abs() < 1e-9);
    }
}
