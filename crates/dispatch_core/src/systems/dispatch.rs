//! Dispatch coordination: binding idle drivers to waiting riders, and
//! patrol routes for idle drivers with no rider demand.
//!
//! Every operation here is a synchronous command over `&mut World`, invoked
//! by the host between ticks. Invalid preconditions are silent no-ops; an
//! unavailable route leaves the driver untouched so the next call can retry.

use bevy_ecs::prelude::{Entity, Mut, Resource, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ecs::{
    ActiveRoute, Driver, DriverInfo, DriverStatus, Position, Rider, RiderInfo, RiderStatus,
    TripStop,
};
use crate::map::{NodeId, RoadGraph};
use crate::pathfinding::PathCache;

/// Seeded RNG for patrol endpoints and re-randomized dropoff destinations,
/// stored as a world resource.
#[derive(Resource)]
pub struct DispatchRng {
    rng: StdRng,
}

impl DispatchRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Two distinct nodes drawn uniformly. `None` when the graph has fewer
    /// than two nodes.
    pub fn random_node_pair(&mut self, graph: &RoadGraph) -> Option<(NodeId, NodeId)> {
        if graph.len() < 2 {
            return None;
        }
        let start = NodeId(self.rng.gen_range(0..graph.len()) as u32);
        let mut end = start;
        while end == start {
            end = NodeId(self.rng.gen_range(0..graph.len()) as u32);
        }
        Some((start, end))
    }

    /// A uniformly random node other than `exclude`. `None` when the graph
    /// has fewer than two nodes.
    pub fn random_node_excluding(
        &mut self,
        graph: &RoadGraph,
        exclude: NodeId,
    ) -> Option<NodeId> {
        if graph.len() < 2 {
            return None;
        }
        loop {
            let candidate = NodeId(self.rng.gen_range(0..graph.len()) as u32);
            if candidate != exclude {
                return Some(candidate);
            }
        }
    }
}

fn find_driver(world: &mut World, id: &str) -> Option<Entity> {
    let mut query = world.query::<(Entity, &DriverInfo)>();
    query
        .iter(world)
        .find(|(_, info)| info.id == id)
        .map(|(entity, _)| entity)
}

fn find_rider(world: &mut World, id: &str) -> Option<Entity> {
    let mut query = world.query::<(Entity, &RiderInfo)>();
    query
        .iter(world)
        .find(|(_, info)| info.id == id)
        .map(|(entity, _)| entity)
}

/// Bind `driver_id` to `rider_id`'s trip request.
///
/// Preconditions: the rider exists and is `waiting`; the driver exists and
/// is `available`. A failed precondition, or a pickup path shorter than two
/// nodes, leaves both records unmodified. On success the driver heads to
/// the rider's nearest node (`en_route`); the rider stays `waiting` until
/// the driver actually arrives.
pub fn assign_trip(world: &mut World, driver_id: &str, rider_id: &str) {
    let Some(driver_entity) = find_driver(world, driver_id) else {
        return;
    };
    let Some(rider_entity) = find_rider(world, rider_id) else {
        return;
    };
    assign_trip_entities(world, driver_entity, rider_entity);
}

fn assign_trip_entities(world: &mut World, driver_entity: Entity, rider_entity: Entity) {
    match world.get::<Driver>(driver_entity) {
        Some(driver) if driver.status == DriverStatus::Available => {}
        _ => return,
    }
    match world.get::<Rider>(rider_entity) {
        Some(rider) if rider.status == RiderStatus::Waiting => {}
        _ => return,
    }
    let Some(driver_pos) = world.get::<Position>(driver_entity).copied() else {
        return;
    };
    let Some(rider_pos) = world.get::<Position>(rider_entity).copied() else {
        return;
    };
    let Some(rider_name) = world
        .get::<RiderInfo>(rider_entity)
        .map(|info| info.name.clone())
    else {
        return;
    };

    let path = world.resource_scope(|world, mut cache: Mut<PathCache>| {
        let graph = world.resource::<RoadGraph>();
        let driver_node = graph.nearest_node(driver_pos.0.x, driver_pos.0.y);
        let pickup_node = graph.nearest_node(rider_pos.0.x, rider_pos.0.y);
        cache.get_or_compute(graph, driver_node, pickup_node)
    });
    if path.len() < 2 {
        return;
    }

    if let Some(mut driver) = world.get_mut::<Driver>(driver_entity) {
        driver.status = DriverStatus::EnRoute;
        driver.pickup = Some(TripStop {
            point: rider_pos.0,
            label: rider_name,
        });
        driver.rider = Some(rider_entity);
    }
    if let Some(mut route) = world.get_mut::<ActiveRoute>(driver_entity) {
        route.restart_with(path);
    }
    if let Some(mut rider) = world.get_mut::<Rider>(rider_entity) {
        rider.assigned_driver = Some(driver_entity);
    }
}

/// Pair every `available` driver with a `waiting`, unassigned rider by
/// position in iteration order. Leftover drivers receive a patrol route
/// between two random nodes; a driver whose sampled pair has no path is
/// left idle until the next call.
pub fn assign_random_trips(world: &mut World) {
    let available: Vec<Entity> = {
        let mut query = world.query::<(Entity, &Driver)>();
        query
            .iter(world)
            .filter(|(_, driver)| driver.status == DriverStatus::Available)
            .map(|(entity, _)| entity)
            .collect()
    };
    let waiting: Vec<Entity> = {
        let mut query = world.query::<(Entity, &Rider)>();
        query
            .iter(world)
            .filter(|(_, rider)| {
                rider.status == RiderStatus::Waiting && rider.assigned_driver.is_none()
            })
            .map(|(entity, _)| entity)
            .collect()
    };

    for (slot, driver_entity) in available.into_iter().enumerate() {
        match waiting.get(slot) {
            Some(&rider_entity) => assign_trip_entities(world, driver_entity, rider_entity),
            None => assign_patrol(world, driver_entity),
        }
    }
}

fn assign_patrol(world: &mut World, driver_entity: Entity) {
    match world.get::<Driver>(driver_entity) {
        Some(driver) if driver.status == DriverStatus::Available => {}
        _ => return,
    }

    let path = world.resource_scope(|world, mut rng: Mut<DispatchRng>| {
        world.resource_scope(|world, mut cache: Mut<PathCache>| {
            let graph = world.resource::<RoadGraph>();
            let Some((start, end)) = rng.random_node_pair(graph) else {
                return Vec::new();
            };
            cache.get_or_compute(graph, start, end)
        })
    });
    if path.len() < 2 {
        return;
    }

    if let Some(mut driver) = world.get_mut::<Driver>(driver_entity) {
        driver.status = DriverStatus::Busy;
    }
    if let Some(mut route) = world.get_mut::<ActiveRoute>(driver_entity) {
        route.restart_with(path);
    }
}

/// Take a driver off duty or bring it back. Only `available <-> offline`
/// transitions apply; drivers mid-trip or on patrol are left unchanged.
pub fn set_driver_availability(world: &mut World, driver_id: &str, online: bool) {
    let Some(driver_entity) = find_driver(world, driver_id) else {
        return;
    };
    let Some(mut driver) = world.get_mut::<Driver>(driver_entity) else {
        return;
    };
    match (driver.status, online) {
        (DriverStatus::Offline, true) => driver.status = DriverStatus::Available,
        (DriverStatus::Available, false) => driver.status = DriverStatus::Offline,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::NodeSpec;

    fn pair_graph() -> RoadGraph {
        let specs = vec![
            NodeSpec {
                id: "a".to_string(),
                x: 0.0,
                y: 0.0,
                zone: "z".to_string(),
                connections: vec!["b".to_string()],
            },
            NodeSpec {
                id: "b".to_string(),
                x: 1.0,
                y: 0.0,
                zone: "z".to_string(),
                connections: vec![],
            },
        ];
        RoadGraph::from_specs(&specs).expect("pair graph")
    }

    #[test]
    fn random_node_pair_is_distinct() {
        let graph = pair_graph();
        let mut rng = DispatchRng::seeded(7);
        for _ in 0..50 {
            let (start, end) = rng.random_node_pair(&graph).expect("pair");
            assert_ne!(start, end);
        }
    }

    #[test]
    fn random_node_excluding_avoids_the_excluded_node() {
        let graph = pair_graph();
        let mut rng = DispatchRng::seeded(7);
        let a = graph.node_by_label("a").expect("a");
        for _ in 0..50 {
            assert_ne!(rng.random_node_excluding(&graph, a), Some(a));
        }
    }

    #[test]
    fn sampling_needs_at_least_two_nodes() {
        let specs = vec![NodeSpec {
            id: "only".to_string(),
            x: 0.0,
            y: 0.0,
            zone: "z".to_string(),
            connections: vec![],
        }];
        let graph = RoadGraph::from_specs(&specs).expect("graph");
        let mut rng = DispatchRng::seeded(7);
        assert!(rng.random_node_pair(&graph).is_none());
        assert!(rng.random_node_excluding(&graph, NodeId(0)).is_none());
    }
}
