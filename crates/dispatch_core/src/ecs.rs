//! Entity store component types: drivers, riders, positions, and routes.
//!
//! Drivers and riders live as entities in the simulation's `World`; the
//! enums and components here define every piece of per-agent state the
//! dispatch and movement passes read or write.

use bevy_ecs::prelude::{Component, Entity};
use serde::{Deserialize, Serialize};

use crate::map::{NodeId, Point};

/// Driver trip-lifecycle status.
///
/// `EnRoute` means heading to a pickup; `DroppingOff` means the rider is
/// aboard and the driver is heading to the destination. `Busy` is a patrol
/// route with no rider attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    #[default]
    Available,
    Busy,
    Offline,
    EnRoute,
    DroppingOff,
}

/// Rider trip-lifecycle status. Advances monotonically
/// `Waiting -> PickedUp -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderStatus {
    Waiting,
    PickedUp,
    Completed,
}

/// A pickup or dropoff stop: a raw map position plus a display label.
#[derive(Debug, Clone, PartialEq)]
pub struct TripStop {
    pub point: Point,
    pub label: String,
}

/// Mutable driver state.
#[derive(Debug, Clone, Component)]
pub struct Driver {
    pub status: DriverStatus,
    /// Edge progress gained per 60 Hz frame at multiplier 1.
    pub speed: f64,
    pub pickup: Option<TripStop>,
    pub dropoff: Option<TripStop>,
    pub rider: Option<Entity>,
}

impl Driver {
    pub fn new(status: DriverStatus, speed: f64) -> Self {
        Self {
            status,
            speed,
            pickup: None,
            dropoff: None,
            rider: None,
        }
    }

    /// Return to idle and drop every trip binding.
    pub fn finish_trip(&mut self) {
        self.status = DriverStatus::Available;
        self.pickup = None;
        self.dropoff = None;
        self.rider = None;
    }
}

/// Static driver descriptor from the seed list.
#[derive(Debug, Clone, Component)]
pub struct DriverInfo {
    pub id: String,
    pub name: String,
    pub vehicle: String,
}

/// Static rider descriptor from the seed list. `destination` is the label
/// the rider stated when requesting the trip.
#[derive(Debug, Clone, Component)]
pub struct RiderInfo {
    pub id: String,
    pub name: String,
    pub destination: String,
}

/// Mutable rider state. `assigned_driver` is set only while the status is
/// `Waiting` or `PickedUp`.
#[derive(Debug, Clone, Copy, Component)]
pub struct Rider {
    pub status: RiderStatus,
    pub assigned_driver: Option<Entity>,
}

impl Rider {
    pub fn waiting() -> Self {
        Self {
            status: RiderStatus::Waiting,
            assigned_driver: None,
        }
    }
}

/// Continuous map position. Drivers mid-edge sit between nodes.
#[derive(Debug, Clone, Copy, Component)]
pub struct Position(pub Point);

/// Travel direction in degrees, from `atan2` of the current edge vector.
#[derive(Debug, Clone, Copy, Default, Component)]
pub struct Heading(pub f64);

/// The route a driver is walking.
///
/// While `path.len() >= 2`, `index < path.len() - 1` and
/// `progress` stays in [0, 1]; the driver's position is the interpolation
/// between `path[index]` and `path[index + 1]` at `progress`. A shorter
/// path means the driver is stationary regardless of status.
#[derive(Debug, Clone, Default, Component)]
pub struct ActiveRoute {
    pub path: Vec<NodeId>,
    pub index: usize,
    pub progress: f64,
}

impl ActiveRoute {
    /// Whether the route has any edge to walk.
    pub fn is_traversable(&self) -> bool {
        self.path.len() >= 2
    }

    /// Whether `index` sits on the final node, with no next edge.
    pub fn at_end(&self) -> bool {
        self.index + 1 >= self.path.len()
    }

    /// The edge currently being walked.
    pub fn current_edge(&self) -> Option<(NodeId, NodeId)> {
        let from = *self.path.get(self.index)?;
        let to = *self.path.get(self.index + 1)?;
        Some((from, to))
    }

    /// Replace the route and rewind to its first edge.
    pub fn restart_with(&mut self, path: Vec<NodeId>) {
        self.path = path;
        self.index = 0;
        self.progress = 0.0;
    }

    pub fn clear(&mut self) {
        self.path.clear();
        self.index = 0;
        self.progress = 0.0;
    }
}
