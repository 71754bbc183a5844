use serde::{Deserialize, Serialize};

use crate::ecs::DriverStatus;
use crate::map::NodeSpec;

/// Default per-driver speed: edge progress per 60 Hz frame.
const DEFAULT_DRIVER_SPEED: f64 = 0.02;

const DEFAULT_PATH_CACHE_CAPACITY: usize = 256;

fn default_driver_speed() -> f64 {
    DEFAULT_DRIVER_SPEED
}

fn default_speed_multiplier() -> f64 {
    1.0
}

fn default_path_cache_capacity() -> usize {
    DEFAULT_PATH_CACHE_CAPACITY
}

/// One seeded driver. Position is a raw map coordinate; the nearest network
/// node is resolved when a route is first assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSeed {
    pub id: String,
    pub name: String,
    pub vehicle: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub status: DriverStatus,
}

/// One seeded rider. `destination` is the stated destination label shown in
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderSeed {
    pub id: String,
    pub name: String,
    pub destination: String,
    pub x: f64,
    pub y: f64,
}

/// Parameters for building a simulation: the road network, the seed fleet,
/// and global tuning. Provided by the host at construction time; the
/// defaults are the bundled demo city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub network: Vec<NodeSpec>,
    pub drivers: Vec<DriverSeed>,
    pub riders: Vec<RiderSeed>,
    /// RNG seed for patrol and dropoff sampling. `None` seeds from zero.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_driver_speed")]
    pub driver_speed: f64,
    #[serde(default = "default_speed_multiplier")]
    pub speed_multiplier: f64,
    #[serde(default = "default_path_cache_capacity")]
    pub path_cache_capacity: usize,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            network: super::demo_network(),
            drivers: super::demo_drivers(),
            riders: super::demo_riders(),
            seed: None,
            driver_speed: DEFAULT_DRIVER_SPEED,
            speed_multiplier: 1.0,
            path_cache_capacity: DEFAULT_PATH_CACHE_CAPACITY,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_driver_speed(mut self, speed: f64) -> Self {
        self.driver_speed = speed;
        self
    }

    pub fn with_speed_multiplier(mut self, multiplier: f64) -> Self {
        self.speed_multiplier = multiplier;
        self
    }
}
