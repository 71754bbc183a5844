//! Scenario configuration: parameters, seed lists, and world construction.

mod build;
mod demo;
mod params;

pub use build::{build_scenario, ScenarioError};
pub use demo::{demo_drivers, demo_network, demo_riders};
pub use params::{DriverSeed, RiderSeed, ScenarioParams};
