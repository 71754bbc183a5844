//! Bundled demo city: a 16-intersection network spanning six zones, plus a
//! small seed fleet. Used by `ScenarioParams::default()` and the examples.

use crate::ecs::DriverStatus;
use crate::map::NodeSpec;

use super::params::{DriverSeed, RiderSeed};

fn node(id: &str, x: f64, y: f64, zone: &str, connections: &[&str]) -> NodeSpec {
    NodeSpec {
        id: id.to_string(),
        x,
        y,
        zone: zone.to_string(),
        connections: connections.iter().map(|c| c.to_string()).collect(),
    }
}

/// The demo road network. A rough grid with a waterfront edge and an
/// airport spur off `n16`.
pub fn demo_network() -> Vec<NodeSpec> {
    vec![
        node("n1", 200.0, 150.0, "residential", &["n2", "n6"]),
        node("n2", 350.0, 150.0, "residential", &["n1", "n3", "n7"]),
        node("n3", 500.0, 150.0, "downtown", &["n2", "n4", "n8"]),
        node("n4", 650.0, 150.0, "commercial", &["n3", "n5", "n9"]),
        node("n5", 800.0, 150.0, "commercial", &["n4", "n10"]),
        node("n6", 200.0, 300.0, "residential", &["n1", "n7", "n11"]),
        node("n7", 350.0, 300.0, "downtown", &["n2", "n6", "n8", "n12"]),
        node("n8", 500.0, 400.0, "downtown", &["n3", "n7", "n9", "n13"]),
        node("n9", 650.0, 300.0, "commercial", &["n4", "n8", "n10", "n14"]),
        node("n10", 800.0, 300.0, "commercial", &["n5", "n9", "n15"]),
        node("n11", 200.0, 550.0, "waterfront", &["n6", "n12", "n16"]),
        node("n12", 350.0, 550.0, "waterfront", &["n7", "n11", "n13"]),
        node("n13", 500.0, 550.0, "downtown", &["n8", "n12", "n14"]),
        node("n14", 650.0, 550.0, "industrial", &["n9", "n13", "n15"]),
        node("n15", 800.0, 550.0, "industrial", &["n10", "n14"]),
        node("n16", 150.0, 650.0, "airport", &["n11"]),
    ]
}

fn driver(id: &str, x: f64, y: f64, name: &str, status: DriverStatus, vehicle: &str) -> DriverSeed {
    DriverSeed {
        id: id.to_string(),
        name: name.to_string(),
        vehicle: vehicle.to_string(),
        x,
        y,
        status,
    }
}

/// The seed fleet: three idle drivers, one already on a patrol, one off
/// duty.
pub fn demo_drivers() -> Vec<DriverSeed> {
    vec![
        driver("d1", 280.0, 200.0, "Nadia Osman", DriverStatus::Available, "Toyota Camry"),
        driver("d2", 550.0, 280.0, "Marco Reyes", DriverStatus::Busy, "Honda Civic"),
        driver("d3", 720.0, 450.0, "Elif Demir", DriverStatus::Available, "Suzuki Swift"),
        driver("d4", 400.0, 500.0, "Pavel Novak", DriverStatus::Offline, "Kia Sportage"),
        driver("d5", 180.0, 550.0, "Ines Duarte", DriverStatus::Available, "Toyota Corolla"),
    ]
}

fn rider(id: &str, x: f64, y: f64, name: &str, destination: &str) -> RiderSeed {
    RiderSeed {
        id: id.to_string(),
        name: name.to_string(),
        destination: destination.to_string(),
        x,
        y,
    }
}

pub fn demo_riders() -> Vec<RiderSeed> {
    vec![
        rider("r1", 450.0, 190.0, "Jon Aldrete", "Airport"),
        rider("r2", 750.0, 220.0, "Mei Tanaka", "Downtown"),
        rider("r3", 200.0, 480.0, "Lukas Berg", "Mall"),
    ]
}
