#![allow(dead_code)]

use std::time::Duration;

use bevy_ecs::prelude::{Entity, Schedule, World};

use dispatch_core::clock::{FrameClock, TARGET_FRAME_MS};
use dispatch_core::ecs::{DriverInfo, RiderInfo};
use dispatch_core::runner::run_tick;

/// One 60 Hz reference frame.
pub fn frame() -> Duration {
    Duration::from_secs_f64(TARGET_FRAME_MS / 1000.0)
}

pub fn start(world: &mut World) {
    world.resource_mut::<FrameClock>().play();
}

/// Run one tick at exactly the reference frame length (scale 1).
pub fn unit_tick(world: &mut World, schedule: &mut Schedule) -> bool {
    run_tick(world, schedule, frame())
}

pub fn unit_ticks(world: &mut World, schedule: &mut Schedule, count: usize) {
    for _ in 0..count {
        unit_tick(world, schedule);
    }
}

pub fn driver_entity(world: &mut World, id: &str) -> Entity {
    let mut query = world.query::<(Entity, &DriverInfo)>();
    query
        .iter(world)
        .find(|(_, info)| info.id == id)
        .map(|(entity, _)| entity)
        .expect("driver entity")
}

pub fn rider_entity(world: &mut World, id: &str) -> Entity {
    let mut query = world.query::<(Entity, &RiderInfo)>();
    query
        .iter(world)
        .find(|(_, info)| info.id == id)
        .map(|(entity, _)| entity)
        .expect("rider entity")
}
