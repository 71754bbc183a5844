mod support;

use dispatch_core::ecs::{ActiveRoute, DriverStatus, RiderStatus};
use dispatch_core::scenario::ScenarioParams;
use dispatch_core::simulation::Simulation;
use dispatch_core::test_helpers::line_params;

use support::{driver_entity, frame};

#[test]
fn one_trip_runs_end_to_end() {
    let mut sim = Simulation::new(line_params()).expect("simulation");
    sim.start();
    sim.set_speed_multiplier(10.0);
    sim.assign_trip("d1", "r1");

    let mut completed = false;
    for _ in 0..2_000 {
        sim.advance(frame());
        if sim.snapshot().counts.riders_completed == 1 {
            completed = true;
            break;
        }
    }
    assert!(completed, "trip did not complete within the tick budget");

    let snapshot = sim.snapshot();
    let driver = &snapshot.drivers[0];
    assert_eq!(driver.status, DriverStatus::Available);
    assert!(driver.rider.is_none());

    let rider = &snapshot.riders[0];
    assert_eq!(rider.status, RiderStatus::Completed);
    assert!(rider.assigned_driver.is_none());

    assert_eq!(sim.completed_trips().len(), 1);
    assert!(snapshot.sim_time_ms > 0);
}

#[test]
fn pause_preserves_fractional_progress() {
    let mut paused_run = Simulation::new(line_params()).expect("simulation");
    let mut continuous_run = Simulation::new(line_params()).expect("simulation");
    for sim in [&mut paused_run, &mut continuous_run] {
        sim.start();
        sim.assign_trip("d1", "r1");
    }

    for _ in 0..5 {
        paused_run.advance(frame());
    }
    paused_run.pause();
    let entity = driver_entity(&mut paused_run.world, "d1");
    let held = paused_run
        .world
        .get::<ActiveRoute>(entity)
        .expect("route")
        .progress;
    assert!(held > 0.0);

    // Ticks while paused apply nothing.
    assert!(!paused_run.advance(frame()));
    assert_eq!(
        paused_run
            .world
            .get::<ActiveRoute>(entity)
            .expect("route")
            .progress,
        held
    );

    paused_run.start();
    for _ in 0..5 {
        paused_run.advance(frame());
    }
    for _ in 0..10 {
        continuous_run.advance(frame());
    }

    let resumed = paused_run
        .world
        .get::<ActiveRoute>(entity)
        .expect("route")
        .progress;
    let reference_entity = driver_entity(&mut continuous_run.world, "d1");
    let reference = continuous_run
        .world
        .get::<ActiveRoute>(reference_entity)
        .expect("route")
        .progress;
    assert!((resumed - reference).abs() < 1e-9);
}

#[test]
fn speed_multiplier_scales_advancement() {
    let mut normal = Simulation::new(line_params()).expect("simulation");
    let mut doubled = Simulation::new(line_params()).expect("simulation");
    doubled.set_speed_multiplier(2.0);

    for sim in [&mut normal, &mut doubled] {
        sim.start();
        sim.assign_trip("d1", "r1");
        for _ in 0..5 {
            sim.advance(frame());
        }
    }

    let normal_entity = driver_entity(&mut normal.world, "d1");
    let doubled_entity = driver_entity(&mut doubled.world, "d1");
    let normal_progress = normal
        .world
        .get::<ActiveRoute>(normal_entity)
        .expect("route")
        .progress;
    let doubled_progress = doubled
        .world
        .get::<ActiveRoute>(doubled_entity)
        .expect("route")
        .progress;
    assert!((doubled_progress - 2.0 * normal_progress).abs() < 1e-9);
}

#[test]
fn reset_restores_seed_state_and_is_idempotent() {
    let mut sim = Simulation::new(ScenarioParams::default().with_seed(11)).expect("simulation");
    sim.start();
    sim.set_speed_multiplier(3.0);
    sim.assign_random_trips();
    for _ in 0..50 {
        sim.advance(frame());
    }
    assert!(sim.snapshot().sim_time_ms > 0);

    sim.reset();
    let first = sim.snapshot();
    sim.reset();
    let second = sim.snapshot();
    assert_eq!(first, second);

    assert_eq!(first.sim_time_ms, 0);
    assert_eq!(first.counts.riders_waiting, 3);
    assert_eq!(first.counts.trips_completed, 0);
    assert_eq!(first.counts.drivers_en_route, 0);

    let d1 = first
        .drivers
        .iter()
        .find(|d| d.id == "d1")
        .expect("d1 snapshot");
    assert_eq!((d1.x, d1.y), (280.0, 200.0));
    assert_eq!(d1.status, DriverStatus::Available);

    // Host-level controls survive the rebuild.
    assert!(sim.is_playing());
    assert_eq!(sim.speed_multiplier(), 3.0);
}

#[test]
fn polyline_tracks_the_remaining_route() {
    let mut sim = Simulation::new(line_params()).expect("simulation");
    sim.start();
    sim.assign_trip("d1", "r1");
    for _ in 0..3 {
        sim.advance(frame());
    }

    let snapshot = sim.snapshot();
    let driver = &snapshot.drivers[0];
    let polyline = sim.route_polyline("d1");

    assert_eq!(polyline.len(), 4);
    assert!((polyline[0].0 - driver.x).abs() < 1e-9);
    assert!((polyline[0].1 - driver.y).abs() < 1e-9);
    assert_eq!(polyline[1], (1.0, 0.0));
    assert_eq!(*polyline.last().expect("endpoint"), (3.0, 0.0));

    assert!(sim.route_polyline("d4").is_empty());
}
