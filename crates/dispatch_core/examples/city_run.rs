//! Run the demo city headless and print fleet counts as trips complete.
//!
//! Run with: cargo run -p dispatch_core --example city_run

use std::time::Duration;

use dispatch_core::scenario::ScenarioParams;
use dispatch_core::simulation::Simulation;

fn main() {
    const FRAMES: usize = 3_600;
    const FRAME_MS: u64 = 17;
    const REPORT_EVERY: usize = 600;

    let mut sim = match Simulation::new(ScenarioParams::default().with_seed(7)) {
        Ok(sim) => sim,
        Err(error) => {
            eprintln!("failed to build scenario: {error}");
            return;
        }
    };
    sim.start();
    sim.set_speed_multiplier(4.0);
    sim.assign_random_trips();

    println!("--- Demo city run (seed 7, {} frames at {} ms) ---", FRAMES, FRAME_MS);
    for tick in 1..=FRAMES {
        sim.advance(Duration::from_millis(FRAME_MS));

        // Keep idle drivers moving once the initial wave finishes.
        if tick % 900 == 0 {
            sim.assign_random_trips();
        }

        if tick % REPORT_EVERY == 0 {
            let snapshot = sim.snapshot();
            println!(
                "t={:>6}ms  available={} busy={} en_route={} dropping_off={} | waiting={} picked_up={} completed={} | trips={}",
                snapshot.sim_time_ms,
                snapshot.counts.drivers_available,
                snapshot.counts.drivers_busy,
                snapshot.counts.drivers_en_route,
                snapshot.counts.drivers_dropping_off,
                snapshot.counts.riders_waiting,
                snapshot.counts.riders_picked_up,
                snapshot.counts.riders_completed,
                snapshot.counts.trips_completed,
            );
        }
    }

    let trips = sim.completed_trips();
    println!("\nCompleted trips: {}", trips.len());
    for (i, record) in trips.iter().enumerate() {
        println!(
            "  {}  driver={:?} rider={:?} completed_at={} ms",
            i + 1,
            record.driver,
            record.rider,
            record.completed_at_ms
        );
    }
}
