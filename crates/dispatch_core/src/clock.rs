//! Frame clock: pause/resume, speed multiplier, and elapsed-time scaling.
//!
//! The simulation is advanced by host-driven frames rather than a fixed
//! rate. Each frame's advancement is scaled by the wall-clock time since
//! the previous frame so behavior is frame-rate independent. Pausing clears
//! the frame anchor; resuming continues from the stored fractional state
//! with no drift.

use std::time::{Duration, Instant};

use bevy_ecs::prelude::Resource;

/// Reference frame duration at 60 Hz, in milliseconds. Per-driver speeds
/// are expressed as edge progress per frame of this length.
pub const TARGET_FRAME_MS: f64 = 1000.0 / 60.0;

/// Scale factor for one tick:
/// `elapsed_ms / TARGET_FRAME_MS * speed_multiplier`. Inserted by the
/// runner before the tick schedule executes.
#[derive(Debug, Clone, Copy, Resource)]
pub struct TickScale(pub f64);

#[derive(Debug, Resource)]
pub struct FrameClock {
    playing: bool,
    speed_multiplier: f64,
    last_frame: Option<Instant>,
    sim_time_ms: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            playing: false,
            speed_multiplier: 1.0,
            last_frame: None,
            sim_time_ms: 0.0,
        }
    }
}

impl FrameClock {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Halt ticking. The frame anchor is dropped so the pause gap is not
    /// counted as elapsed time on resume.
    pub fn pause(&mut self) {
        self.playing = false;
        self.last_frame = None;
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Set the global speed multiplier. Non-positive values are ignored.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        if multiplier > 0.0 {
            self.speed_multiplier = multiplier;
        }
    }

    /// Multiplier-scaled simulated time since construction or reset.
    pub fn now_ms(&self) -> u64 {
        self.sim_time_ms as u64
    }

    /// Record a wall-clock frame and return the elapsed time since the
    /// previous one. Returns `None` while paused and on the first frame
    /// after a resume, which only anchors the clock.
    pub fn begin_frame(&mut self, now: Instant) -> Option<Duration> {
        if !self.playing {
            return None;
        }
        self.last_frame
            .replace(now)
            .map(|previous| now.saturating_duration_since(previous))
    }

    /// Convert an elapsed duration into a tick scale, accumulating
    /// simulated time.
    pub fn tick_scale(&mut self, elapsed: Duration) -> TickScale {
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        self.sim_time_ms += elapsed_ms * self.speed_multiplier;
        TickScale(elapsed_ms / TARGET_FRAME_MS * self.speed_multiplier)
    }
}
