//! Frame timing for real hosts.
//!
//! Turns wall-clock frame callbacks into the `dt` the simulation consumes.
//! Long gaps (a hidden window, a debugger pause) are clamped so the particle
//! spawn gate does not see a huge jump.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! // In the frame callback:
//! let dt = clock.tick();
//! controller.on_tick(handle, dt);
//! ```

use std::time::{Duration, Instant};

/// Largest delta handed out by default, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

/// Per-frame delta tracking with pause and fps.
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    /// Fixed delta for deterministic updates.
    fixed_delta: Option<f32>,
    max_delta: f32,
    time_scale: f32,
    paused: bool,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Option<Instant>,
    fps_update_interval: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: None,
            fixed_delta: None,
            max_delta: DEFAULT_MAX_DELTA,
            time_scale: 1.0,
            paused: false,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: None,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record a frame and return its delta in seconds.
    ///
    /// The first frame after creation or [`resume`](Self::resume) has a delta
    /// of zero unless a fixed delta is set.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        let raw = self
            .last_frame
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        let delta = self.fixed_delta.unwrap_or(raw).min(self.max_delta);
        self.delta_secs = delta * self.time_scale;
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;

        let since = *self.fps_update_time.get_or_insert(now);
        let window = now.duration_since(since);
        if window >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / window.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = Some(now);
        }

        self.delta_secs
    }

    /// Accumulated (scaled, clamped) time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Delta of the last tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop time; ticks return zero until resumed.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause. The gap is not counted.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.last_frame = None;
        }
    }

    /// Use a fixed delta instead of wall-clock time. `None` restores real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Upper bound on a single delta, in seconds.
    pub fn set_max_delta(&mut self, max: f32) {
        self.max_delta = max.max(0.0);
    }

    /// Time scale multiplier (negative clamps to zero).
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
