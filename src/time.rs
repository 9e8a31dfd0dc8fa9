//! Frame clock feeding `iTime`.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = Clock::new();
//!
//! // Once per rendered frame:
//! let t = clock.tick();
//! sink.set_uniform("ToyCB", "iTime", t.into());
//! ```

use std::time::{Duration, Instant};

/// Elapsed time and frame counter for the render loop.
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
    /// Set while paused.
    paused_at: Option<Instant>,
    /// Total time spent paused, excluded from `elapsed`.
    paused_total: Duration,
    elapsed_secs: f32,
    frame_count: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            paused_at: None,
            paused_total: Duration::ZERO,
            elapsed_secs: 0.0,
            frame_count: 0,
        }
    }

    /// Advance one frame. Returns elapsed seconds.
    pub fn tick(&mut self) -> f32 {
        self.frame_count += 1;
        self.elapsed_secs = self.elapsed_duration().as_secs_f32();
        self.elapsed_secs
    }

    /// Elapsed seconds as of the last [`tick`](Clock::tick).
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Frames ticked since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Freeze `elapsed`. Frames keep counting.
    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    pub fn resume(&mut self) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total += at.elapsed();
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Restart from zero, keeping the pause state.
    pub fn restart(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.paused_total = Duration::ZERO;
        if self.paused_at.is_some() {
            self.paused_at = Some(now);
        }
        self.elapsed_secs = 0.0;
        self.frame_count = 0;
    }

    fn elapsed_duration(&self) -> Duration {
        let end = self.paused_at.unwrap_or_else(Instant::now);
        end.duration_since(self.start).saturating_sub(self.paused_total)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
