//! Frame delta timing for the host's render loop.

use web_time::Instant;

/// Measures the time between frames.
///
/// Deltas are clamped to `max_step` so a stalled host (debugger, hidden
/// browser tab) resumes with one ordinary step instead of a jump.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    max_step: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub const DEFAULT_MAX_STEP: f32 = 0.1;

    pub fn new() -> Self {
        Self::with_max_step(Self::DEFAULT_MAX_STEP)
    }

    pub fn with_max_step(max_step: f32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            max_step: max_step.max(0.0),
        }
    }

    /// Seconds since the previous tick (or creation), at most `max_step`
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Like [`tick`](Self::tick) with an explicit timestamp
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        // Timestamps older than the last tick count as zero elapsed
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        if now > self.last {
            self.last = now;
        }
        dt.min(self.max_step)
    }

    pub fn max_step(&self) -> f32 {
        self.max_step
    }

    /// Seconds since the clock was created
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}
