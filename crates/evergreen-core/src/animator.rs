//! Exponential smoothing of particle positions toward the active target.
//!
//! Each step moves a particle a fraction `1 - e^(-k * dt)` of the remaining
//! distance to its target, where `k` is the smoothing rate in 1/seconds.
//! The fraction is always in `[0, 1)`, so particles never overshoot, and
//! two steps of `dt` land exactly where one step of `2 * dt` would: the
//! motion only depends on wall-clock time, not on the frame rate.
//!
//! The cheaper per-frame form `p += (target - p) * min(1, k * dt)` is not
//! used. It agrees with the exponential form for small `dt` but moves
//! further per second at low frame rates and snaps onto the target once
//! `k * dt >= 1`.

use glam::Vec3;

use crate::particle::{Mode, Particle};

/// Advances particles toward the target selected by the current mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphAnimator {
    /// Smoothing rate `k` in 1/seconds.
    /// A rate of 2.5 covers ~63% of the remaining distance in 0.4s.
    rate: f32,
}

impl Default for MorphAnimator {
    fn default() -> Self {
        Self {
            rate: Self::DEFAULT_RATE,
        }
    }
}

impl MorphAnimator {
    pub const DEFAULT_RATE: f32 = 2.5;

    /// Create an animator with the given smoothing rate.
    ///
    /// Non-finite or negative rates fall back to [`Self::DEFAULT_RATE`].
    pub fn new(rate: f32) -> Self {
        if !rate.is_finite() || rate < 0.0 {
            log::warn!(
                "Invalid smoothing rate {}, using default {}",
                rate,
                Self::DEFAULT_RATE
            );
            return Self::default();
        }
        Self { rate }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Fraction of the remaining distance covered in `elapsed` seconds
    pub fn blend_factor(&self, elapsed: f32) -> f32 {
        let dt = sanitize_elapsed(elapsed);
        if dt == 0.0 {
            return 0.0;
        }
        1.0 - (-self.rate * dt).exp()
    }

    /// Move every particle toward its active target, in place.
    pub fn advance(&self, particles: &mut [Particle], mode: Mode, elapsed: f32) {
        let t = self.blend_factor(elapsed);
        if t == 0.0 {
            return;
        }

        for particle in particles.iter_mut() {
            particle.current = approach(particle.current, particle.target(mode), t);
        }
    }

    /// Positions after advancing, leaving `particles` untouched
    pub fn advanced_positions(
        &self,
        particles: &[Particle],
        mode: Mode,
        elapsed: f32,
    ) -> Vec<Vec3> {
        let t = self.blend_factor(elapsed);
        particles
            .iter()
            .map(|p| {
                if t == 0.0 {
                    p.current
                } else {
                    approach(p.current, p.target(mode), t)
                }
            })
            .collect()
    }
}

/// Move `current` the fraction `t` of the way to `target`.
///
/// Written as `current + delta * t` so a particle already on its target
/// stays there bit-for-bit.
#[inline]
fn approach(current: Vec3, target: Vec3, t: f32) -> Vec3 {
    current + (target - current) * t
}

/// Treat negative, NaN and infinite frame deltas as "no time passed"
pub fn sanitize_elapsed(elapsed: f32) -> f32 {
    if elapsed.is_finite() && elapsed > 0.0 {
        elapsed
    } else {
        0.0
    }
}
