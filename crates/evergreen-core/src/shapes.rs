//! Procedural distributions for the two target shapes.
//!
//! The assembled tree is a spiral cone indexed by a ratio in `[0, 1]`
//! (0 = base, 1 = tip). The scattered cloud is a spherical shell around
//! the origin. Both take any `rand::Rng` so generation can be seeded.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Spiral cone the particles assemble into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeShape {
    /// Total height, centred on the origin
    pub height: f32,
    /// Cone radius at the base
    pub base_radius: f32,
    /// Number of full turns of the spiral from base to tip
    pub turns: f32,
    /// Max random displacement per axis
    pub jitter: f32,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            height: 12.0,
            base_radius: 4.5,
            turns: 9.0,
            jitter: 0.35,
        }
    }
}

impl TreeShape {
    /// Position on the spiral for `ratio` (clamped to `[0, 1]`)
    pub fn spiral_point(&self, ratio: f32) -> Vec3 {
        let ratio = ratio.clamp(0.0, 1.0);
        let y = ratio * self.height - self.height / 2.0;
        let radius = self.base_radius * (1.0 - ratio);
        let angle = ratio * self.turns * TAU;
        Vec3::new(radius * angle.cos(), y, radius * angle.sin())
    }

    /// Spiral point with per-axis jitter
    pub fn position_at<R: Rng + ?Sized>(&self, ratio: f32, rng: &mut R) -> Vec3 {
        let jitter = Vec3::new(
            signed_unit(rng),
            signed_unit(rng),
            signed_unit(rng),
        ) * self.jitter;
        self.spiral_point(ratio) + jitter
    }
}

/// Spherical shell the particles scatter into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterShape {
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for ScatterShape {
    fn default() -> Self {
        Self {
            min_radius: 8.0,
            max_radius: 22.0,
        }
    }
}

impl ScatterShape {
    /// Random direction with a magnitude in `[min_radius, max_radius]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let direction = random_direction(rng);
        let magnitude = self.min_radius + (self.max_radius - self.min_radius) * rng.gen::<f32>();
        direction * magnitude
    }
}

/// Uniformly distributed unit vector
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z = signed_unit(rng);
    let phi = rng.gen::<f32>() * TAU;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}
