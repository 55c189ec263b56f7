//! Particle and mode types shared by the animator and the field.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ParseModeError;

/// Which of the two target shapes particles are heading toward.
///
/// In the tree demo `ShapeA` is the assembled tree and `ShapeB` the
/// scattered cloud. Switching is instantaneous; the easing comes from the
/// animator, never from the mode itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    ShapeA,
    ShapeB,
}

impl Mode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Mode::ShapeA => Mode::ShapeB,
            Mode::ShapeB => Mode::ShapeA,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::ShapeA => "shape-a",
            Mode::ShapeB => "shape-b",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "shape-a" | "shapea" | "assembled" => Ok(Mode::ShapeA),
            "b" | "shape-b" | "shapeb" | "scattered" => Ok(Mode::ShapeB),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// A point with two fixed targets and one moving position.
///
/// The targets are set at creation and never change; only the current
/// position is advanced by the animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    shape_a: Vec3,
    shape_b: Vec3,
    pub(crate) current: Vec3,
}

impl Particle {
    /// Create a particle resting on its shape A target
    pub fn new(shape_a: Vec3, shape_b: Vec3) -> Self {
        Self::with_current(shape_a, shape_b, shape_a)
    }

    /// Create a particle at an arbitrary starting position
    pub fn with_current(shape_a: Vec3, shape_b: Vec3, current: Vec3) -> Self {
        Self {
            shape_a,
            shape_b,
            current,
        }
    }

    pub fn shape_a(&self) -> Vec3 {
        self.shape_a
    }

    pub fn shape_b(&self) -> Vec3 {
        self.shape_b
    }

    pub fn current(&self) -> Vec3 {
        self.current
    }

    /// Target selected by `mode`
    pub fn target(&self, mode: Mode) -> Vec3 {
        match mode {
            Mode::ShapeA => self.shape_a,
            Mode::ShapeB => self.shape_b,
        }
    }

    /// Distance between the current position and the active target
    pub fn offset(&self, mode: Mode) -> f32 {
        self.current.distance(self.target(mode))
    }
}
