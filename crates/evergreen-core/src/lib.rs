//! # Evergreen Core - Particle Morph Animation
//!
//! A field of particles that eases between two target shapes (an assembled
//! tree and a scattered cloud) with frame-rate independent exponential
//! smoothing. Rendering is left to the host; [`instances`] prepares the
//! per-instance data it uploads.

pub mod animator;
pub mod clock;
pub mod config;
pub mod error;
pub mod field;
pub mod instances;
pub mod particle;
pub mod shapes;

pub use animator::MorphAnimator;
pub use clock::FrameClock;
pub use config::FieldConfig;
pub use error::{ConfigError, InstanceError, ParseModeError};
pub use field::ParticleField;
pub use instances::{InstanceBuffer, InstanceRaw, OrnamentStyle};
pub use particle::{Mode, Particle};
pub use shapes::{ScatterShape, TreeShape};

/// Common imports for internal use
pub mod prelude {
    pub use crate::{Mode, MorphAnimator, Particle, ParticleField};
    pub use glam::Vec3;
}
