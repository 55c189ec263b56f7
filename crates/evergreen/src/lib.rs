//! # Evergreen - Particle Tree Demo (headless)
//!
//! Runs the particle tree without a window: the field toggles between the
//! assembled tree and the scattered cloud on a schedule while the run logs
//! how quickly the particles settle.

pub mod config;
pub mod run;

pub use config::{DemoConfig, RunConfig};
pub use run::{DemoRunner, OffsetSample, RunReport};
