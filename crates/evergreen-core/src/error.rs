//! Error types for field configuration and rendering adapters

use thiserror::Error;

/// Rejected [`FieldConfig`](crate::FieldConfig) values
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("smoothing rate must be finite and non-negative, got {0}")]
    InvalidRate(f32),

    #[error("particle field must contain at least one particle")]
    EmptyField,

    #[error("shape parameter `{field}` must be finite and non-negative, got {value}")]
    InvalidShape { field: &'static str, value: f32 },

    #[error("scatter radius range is inverted: min {min} > max {max}")]
    ScatterRange { min: f32, max: f32 },

    #[error("failed to parse RON config: {0}")]
    Parse(String),
}

/// Errors raised while filling an instance buffer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstanceError {
    #[error("instance buffer holds {expected} styles but received {got} positions")]
    LengthMismatch { expected: usize, got: usize },
}

/// Unrecognised [`Mode`](crate::Mode) name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown mode '{0}' (expected shape-a/assembled or shape-b/scattered)")]
pub struct ParseModeError(pub String);
