//! Particle field configuration
//!
//! Every section has compiled defaults, so a RON file only needs to name the
//! values it changes:
//!
//! ```ron
//! (
//!     particle_count: 2000,
//!     rate: 3.0,
//!     tree: (height: 10.0),
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::animator::MorphAnimator;
use crate::error::ConfigError;
use crate::particle::Mode;
use crate::shapes::{ScatterShape, TreeShape};

/// Everything needed to build a [`ParticleField`](crate::ParticleField)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles, fixed for the lifetime of the field
    pub particle_count: usize,
    /// Smoothing rate in 1/seconds
    pub rate: f32,
    /// Seed for shape jitter, scatter positions and ornament styles
    pub seed: u64,
    /// Mode the field starts in; particles start on its targets
    pub start_mode: Mode,
    pub tree: TreeShape,
    pub scatter: ScatterShape,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 1500,
            rate: MorphAnimator::DEFAULT_RATE,
            seed: 0x5EED,
            start_mode: Mode::ShapeA,
            tree: TreeShape::default(),
            scatter: ScatterShape::default(),
        }
    }
}

impl FieldConfig {
    /// Parse a RON document, filling missing fields with defaults
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reject values the field cannot be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyField);
        }
        if !self.rate.is_finite() || self.rate < 0.0 {
            return Err(ConfigError::InvalidRate(self.rate));
        }

        let shape_params = [
            ("tree.height", self.tree.height),
            ("tree.base_radius", self.tree.base_radius),
            ("tree.turns", self.tree.turns),
            ("tree.jitter", self.tree.jitter),
            ("scatter.min_radius", self.scatter.min_radius),
            ("scatter.max_radius", self.scatter.max_radius),
        ];
        for (field, value) in shape_params {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidShape { field, value });
            }
        }

        if self.scatter.min_radius > self.scatter.max_radius {
            return Err(ConfigError::ScatterRange {
                min: self.scatter.min_radius,
                max: self.scatter.max_radius,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 1500);
        assert_eq!(config.rate, MorphAnimator::DEFAULT_RATE);
        assert_eq!(config.start_mode, Mode::ShapeA);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = FieldConfig::from_ron_str("(particle_count: 64, tree: (height: 3.0))")
            .expect("Failed to parse config");

        assert_eq!(config.particle_count, 64);
        assert_eq!(config.tree.height, 3.0);
        assert_eq!(config.tree.base_radius, TreeShape::default().base_radius);
        assert_eq!(config.scatter, ScatterShape::default());
    }

    #[test]
    fn test_start_mode_from_ron() {
        let config = FieldConfig::from_ron_str("(start_mode: ShapeB)").unwrap();
        assert_eq!(config.start_mode, Mode::ShapeB);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = FieldConfig {
            particle_count: 12,
            rate: 4.0,
            seed: 99,
            ..FieldConfig::default()
        };
        let ron = config.to_ron_string().unwrap();
        assert_eq!(FieldConfig::from_ron_str(&ron).unwrap(), config);
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let err = FieldConfig::from_ron_str("(particle_count: \"many\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors() {
        let empty = FieldConfig {
            particle_count: 0,
            ..FieldConfig::default()
        };
        assert_eq!(empty.validate(), Err(ConfigError::EmptyField));

        let bad_rate = FieldConfig {
            rate: -2.0,
            ..FieldConfig::default()
        };
        assert_eq!(bad_rate.validate(), Err(ConfigError::InvalidRate(-2.0)));

        let mut bad_shape = FieldConfig::default();
        bad_shape.tree.height = f32::INFINITY;
        assert!(matches!(
            bad_shape.validate(),
            Err(ConfigError::InvalidShape {
                field: "tree.height",
                ..
            })
        ));

        let mut inverted = FieldConfig::default();
        inverted.scatter.min_radius = 30.0;
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::ScatterRange {
                min: 30.0,
                max: 22.0
            })
        );
    }
}
