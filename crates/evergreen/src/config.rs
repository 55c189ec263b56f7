//! Demo configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `evergreen.ron` in the working directory (if it exists), or the file
//!    passed with `--config` (must exist)
//! 3. Environment variables prefixed with `EVERGREEN_`
//!
//! Command-line flags are applied on top by `main`.
//!
//! Example environment variable: `EVERGREEN_FIELD__RATE=4.0`

use std::path::Path;

use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File, FileFormat};
use evergreen_core::FieldConfig;
use serde::{Deserialize, Serialize};

/// Main demo configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DemoConfig {
    #[serde(default)]
    pub field: FieldConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// Headless run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Simulated duration in seconds
    pub seconds: f32,
    /// Frames per simulated second
    pub fps: f32,
    /// Seconds between mode toggles (0 disables toggling)
    pub toggle_every: f32,
    /// Seconds between logged offset samples
    pub sample_every: f32,
    /// Max offset at which the field counts as settled
    pub settle_epsilon: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seconds: 6.0,
            fps: 60.0,
            toggle_every: 2.0,
            sample_every: 0.5,
            settle_epsilon: 1e-3,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.seconds.is_finite() && self.seconds >= 0.0,
            "run.seconds must be finite and non-negative, got {}",
            self.seconds
        );
        ensure!(
            self.fps.is_finite() && self.fps > 0.0,
            "run.fps must be positive, got {}",
            self.fps
        );
        ensure!(
            self.toggle_every.is_finite() && self.toggle_every >= 0.0,
            "run.toggle_every must be finite and non-negative, got {}",
            self.toggle_every
        );
        ensure!(
            self.sample_every.is_finite() && self.sample_every > 0.0,
            "run.sample_every must be positive, got {}",
            self.sample_every
        );
        Ok(())
    }

    /// Fixed step used by the headless loop
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps
    }
}

impl DemoConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `path`, or `evergreen.ron` if no path is given and the file exists
    /// 3. Environment variables prefixed with `EVERGREEN_` (highest priority)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let field = &defaults.field;
        let run = &defaults.run;

        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name("evergreen")
                .format(FileFormat::Ron)
                .required(false),
        };

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("field.particle_count", field.particle_count as i64)?
            .set_default("field.rate", field.rate as f64)?
            .set_default("field.seed", field.seed as i64)?
            .set_default("field.start_mode", format!("{:?}", field.start_mode))?
            .set_default("field.tree.height", field.tree.height as f64)?
            .set_default("field.tree.base_radius", field.tree.base_radius as f64)?
            .set_default("field.tree.turns", field.tree.turns as f64)?
            .set_default("field.tree.jitter", field.tree.jitter as f64)?
            .set_default("field.scatter.min_radius", field.scatter.min_radius as f64)?
            .set_default("field.scatter.max_radius", field.scatter.max_radius as f64)?
            .set_default("run.seconds", run.seconds as f64)?
            .set_default("run.fps", run.fps as f64)?
            .set_default("run.toggle_every", run.toggle_every as f64)?
            .set_default("run.sample_every", run.sample_every as f64)?
            .set_default("run.settle_epsilon", run.settle_epsilon as f64)?
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (EVERGREEN_FIELD__RATE, etc.)
            .add_source(
                Environment::with_prefix("EVERGREEN")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn validate(&self) -> Result<()> {
        self.field
            .validate()
            .context("Invalid field configuration")?;
        self.run.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evergreen_core::Mode;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DemoConfig::default();
        assert_eq!(config.run.fps, 60.0);
        assert_eq!(config.run.toggle_every, 2.0);
        assert_eq!(config.field.particle_count, 1500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_with_defaults() {
        // Should load defaults when no config file exists
        let config = DemoConfig::load(None).expect("Failed to load config");
        assert_eq!(config.run.seconds, 6.0);
        assert_eq!(config.field.start_mode, Mode::ShapeA);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".ron")
            .tempfile()
            .expect("Failed to create temp file");
        writeln!(
            file,
            "(field: (particle_count: 42, start_mode: \"ShapeB\", tree: (height: 3.5)), run: (fps: 30.0))"
        )
        .unwrap();

        let config = DemoConfig::load(Some(file.path())).expect("Failed to load config");
        assert_eq!(config.field.particle_count, 42);
        assert_eq!(config.field.start_mode, Mode::ShapeB);
        assert_eq!(config.field.tree.height, 3.5);
        assert_eq!(config.field.tree.turns, FieldConfig::default().tree.turns);
        assert_eq!(config.run.fps, 30.0);
        assert_eq!(config.run.seconds, 6.0);
    }

    #[test]
    fn test_env_overrides_field_rate() {
        // Only this test sets an EVERGREEN_ variable
        std::env::set_var("EVERGREEN_FIELD__RATE", "4.0");
        let loaded = DemoConfig::load(None);
        std::env::remove_var("EVERGREEN_FIELD__RATE");

        let config = loaded.expect("Failed to load config");
        assert_eq!(config.field.rate, 4.0);
    }

    #[test]
    fn test_load_config_missing_file_fails() {
        let result = DemoConfig::load(Some(Path::new("does/not/exist.ron")));
        assert!(result.is_err());
    }

    #[test]
    fn test_run_validation() {
        let run = RunConfig {
            fps: 0.0,
            ..RunConfig::default()
        };
        assert!(run.validate().is_err());

        let run = RunConfig {
            seconds: f32::NAN,
            ..RunConfig::default()
        };
        assert!(run.validate().is_err());

        assert!((RunConfig::default().frame_dt() - 1.0 / 60.0).abs() < 1e-7);
    }
}
