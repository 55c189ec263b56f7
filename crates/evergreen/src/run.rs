//! Headless demo loop
//!
//! Drives a particle field the way the interactive demo's frame callback
//! does: toggle on a schedule, advance, refresh the instance buffer, and
//! record how far the particles are from their targets.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use evergreen_core::{FrameClock, InstanceBuffer, Mode, OrnamentStyle, ParticleField};
use serde::{Deserialize, Serialize};

use crate::config::{DemoConfig, RunConfig};

/// Max particle offset at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetSample {
    pub time: f32,
    pub mode: Mode,
    pub max_offset: f32,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub frames: u64,
    pub simulated_seconds: f32,
    pub toggles: u32,
    pub final_mode: Mode,
    pub final_offset: f32,
    pub settled: bool,
    pub samples: Vec<OffsetSample>,
}

impl RunReport {
    /// Save report to RON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize run report to RON")?;

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!("Failed to write run report: {}", path.as_ref().display())
        })?;

        Ok(())
    }
}

pub struct DemoRunner {
    field: ParticleField,
    instances: InstanceBuffer,
    run: RunConfig,
    time: f32,
    frames: u64,
    toggles: u32,
    next_toggle: f32,
    next_sample: f32,
    samples: Vec<OffsetSample>,
}

impl DemoRunner {
    pub fn new(config: &DemoConfig) -> Result<Self> {
        config.validate()?;

        let field =
            ParticleField::from_config(&config.field).context("Failed to build particle field")?;
        let instances =
            InstanceBuffer::new(OrnamentStyle::palette_for(field.len(), config.field.seed));

        log::info!(
            "Particle field ready: {} particles, rate {}/s, start mode {}",
            field.len(),
            field.animator().rate(),
            field.mode()
        );

        Ok(Self {
            field,
            instances,
            run: config.run.clone(),
            time: 0.0,
            frames: 0,
            toggles: 0,
            next_toggle: config.run.toggle_every,
            next_sample: 0.0,
            samples: Vec::new(),
        })
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    /// Run one frame of `dt` seconds
    pub fn step(&mut self, dt: f32) -> Result<()> {
        self.time += dt.max(0.0);
        self.frames += 1;

        if self.run.toggle_every > 0.0 && self.time >= self.next_toggle {
            let mode = self.field.toggle();
            self.toggles += 1;
            self.next_toggle = next_deadline(self.time, self.run.toggle_every);
            log::info!("t={:.2}s toggled to {}", self.time, mode);
        }

        self.field.update(dt);
        self.instances
            .write(self.field.positions(), self.time)
            .context("Failed to refresh instance buffer")?;

        if self.time >= self.next_sample {
            let sample = OffsetSample {
                time: self.time,
                mode: self.field.mode(),
                max_offset: self.field.max_offset(),
            };
            log::debug!(
                "t={:.2}s mode={} max_offset={:.4}",
                sample.time,
                sample.mode,
                sample.max_offset
            );
            self.samples.push(sample);
            self.next_sample = next_deadline(self.time, self.run.sample_every);
        }

        Ok(())
    }

    /// Simulate `run.seconds` with a fixed step of `1 / run.fps`
    pub fn run_fixed(mut self) -> Result<RunReport> {
        let dt = self.run.frame_dt();
        let frames = (self.run.seconds * self.run.fps).ceil() as u64;
        log::info!(
            "Headless run: {:.1}s @ {:.1}fps ({} frames)",
            self.run.seconds,
            self.run.fps,
            frames
        );

        for _ in 0..frames {
            self.step(dt)?;
        }

        Ok(self.finish())
    }

    /// Run in wall-clock time, sleeping between frames to hold `run.fps`
    pub fn run_realtime(mut self) -> Result<RunReport> {
        let frame = Duration::from_secs_f32(self.run.frame_dt());
        let mut clock = FrameClock::new();
        log::info!("Realtime run: {:.1}s @ {:.1}fps", self.run.seconds, self.run.fps);

        while self.time < self.run.seconds {
            std::thread::sleep(frame);
            let dt = clock.tick();
            self.step(dt)?;
        }

        Ok(self.finish())
    }

    fn finish(self) -> RunReport {
        let final_offset = self.field.max_offset();
        let settled = final_offset <= self.run.settle_epsilon;
        log::info!(
            "Done after {} frames: mode {}, max offset {:.5}{}",
            self.frames,
            self.field.mode(),
            final_offset,
            if settled { " (settled)" } else { "" }
        );

        RunReport {
            frames: self.frames,
            simulated_seconds: self.time,
            toggles: self.toggles,
            final_mode: self.field.mode(),
            final_offset,
            settled,
            samples: self.samples,
        }
    }
}

/// First multiple of `every` strictly after `time`.
///
/// Long frames skip missed deadlines instead of firing once per later frame.
fn next_deadline(time: f32, every: f32) -> f32 {
    let next = ((time / every).floor() + 1.0) * every;
    if next > time {
        next
    } else {
        time + every
    }
}
