//! Owned particle state driven by the host's frame callback.
//!
//! The field is the only writer of particle positions. Rendering adapters
//! borrow [`ParticleField::positions`] between updates and never hold on to
//! the particle storage itself.

use glam::Vec3;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::animator::MorphAnimator;
use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::particle::{Mode, Particle};

/// A fixed-size set of particles plus the mode they are heading toward
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    mode: Mode,
    animator: MorphAnimator,
}

impl ParticleField {
    /// Wrap existing particles. Their current positions are kept as-is.
    pub fn new(particles: Vec<Particle>, mode: Mode, animator: MorphAnimator) -> Self {
        Self {
            particles,
            mode,
            animator,
        }
    }

    /// Build `count` particles from caller-supplied distributions.
    ///
    /// `assembled` receives the particle's ratio along the shape, from 0.0 for
    /// the first particle to 1.0 for the last. Every particle starts on the
    /// target of `mode`.
    pub fn generate<A, S>(
        count: usize,
        mode: Mode,
        animator: MorphAnimator,
        mut assembled: A,
        mut scattered: S,
    ) -> Self
    where
        A: FnMut(f32) -> Vec3,
        S: FnMut() -> Vec3,
    {
        let denom = count.saturating_sub(1).max(1) as f32;
        let particles = (0..count)
            .map(|i| {
                let shape_a = assembled(i as f32 / denom);
                let shape_b = scattered();
                let mut particle = Particle::new(shape_a, shape_b);
                particle.current = particle.target(mode);
                particle
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Generated particle field: {} particles, starting in {}",
            particles.len(),
            mode
        );

        Self::new(particles, mode, animator)
    }

    /// Build the tree demo field described by `config`.
    ///
    /// The same config (seed included) always produces the same field.
    pub fn from_config(config: &FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        // Separate streams so changing one shape leaves the other untouched
        let mut tree_rng = Xoshiro256StarStar::seed_from_u64(config.seed);
        let mut scatter_rng = Xoshiro256StarStar::seed_from_u64(config.seed.wrapping_add(1));
        let tree = config.tree;
        let scatter = config.scatter;

        Ok(Self::generate(
            config.particle_count,
            config.start_mode,
            MorphAnimator::new(config.rate),
            |ratio| tree.position_at(ratio, &mut tree_rng),
            || scatter.sample(&mut scatter_rng),
        ))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            log::debug!("Particle field mode: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Switch to the other mode and return it
    pub fn toggle(&mut self) -> Mode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn animator(&self) -> &MorphAnimator {
        &self.animator
    }

    /// Advance all particles by `elapsed` seconds toward the active shape
    pub fn update(&mut self, elapsed: f32) {
        self.animator.advance(&mut self.particles, self.mode, elapsed);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current positions in particle order
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.particles.iter().map(Particle::current)
    }

    /// Largest distance between a particle and its active target
    pub fn max_offset(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| p.offset(self.mode))
            .fold(0.0, f32::max)
    }

    /// Whether every particle is within `epsilon` of its active target
    pub fn is_settled(&self, epsilon: f32) -> bool {
        self.max_offset() <= epsilon
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
