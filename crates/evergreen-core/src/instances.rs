//! Per-instance ornament data for instanced rendering.
//!
//! The buffer reads particle positions from the field each frame and turns
//! them into `#[repr(C)]` records the host uploads to its instance vertex
//! buffer. It keeps its own storage, so simulation and frame data never
//! alias.

use glam::{Mat4, Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::error::InstanceError;

/// GPU-side instance record: column-major model matrix plus RGBA tint
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
}

impl InstanceRaw {
    pub fn translation(&self) -> Vec3 {
        let col = self.model[3];
        Vec3::new(col[0], col[1], col[2])
    }
}

/// Look of a single ornament, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentStyle {
    /// Uniform mesh scale
    pub scale: f32,
    /// Rotation about +Y in radians per second
    pub spin_speed: f32,
    pub tint: [f32; 4],
}

impl Default for OrnamentStyle {
    fn default() -> Self {
        Self {
            scale: 0.2,
            spin_speed: 0.0,
            tint: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl OrnamentStyle {
    const PALETTE: [[f32; 4]; 5] = [
        [1.0, 0.84, 0.35, 1.0], // Gold
        [0.85, 0.1, 0.15, 1.0], // Red
        [0.8, 0.82, 0.88, 1.0], // Silver
        [0.1, 0.55, 0.25, 1.0], // Green
        [1.0, 0.95, 0.8, 1.0],  // Warm white
    ];

    /// One style per particle, drawn from the ornament palette
    pub fn palette_for(count: usize, seed: u64) -> Vec<Self> {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        (0..count)
            .map(|_| Self {
                scale: rng.gen_range(0.12..0.32),
                spin_speed: rng.gen_range(-1.5..1.5),
                tint: Self::PALETTE[rng.gen_range(0..Self::PALETTE.len())],
            })
            .collect()
    }
}

/// CPU copy of the instance buffer, rewritten every frame
#[derive(Debug, Clone)]
pub struct InstanceBuffer {
    styles: Vec<OrnamentStyle>,
    instances: Vec<InstanceRaw>,
}

impl InstanceBuffer {
    pub fn new(styles: Vec<OrnamentStyle>) -> Self {
        let instances = styles
            .iter()
            .map(|style| InstanceRaw {
                model: Mat4::from_scale(Vec3::splat(style.scale)).to_cols_array_2d(),
                tint: style.tint,
            })
            .collect();
        Self { styles, instances }
    }

    /// Rebuild every record from the field's positions at animation `time`.
    ///
    /// The number of positions must match the number of styles.
    pub fn write<I>(&mut self, positions: I, time: f32) -> Result<(), InstanceError>
    where
        I: IntoIterator<Item = Vec3>,
        I::IntoIter: ExactSizeIterator,
    {
        let positions = positions.into_iter();
        if positions.len() != self.styles.len() {
            return Err(InstanceError::LengthMismatch {
                expected: self.styles.len(),
                got: positions.len(),
            });
        }

        for ((instance, style), position) in self
            .instances
            .iter_mut()
            .zip(&self.styles)
            .zip(positions)
        {
            let rotation = Quat::from_rotation_y(style.spin_speed * time);
            instance.model =
                Mat4::from_scale_rotation_translation(Vec3::splat(style.scale), rotation, position)
                    .to_cols_array_2d();
            instance.tint = style.tint;
        }

        Ok(())
    }

    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    /// Raw bytes for `queue.write_buffer` or equivalent
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
