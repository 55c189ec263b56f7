//! Integration tests for the morph model end to end
//!
//! These drive a field the way a host render loop does: build from config,
//! tick it frame by frame, toggle, and hand positions to the instance buffer.

use evergreen_core::prelude::*;
use evergreen_core::{FieldConfig, InstanceBuffer, OrnamentStyle};

const FRAME: f32 = 1.0 / 60.0;

fn small_config() -> FieldConfig {
    FieldConfig {
        particle_count: 200,
        rate: 2.5,
        seed: 2024,
        ..FieldConfig::default()
    }
}

fn run_frames(field: &mut ParticleField, frames: usize) {
    for _ in 0..frames {
        field.update(FRAME);
    }
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_converges_to_scattered_cloud() {
    let mut field = ParticleField::from_config(&small_config()).unwrap();
    assert!(field.is_settled(1e-6));

    field.toggle();
    assert!(!field.is_settled(1.0));

    run_frames(&mut field, 60 * 12);
    assert!(field.is_settled(1e-3), "max offset {}", field.max_offset());
}

#[test]
fn test_converged_field_stays_put() {
    let mut field = ParticleField::from_config(&small_config()).unwrap();
    field.toggle();
    run_frames(&mut field, 60 * 15);

    let before: Vec<Vec3> = field.positions().collect();
    run_frames(&mut field, 120);

    for (a, b) in before.iter().zip(field.positions()) {
        assert!(a.distance(b) < 1e-4);
    }
}

#[test]
fn test_offset_shrinks_every_frame() {
    let mut field = ParticleField::from_config(&small_config()).unwrap();
    field.toggle();

    let mut last = field.max_offset();
    for _ in 0..120 {
        field.update(FRAME);
        let offset = field.max_offset();
        assert!(offset < last);
        last = offset;
    }
}

// ============================================================================
// Toggling
// ============================================================================

#[test]
fn test_toggle_mid_flight_has_no_jump() {
    let mut field = ParticleField::from_config(&small_config()).unwrap();
    field.toggle();
    run_frames(&mut field, 30);

    let before: Vec<Vec3> = field.positions().collect();
    assert_eq!(field.toggle(), Mode::ShapeA);
    let at_toggle: Vec<Vec3> = field.positions().collect();
    assert_eq!(before, at_toggle);

    // One more frame only moves each particle a small fraction of the way
    field.update(FRAME);
    let t = field.animator().blend_factor(FRAME);
    for ((prev, now), particle) in at_toggle.iter().zip(field.positions()).zip(field.particles()) {
        let step = prev.distance(now);
        let remaining = prev.distance(particle.shape_a());
        assert!(step <= remaining * t + 1e-4);
    }
}

#[test]
fn test_toggle_redirects_toward_new_target() {
    let mut field = ParticleField::from_config(&small_config()).unwrap();
    field.toggle();
    run_frames(&mut field, 45);

    field.toggle();
    let offset_before = field.max_offset();
    run_frames(&mut field, 60 * 12);

    assert!(field.max_offset() < offset_before);
    assert!(field.is_settled(1e-3));
    for particle in field.particles() {
        assert!(particle.current().distance(particle.shape_a()) < 1e-3);
    }
}

// ============================================================================
// Frame-rate independence
// ============================================================================

#[test]
fn test_frame_rate_independent() {
    let mut at_30 = ParticleField::from_config(&small_config()).unwrap();
    let mut at_144 = at_30.clone();
    at_30.toggle();
    at_144.toggle();

    for _ in 0..30 {
        at_30.update(1.0 / 30.0);
    }
    for _ in 0..144 {
        at_144.update(1.0 / 144.0);
    }

    for (a, b) in at_30.positions().zip(at_144.positions()) {
        assert!(a.distance(b) < 1e-3, "{} vs {}", a, b);
    }
}

#[test]
fn test_invalid_frame_deltas_leave_field_unchanged() {
    let mut field = ParticleField::from_config(&small_config()).unwrap();
    field.toggle();
    run_frames(&mut field, 10);
    let snapshot = field.particles().to_vec();

    for dt in [0.0, -FRAME, f32::NAN, f32::INFINITY] {
        field.update(dt);
        assert_eq!(field.particles(), snapshot.as_slice());
    }
}

// ============================================================================
// Rendering adapter
// ============================================================================

#[test]
fn test_instance_buffer_tracks_field() {
    let config = small_config();
    let mut field = ParticleField::from_config(&config).unwrap();
    let mut buffer = InstanceBuffer::new(OrnamentStyle::palette_for(field.len(), config.seed));

    field.toggle();
    let mut time = 0.0;
    for _ in 0..20 {
        field.update(FRAME);
        time += FRAME;
        buffer.write(field.positions(), time).unwrap();
    }

    assert_eq!(buffer.len(), field.len());
    for (instance, position) in buffer.instances().iter().zip(field.positions()) {
        assert!((instance.translation() - position).length() < 1e-4);
    }
}
