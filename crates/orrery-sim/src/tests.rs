use crate::body::*;
use crate::system::*;
use glam::Vec3;

const EPS: f32 = 1e-4;

fn in_range(angle: f32) -> bool {
    (0.0..FULL_TURN_DEG).contains(&angle)
}

#[test]
fn test_phase_angles_stay_wrapped() {
    let mut body = OrbitingBody::new(5.0, 123.4, -987.6, 1.0);
    let steps = [0.016, 1.0, -3.5, 100.0, -0.0001, 7.25, -250.0, 1e-7, 33.3];

    for _ in 0..50 {
        for dt in steps {
            body.advance(dt);
            assert!(in_range(body.orbit_angle), "orbit angle {} escaped", body.orbit_angle);
            assert!(in_range(body.rotation_angle), "spin angle {} escaped", body.rotation_angle);
        }
    }
}

#[test]
fn test_orbit_closes_after_full_turn() {
    let start = 37.0;
    let mut body = OrbitingBody::new(8.0, 36.0, 0.0, 1.0).with_phase(start, 0.0);

    // 10 steps of 36° each
    for _ in 0..10 {
        body.advance(1.0);
    }
    assert!((body.orbit_angle - start).abs() < EPS, "ended at {}", body.orbit_angle);

    // Same turn in uneven steps
    for dt in [0.25, 2.0, 3.5, 4.25] {
        body.advance(dt);
    }
    let drift = (body.orbit_angle - start).abs();
    assert!(drift < 1e-3 || (FULL_TURN_DEG - drift) < 1e-3, "ended at {}", body.orbit_angle);
}

#[test]
fn test_stationary_body_stays_on_center() {
    let center = Vec3::new(-2.0, 0.5, 7.0);
    let mut body = OrbitingBody::new(0.0, 77.0, 13.0, 2.0).with_orbit_center(center);

    for _ in 0..40 {
        body.advance(0.37);
        assert_eq!(body.orbit_position(), center);
    }
}

#[test]
fn test_translate_rotate_scale_order() {
    let body = OrbitingBody::new(5.0, 0.0, 0.0, 2.0);
    let model = body.model_matrix();

    let origin = model.transform_point3(Vec3::ZERO);
    assert!((origin - Vec3::new(5.0, 0.0, 0.0)).length() < EPS, "origin -> {origin:?}");

    let tip = model.transform_point3(Vec3::X);
    assert!((tip - Vec3::new(7.0, 0.0, 0.0)).length() < EPS, "tip -> {tip:?}");
}

#[test]
fn test_transforms_keep_insertion_order() {
    let mut system = BodySystem::new();
    for radius in [0.0, 3.0, 1.0, 7.0, 2.0] {
        system.add_body(OrbitingBody::new(radius, 0.0, 0.0, 1.0));
    }

    let xs: Vec<f32> = system
        .collect_transforms()
        .iter()
        .map(|m| m.transform_point3(Vec3::ZERO).x)
        .collect();
    assert_eq!(xs, vec![0.0, 3.0, 1.0, 7.0, 2.0]);
    assert_eq!(system.body_count(), 5);
}

#[test]
fn test_empty_system_yields_nothing() {
    let mut system = BodySystem::new();
    system.advance(1.0);
    assert!(system.collect_transforms().is_empty());
}
