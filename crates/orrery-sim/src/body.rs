//! Kinematic orbiting body
//!
//! Orbits are angle-driven circles in the XZ plane. There is no mass and no force
//! model: a body simply advances its orbit phase and its spin phase at fixed rates.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Full turn in degrees
pub const FULL_TURN_DEG: f32 = 360.0;

/// Wrap an angle in degrees into [0, 360)
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= FULL_TURN_DEG {
        0.0
    } else {
        wrapped
    }
}

/// One body revolving around a fixed point while spinning about its own vertical axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitingBody {
    /// Distance from `orbit_center` (0 = stationary at the center)
    pub orbit_radius: f32,
    /// Degrees of orbit phase per unit of simulated time
    pub orbit_speed: f32,
    /// Degrees of spin per unit of simulated time
    pub rotation_speed: f32,
    /// Uniform mesh scale
    pub scale: f32,
    /// Nominal orbit-plane normal. Stored only: orbits are always in the XZ plane.
    pub orbit_axis: Vec3,
    /// World-space point the body revolves around
    pub orbit_center: Vec3,

    /// Current orbit phase, degrees in [0, 360)
    pub orbit_angle: f32,
    /// Current spin phase, degrees in [0, 360)
    pub rotation_angle: f32,
}

impl OrbitingBody {
    pub fn new(orbit_radius: f32, orbit_speed: f32, rotation_speed: f32, scale: f32) -> Self {
        Self {
            orbit_radius,
            orbit_speed,
            rotation_speed,
            scale,
            orbit_axis: Vec3::Y,
            orbit_center: Vec3::ZERO,
            orbit_angle: 0.0,
            rotation_angle: 0.0,
        }
    }

    pub fn with_orbit_axis(mut self, axis: Vec3) -> Self {
        self.orbit_axis = axis;
        self
    }

    pub fn with_orbit_center(mut self, center: Vec3) -> Self {
        self.orbit_center = center;
        self
    }

    /// Start at the given phases (wrapped into [0, 360))
    pub fn with_phase(mut self, orbit_angle: f32, rotation_angle: f32) -> Self {
        self.orbit_angle = wrap_degrees(orbit_angle);
        self.rotation_angle = wrap_degrees(rotation_angle);
        self
    }

    /// Whether the body sits on its orbit center
    pub fn is_stationary(&self) -> bool {
        self.orbit_radius == 0.0
    }

    /// World position on the orbit circle at the current phase
    pub fn orbit_position(&self) -> Vec3 {
        let (sin, cos) = self.orbit_angle.to_radians().sin_cos();
        self.orbit_center + Vec3::new(self.orbit_radius * cos, 0.0, self.orbit_radius * sin)
    }

    /// Local-to-world transform: `T(orbit_position) * R_y(rotation_angle) * S(scale)`
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.orbit_position())
            * Mat4::from_rotation_y(self.rotation_angle.to_radians())
            * Mat4::from_scale(Vec3::splat(self.scale))
    }

    /// Advance both phases by `dt` units of simulated time.
    ///
    /// `dt` is not validated: zero freezes the body, negative values run it backwards.
    pub fn advance(&mut self, dt: f32) {
        self.orbit_angle = wrap_degrees(self.orbit_angle + self.orbit_speed * dt);
        self.rotation_angle = wrap_degrees(self.rotation_angle + self.rotation_speed * dt);
    }
}

impl Default for OrbitingBody {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < EPS, "expected {b:?}, got {a:?}");
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert!((wrap_degrees(370.0) - 10.0).abs() < EPS);
        assert!((wrap_degrees(-10.0) - 350.0).abs() < EPS);
        assert!((wrap_degrees(-730.0) - 350.0).abs() < EPS);

        let tiny = wrap_degrees(-1e-8);
        assert!((0.0..FULL_TURN_DEG).contains(&tiny), "got {tiny}");
    }

    #[test]
    fn test_orbit_position_quadrants() {
        let mut body = OrbitingBody::new(10.0, 0.0, 0.0, 1.0);
        assert_vec_close(body.orbit_position(), Vec3::new(10.0, 0.0, 0.0));

        body.orbit_angle = 90.0;
        assert_vec_close(body.orbit_position(), Vec3::new(0.0, 0.0, 10.0));

        body.orbit_angle = 180.0;
        assert_vec_close(body.orbit_position(), Vec3::new(-10.0, 0.0, 0.0));
    }

    #[test]
    fn test_orbit_position_offset_center() {
        let body = OrbitingBody::new(2.0, 0.0, 0.0, 1.0)
            .with_orbit_center(Vec3::new(1.0, 3.0, -4.0))
            .with_phase(270.0, 0.0);
        assert_vec_close(body.orbit_position(), Vec3::new(1.0, 3.0, -6.0));
    }

    #[test]
    fn test_orbit_axis_does_not_tilt_orbit() {
        let body = OrbitingBody::new(5.0, 0.0, 0.0, 1.0)
            .with_orbit_axis(Vec3::X)
            .with_phase(45.0, 0.0);
        assert!(body.orbit_position().y.abs() < EPS);
    }

    #[test]
    fn test_advance_wraps_forward() {
        let mut body = OrbitingBody::new(1.0, 100.0, 250.0, 1.0);
        body.advance(4.0);
        assert!((body.orbit_angle - 40.0).abs() < EPS);
        assert!((body.rotation_angle - 280.0).abs() < EPS);
    }

    #[test]
    fn test_advance_negative_dt_runs_backwards() {
        let mut body = OrbitingBody::new(1.0, 30.0, 10.0, 1.0);
        body.advance(-1.0);
        assert!((body.orbit_angle - 330.0).abs() < EPS);
        assert!((body.rotation_angle - 350.0).abs() < EPS);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut body = OrbitingBody::new(1.0, 30.0, 10.0, 1.0).with_phase(12.0, 34.0);
        body.advance(0.0);
        assert_eq!(body.orbit_angle, 12.0);
        assert_eq!(body.rotation_angle, 34.0);
    }

    #[test]
    fn test_spin_rotates_about_y() {
        let body = OrbitingBody::new(0.0, 0.0, 0.0, 1.0).with_phase(0.0, 90.0);
        let p = body.model_matrix().transform_point3(Vec3::X);
        // +90° about +Y takes +X to -Z
        assert_vec_close(p, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_model_matrix_spin_is_about_body_origin() {
        let body = OrbitingBody::new(5.0, 0.0, 0.0, 1.0).with_phase(0.0, 180.0);
        let m = body.model_matrix();
        assert_vec_close(m.transform_point3(Vec3::ZERO), Vec3::new(5.0, 0.0, 0.0));
        assert_vec_close(m.transform_point3(Vec3::X), Vec3::new(4.0, 0.0, 0.0));
    }
}
