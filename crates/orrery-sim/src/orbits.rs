//! Orbit ring geometry for the path overlay

use crate::system::BodySystem;
use glam::Vec3;

/// Segments per ring (the strip has one more vertex so it closes)
pub const RING_SEGMENTS: usize = 100;

/// Ring colors, indexed by `(body_index - 1) % PALETTE.len()`
pub const PALETTE: [[f32; 3]; 7] = [
    [1.0, 0.5, 0.0],
    [0.0, 0.8, 1.0],
    [0.0, 1.0, 0.5],
    [1.0, 0.0, 0.5],
    [0.5, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.8, 0.0],
];

/// Color for the ring of the satellite at `body_index` (>= 1)
pub fn ring_color(body_index: usize) -> [f32; 3] {
    PALETTE[body_index.saturating_sub(1) % PALETTE.len()]
}

/// Closed circle in the XZ plane, `segments + 1` points, first == last
pub fn orbit_circle(center: Vec3, radius: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = angle.sin_cos();
            center + Vec3::new(radius * cos, 0.0, radius * sin)
        })
        .collect()
}

/// One ring to draw as a line strip
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitRing {
    /// Index of the body this ring belongs to
    pub body_index: usize,
    pub color: [f32; 3],
    pub points: Vec<Vec3>,
}

/// Rings for every satellite (index >= 1) that actually orbits
pub fn orbit_rings(system: &BodySystem) -> Vec<OrbitRing> {
    system
        .satellites()
        .filter(|(_, body)| body.orbit_radius > 0.0)
        .map(|(index, body)| OrbitRing {
            body_index: index,
            color: ring_color(index),
            points: orbit_circle(body.orbit_center, body.orbit_radius, RING_SEGMENTS),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::OrbitingBody;

    #[test]
    fn test_circle_is_closed() {
        let points = orbit_circle(Vec3::ZERO, 3.0, RING_SEGMENTS);
        assert_eq!(points.len(), RING_SEGMENTS + 1);
        assert!((points[0] - points[RING_SEGMENTS]).length() < 1e-4);
        for p in &points {
            assert!((p.length() - 3.0).abs() < 1e-4);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_circle_follows_center() {
        let center = Vec3::new(2.0, 1.0, -1.0);
        let points = orbit_circle(center, 1.0, 8);
        assert!((points[0] - Vec3::new(3.0, 1.0, -1.0)).length() < 1e-5);
        assert!(points.iter().all(|p| (p.y - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(ring_color(1), PALETTE[0]);
        assert_eq!(ring_color(7), PALETTE[6]);
        assert_eq!(ring_color(8), PALETTE[0]);
        assert_eq!(ring_color(10), PALETTE[2]);
    }

    #[test]
    fn test_rings_skip_anchor_and_stationary_bodies() {
        let mut system = BodySystem::new();
        system.add_body(OrbitingBody::new(4.0, 0.0, 0.0, 1.0));
        system.add_body(OrbitingBody::new(6.0, 10.0, 0.0, 1.0));
        system.add_body(OrbitingBody::new(0.0, 10.0, 0.0, 1.0));
        system.add_body(OrbitingBody::new(9.0, 5.0, 0.0, 1.0));

        let rings = orbit_rings(&system);
        let indices: Vec<usize> = rings.iter().map(|r| r.body_index).collect();
        assert_eq!(indices, vec![1, 3]);
        assert_eq!(rings[1].color, PALETTE[2]);
    }
}
