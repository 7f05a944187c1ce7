//! Body system state management

use crate::body::OrbitingBody;
use glam::Mat4;

/// Ordered collection of orbiting bodies.
///
/// Insertion order is instance order: index 0 is the anchor (the central body) and
/// indices >= 1 are the satellites that get orbit rings.
#[derive(Clone, Debug, Default)]
pub struct BodySystem {
    bodies: Vec<OrbitingBody>,
}

impl BodySystem {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
        }
    }

    pub fn add_body(&mut self, body: OrbitingBody) {
        self.bodies.push(body);
    }

    /// Advance every body by `dt` units of simulated time, in insertion order
    pub fn advance(&mut self, dt: f32) {
        for body in &mut self.bodies {
            body.advance(dt);
        }
    }

    /// One model matrix per body, in insertion order
    pub fn collect_transforms(&self) -> Vec<Mat4> {
        self.bodies.iter().map(OrbitingBody::model_matrix).collect()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[OrbitingBody] {
        &self.bodies
    }

    /// The central body (index 0)
    pub fn anchor(&self) -> Option<&OrbitingBody> {
        self.bodies.first()
    }

    /// Bodies after the anchor, paired with their instance index
    pub fn satellites(&self) -> impl Iterator<Item = (usize, &OrbitingBody)> {
        self.bodies.iter().enumerate().skip(1)
    }
}

impl FromIterator<OrbitingBody> for BodySystem {
    fn from_iter<I: IntoIterator<Item = OrbitingBody>>(iter: I) -> Self {
        Self {
            bodies: iter.into_iter().collect(),
        }
    }
}
