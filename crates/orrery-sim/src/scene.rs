//! Scene description: which bodies exist and how they move
//!
//! Scenes are plain JSON so they can be edited by hand:
//!
//! ```json
//! { "bodies": [ { "name": "Sun", "rotation_speed": 5.0, "scale": 3.0 },
//!               { "name": "Mercury", "orbit_radius": 6.0, "orbit_speed": 48.0 } ] }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::body::OrbitingBody;
use crate::error::{SceneError, SceneResult};
use crate::system::BodySystem;

fn default_scale() -> f32 {
    1.0
}

fn default_axis() -> Vec3 {
    Vec3::Y
}

/// Construction parameters for one body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub orbit_radius: f32,
    #[serde(default)]
    pub orbit_speed: f32,
    #[serde(default)]
    pub rotation_speed: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_axis")]
    pub orbit_axis: Vec3,
    #[serde(default)]
    pub orbit_center: Vec3,
    /// Starting orbit phase in degrees
    #[serde(default)]
    pub initial_angle: f32,
}

impl BodyConfig {
    fn new(name: &str, orbit_radius: f32, orbit_speed: f32, rotation_speed: f32, scale: f32) -> Self {
        Self {
            name: name.to_string(),
            orbit_radius,
            orbit_speed,
            rotation_speed,
            scale,
            orbit_axis: Vec3::Y,
            orbit_center: Vec3::ZERO,
            initial_angle: 0.0,
        }
    }

    fn at_angle(mut self, degrees: f32) -> Self {
        self.initial_angle = degrees;
        self
    }

    pub fn to_body(&self) -> OrbitingBody {
        OrbitingBody::new(self.orbit_radius, self.orbit_speed, self.rotation_speed, self.scale)
            .with_orbit_axis(self.orbit_axis)
            .with_orbit_center(self.orbit_center)
            .with_phase(self.initial_angle, 0.0)
    }
}

/// A whole scene; the first body is the anchor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub bodies: Vec<BodyConfig>,
}

impl SceneConfig {
    /// Built-in scene: a sun and six planets on widening, slowing orbits
    pub fn solar() -> Self {
        Self {
            bodies: vec![
                BodyConfig::new("Sun", 0.0, 0.0, 5.0, 3.0),
                BodyConfig::new("Mercury", 6.0, 48.0, 30.0, 0.4),
                BodyConfig::new("Venus", 9.0, 35.0, -12.0, 0.7).at_angle(60.0),
                BodyConfig::new("Earth", 13.0, 29.0, 90.0, 0.8).at_angle(130.0),
                BodyConfig::new("Mars", 18.0, 24.0, 85.0, 0.55).at_angle(200.0),
                BodyConfig::new("Jupiter", 24.0, 13.0, 150.0, 1.6).at_angle(260.0),
                BodyConfig::new("Saturn", 30.0, 9.0, 140.0, 1.3).at_angle(320.0),
            ],
        }
    }

    pub fn from_json(json: &str) -> SceneResult<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validated()
    }

    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let scene: Self = serde_json::from_reader(BufReader::new(file))?;
        tracing::info!("Loaded scene {} ({} bodies)", path.display(), scene.bodies.len());
        scene.validated()
    }

    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validated(self) -> SceneResult<Self> {
        if self.bodies.is_empty() {
            return Err(SceneError::Empty);
        }
        Ok(self)
    }

    /// Name of the body at `index`, or a positional fallback
    pub fn body_name(&self, index: usize) -> String {
        match self.bodies.get(index) {
            Some(body) if !body.name.is_empty() => body.name.clone(),
            _ => format!("body-{index}"),
        }
    }

    pub fn build_system(&self) -> BodySystem {
        let mut system = BodySystem::with_capacity(self.bodies.len());
        for body in &self.bodies {
            system.add_body(body.to_body());
        }
        system
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::solar()
    }
}
