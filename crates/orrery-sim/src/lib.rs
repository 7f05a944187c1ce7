pub mod body;
pub mod error;
pub mod orbits;
pub mod scene;
pub mod system;
pub mod time_controller;

#[cfg(test)]
mod tests;

pub use body::{wrap_degrees, OrbitingBody};
pub use error::{SceneError, SceneResult};
pub use orbits::{orbit_circle, orbit_rings, ring_color, OrbitRing, PALETTE, RING_SEGMENTS};
pub use scene::{BodyConfig, SceneConfig};
pub use system::BodySystem;
pub use time_controller::{rates, TimeController, MAX_RATE, MIN_RATE};
