//! Startup configuration for the windowed renderer

use std::path::PathBuf;

use orrery_sim::SceneConfig;

/// Sun texture fallback tint
pub const SUN_TINT: [u8; 3] = [255, 190, 60];
/// Planet texture fallback tint
pub const PLANET_TINT: [u8; 3] = [90, 140, 220];

#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub scene: SceneConfig,
    /// OBJ model shared by every body; a generated sphere when unset
    pub mesh: Option<PathBuf>,
    pub sun_texture: Option<PathBuf>,
    pub planet_texture: Option<PathBuf>,
    /// Simulated time units per real second
    pub rate: f32,
    pub width: u32,
    pub height: u32,
    pub show_orbits: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            mesh: None,
            sun_texture: None,
            planet_texture: None,
            rate: orrery_sim::rates::NORMAL,
            width: 900,
            height: 900,
            show_orbits: true,
        }
    }
}
