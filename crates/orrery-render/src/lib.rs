//! Orrery Render: wgpu renderer and winit window for the body system

pub mod camera;
pub mod config;
pub mod gpu_types;
pub mod input;
pub mod mesh;
pub mod overlay;
pub mod pipeline;
pub mod renderer;
pub mod texture;
pub mod window;

pub use camera::{CameraUniform, FreeCamera};
pub use config::RenderConfig;
pub use input::{KeyAction, CONTROLS};
pub use mesh::{MeshData, MeshError};
pub use renderer::Renderer;
pub use texture::{TextureError, TextureImage};
pub use window::run;
