//! Free-fly camera driven by yaw/pitch Euler angles
//!
//! Roll is not modeled. The basis (front, right, up) is rebuilt as a whole from yaw and
//! pitch on every rotation, so it is always orthonormal.

use glam::{Mat4, Vec3};

pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 10.0, 20.0);
pub const DEFAULT_FRONT: Vec3 = Vec3::new(0.0, -0.3, -1.0);
pub const DEFAULT_UP: Vec3 = Vec3::Y;
/// Where the reset binding puts the camera
pub const HOME_POSITION: Vec3 = Vec3::new(0.0, 10.0, 30.0);

pub const DEFAULT_FOV_DEGREES: f32 = 45.0;
pub const DEFAULT_YAW: f32 = -90.0;
pub const PITCH_LIMIT: f32 = 89.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 500.0;

const WORLD_UP: Vec3 = Vec3::Y;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FreeCamera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,

    /// Vertical field of view (degrees)
    pub fov: f32,
    // Degrees. Only mutated through rotate_* so the basis stays in sync.
    pitch: f32,
    yaw: f32,
}

impl FreeCamera {
    /// The given `front`/`up` are replaced right away by the basis implied by the
    /// default yaw (-90°) and pitch (0°).
    pub fn new(position: Vec3, front: Vec3, up: Vec3) -> Self {
        let mut camera = Self {
            position,
            front,
            up,
            right: front.cross(up).normalize_or_zero(),
            fov: DEFAULT_FOV_DEGREES,
            pitch: 0.0,
            yaw: DEFAULT_YAW,
        };
        camera.update_vectors();
        camera
    }

    /// Camera at `position` with the default orientation
    pub fn at(position: Vec3) -> Self {
        Self::new(position, DEFAULT_FRONT, DEFAULT_UP)
    }

    /// Camera at the reset position
    pub fn home() -> Self {
        Self::at(HOME_POSITION)
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.front * distance;
    }

    pub fn move_backward(&mut self, distance: f32) {
        self.position -= self.front * distance;
    }

    pub fn move_up(&mut self, distance: f32) {
        self.position += self.up * distance;
    }

    pub fn move_down(&mut self, distance: f32) {
        self.position -= self.up * distance;
    }

    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right * distance;
    }

    pub fn move_left(&mut self, distance: f32) {
        self.position -= self.right * distance;
    }

    /// Tilt up (positive) or down, clamped to ±89° so `right` never degenerates
    pub fn rotate_pitch(&mut self, degrees: f32) {
        self.pitch = (self.pitch + degrees).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Turn about the world vertical. Yaw is left unbounded.
    pub fn rotate_yaw(&mut self, degrees: f32) {
        self.yaw += degrees;
        self.update_vectors();
    }

    /// World to camera transform (right-handed)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection with [0, 1] depth. `aspect` is not validated.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    fn update_vectors(&mut self) {
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();

        self.front = Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize();
        self.right = self.front.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self::new(DEFAULT_POSITION, DEFAULT_FRONT, DEFAULT_UP)
    }
}

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad0: f32,
}

impl CameraUniform {
    pub fn from_camera(camera: &FreeCamera, aspect: f32) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix(aspect).to_cols_array_2d(),
            position: camera.position.to_array(),
            _pad0: 0.0,
        }
    }
}
