//! Keyboard bindings
//!
//! Held keys move and turn the camera every frame, scaled by frame time.
//! Toggle keys fire once per physical press.

use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::camera::FreeCamera;

/// World units per second
pub const MOVE_SPEED: f32 = 5.0;
/// Degrees per second
pub const TURN_SPEED: f32 = 50.0;

/// One-shot commands bound to a key press
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleOrbits,
    ResetCamera,
    TogglePause,
    SlowDown,
    SpeedUp,
    Exit,
}

impl KeyAction {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyO => Some(Self::ToggleOrbits),
            KeyCode::KeyR => Some(Self::ResetCamera),
            KeyCode::KeyP => Some(Self::TogglePause),
            KeyCode::Comma => Some(Self::SlowDown),
            KeyCode::Period => Some(Self::SpeedUp),
            KeyCode::Escape => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Apply every held movement/rotation key to the camera
pub fn apply_held_keys(camera: &mut FreeCamera, keys: &HashSet<KeyCode>, dt: f32) {
    let step = MOVE_SPEED * dt;
    let turn = TURN_SPEED * dt;

    // Fixed order: pitch clamping makes opposing keys order-sensitive
    if keys.contains(&KeyCode::KeyW) { camera.move_forward(step); }
    if keys.contains(&KeyCode::KeyS) { camera.move_backward(step); }
    if keys.contains(&KeyCode::KeyA) { camera.move_left(step); }
    if keys.contains(&KeyCode::KeyD) { camera.move_right(step); }
    if keys.contains(&KeyCode::Space) { camera.move_up(step); }
    if keys.contains(&KeyCode::ControlLeft) { camera.move_down(step); }

    if keys.contains(&KeyCode::ArrowUp) { camera.rotate_pitch(turn); }
    if keys.contains(&KeyCode::ArrowDown) { camera.rotate_pitch(-turn); }
    if keys.contains(&KeyCode::ArrowLeft) { camera.rotate_yaw(-turn); }
    if keys.contains(&KeyCode::ArrowRight) { camera.rotate_yaw(turn); }
}

/// Printed by the CLI before the window opens
pub const CONTROLS: &str = "\
  W/S          move forward/back
  A/D          strafe left/right
  Space/LCtrl  move up/down
  Arrows       pitch/yaw
  O            toggle orbit rings
  R            reset camera
  P            pause/resume
  , / .        halve/double time rate
  Escape       quit";
