//! First-person player controller.
//!
//! Walking is a fixed distance per frame along the camera's heading; mouse
//! movement turns the heading. Tilt is tracked and clamped but the view only
//! yaws, so the player always looks level.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::Input;

/// Where the player stands when a session starts.
pub const DEFAULT_START: Vec3 = Vec3::new(0.0, 1.0, 15.0);

/// Distance walked per frame.
pub const DEFAULT_MOVE_SPEED: f32 = 0.1;

/// Radians turned per pixel of cursor movement.
pub const DEFAULT_LOOK_SENSITIVITY: f32 = 0.005;

/// Keeps tilt short of straight up or down.
const TILT_MARGIN: f32 = 0.1;

/// Player tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting position
    pub start: Vec3,
    /// Distance walked per frame
    pub move_speed: f32,
    /// Radians per pixel of cursor movement
    pub look_sensitivity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            move_speed: DEFAULT_MOVE_SPEED,
            look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
        }
    }
}

/// First-person camera rig driven by input.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    position: Vec3,
    yaw: f32,
    tilt: f32,
    move_speed: f32,
    look_sensitivity: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}

impl Player {
    /// Creates a player at the configured start, facing -Z.
    #[must_use]
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            position: config.start,
            yaw: 0.0,
            tilt: 0.0,
            move_speed: config.move_speed,
            look_sensitivity: config.look_sensitivity,
        }
    }

    /// Camera position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Heading around +Y in radians.
    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Clamped pitch in radians.
    #[must_use]
    pub const fn tilt(&self) -> f32 {
        self.tilt
    }

    /// View orientation (yaw only).
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Unit vector the player walks along when moving forward.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Unit vector the player strafes along when moving right.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Applies one frame of input: walk, then turn.
    pub fn update(&mut self, input: &Input) {
        let step = self.forward() * input.movement.y + self.right() * input.movement.x;
        self.position += step * self.move_speed;

        self.yaw -= input.look_delta.x * self.look_sensitivity;
        self.tilt -= input.look_delta.y * self.look_sensitivity;
        let limit = std::f32::consts::FRAC_PI_2 - TILT_MARGIN;
        self.tilt = self.tilt.clamp(-limit, limit);
    }
}
