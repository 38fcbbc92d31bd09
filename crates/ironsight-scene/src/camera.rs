//! Perspective camera and world-to-screen projection.

use glam::{Mat4, Quat, Vec2, Vec3};
use ironsight_common::Viewport;

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_Y_DEGREES: f32 = 60.0;

/// Perspective camera looking down its local -Z axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Orientation
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y_radians: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// Output size
    pub viewport: Viewport,
}

impl Camera {
    /// Creates a camera at the origin with the default lens.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y_radians: DEFAULT_FOV_Y_DEGREES.to_radians(),
            near: 0.1,
            far: 100.0,
            viewport,
        }
    }

    /// Moves and turns the camera.
    pub fn set_pose(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
    }

    /// World-to-view transform.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// View-to-clip transform.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_radians,
            self.viewport.aspect().max(0.0001),
            self.near,
            self.far,
        )
    }

    /// Projects a world point to screen pixels.
    ///
    /// Returns `None` for points behind the eye or an empty viewport. Points
    /// in front of the eye but outside the frustum still project; callers
    /// decide whether they are on screen.
    #[must_use]
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        if self.viewport.is_empty() {
            return None;
        }
        let clip = self.projection_matrix() * self.view_matrix() * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let center = self.viewport.center();
        let x = center.x * (1.0 + ndc.x);
        let y = center.y * (1.0 - ndc.y);
        Some(Vec2::new(x, y))
    }
}
