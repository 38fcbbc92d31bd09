//! Enemy target slots and their spawn lanes.

use glam::{Quat, Vec3};
use ironsight_common::{NodeHandle, TargetId};
use serde::{Deserialize, Serialize};

/// Default maximum health of a target.
pub const DEFAULT_MAX_HEALTH: u32 = 48;

/// Tilt applied to target billboards so the sprite plane stands upright.
const BILLBOARD_TILT: f32 = -1.6;

/// Yaw offset between the camera heading and a billboard facing it.
const BILLBOARD_YAW_OFFSET: f32 = 2.0;

/// Region a target respawns into.
///
/// Spawn points are `base + (rand[0, jitter_x), 0, -rand[0, jitter_z))` on
/// whole units, so lanes extend toward +x and -z from their base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Lane origin in world space
    pub base: Vec3,
    /// Number of whole-unit steps along +x
    pub jitter_x: u32,
    /// Number of whole-unit steps along -z
    pub jitter_z: u32,
}

impl Lane {
    /// Creates a lane.
    #[must_use]
    pub const fn new(base: Vec3, jitter_x: u32, jitter_z: u32) -> Self {
        Self {
            base,
            jitter_x,
            jitter_z,
        }
    }

    /// Picks a spawn point inside the lane.
    pub fn spawn_point(&self, rng: &mut fastrand::Rng) -> Vec3 {
        let dx = if self.jitter_x == 0 {
            0
        } else {
            rng.u32(0..self.jitter_x)
        };
        let dz = if self.jitter_z == 0 {
            0
        } else {
            rng.u32(0..self.jitter_z)
        };
        Vec3::new(
            self.base.x + dx as f32,
            self.base.y,
            self.base.z - dz as f32,
        )
    }

    /// Whether `point` is one of the positions [`Lane::spawn_point`] can return.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        let dx = point.x - self.base.x;
        let dz = self.base.z - point.z;
        let max_dx = self.jitter_x.saturating_sub(1) as f32;
        let max_dz = self.jitter_z.saturating_sub(1) as f32;
        (point.y - self.base.y).abs() < f32::EPSILON
            && (0.0..=max_dx).contains(&dx)
            && (0.0..=max_dz).contains(&dz)
            && dx.fract() == 0.0
            && dz.fract() == 0.0
    }
}

/// Where a target is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetPhase {
    /// Drawn and eligible for hits
    Active,
    /// Hidden until its respawn timer matures
    Respawning,
}

/// One enemy slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    id: TargetId,
    node: NodeHandle,
    health: u32,
    max_health: u32,
    phase: TargetPhase,
    just_hit: bool,
    lane: Lane,
    position: Vec3,
    rotation: Quat,
}

impl Target {
    /// Creates a visible target at full health standing at the lane base.
    #[must_use]
    pub fn new(id: TargetId, node: NodeHandle, max_health: u32, lane: Lane) -> Self {
        let max_health = max_health.max(1);
        Self {
            id,
            node,
            health: max_health,
            max_health,
            phase: TargetPhase::Active,
            just_hit: false,
            lane,
            position: lane.base,
            rotation: Quat::IDENTITY,
        }
    }

    /// Target identifier.
    #[must_use]
    pub const fn id(&self) -> TargetId {
        self.id
    }

    /// Scene node this target drives.
    #[must_use]
    pub const fn node(&self) -> NodeHandle {
        self.node
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Maximum health.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Whether the target is drawn and can be hit.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.phase == TargetPhase::Active
    }

    /// Whether the last fire event that considered this target was a hit.
    #[must_use]
    pub const fn just_hit(&self) -> bool {
        self.just_hit
    }

    /// Spawn lane.
    #[must_use]
    pub const fn lane(&self) -> &Lane {
        &self.lane
    }

    /// World position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// World orientation.
    #[must_use]
    pub const fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Turns the target's sprite toward a camera with the given yaw.
    pub fn face_camera(&mut self, camera_yaw: f32) {
        self.rotation = billboard_rotation(camera_yaw);
    }

    /// Applies damage, flooring health at zero. Returns the remaining health.
    pub(crate) fn apply_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub(crate) fn set_just_hit(&mut self, hit: bool) {
        self.just_hit = hit;
    }

    /// Hides the target and restores it to full health for its next life.
    pub(crate) fn retire(&mut self) {
        self.health = self.max_health;
        self.just_hit = false;
        self.phase = TargetPhase::Respawning;
    }

    /// Brings the target back at `position` with its transform reset.
    pub(crate) fn revive(&mut self, position: Vec3) {
        self.position = position;
        self.rotation = Quat::IDENTITY;
        self.just_hit = false;
        self.health = self.max_health;
        self.phase = TargetPhase::Active;
    }
}

/// Orientation that makes a target sprite face a camera with the given yaw.
#[must_use]
pub fn billboard_rotation(camera_yaw: f32) -> Quat {
    Quat::from_rotation_y(camera_yaw + BILLBOARD_YAW_OFFSET) * Quat::from_rotation_x(BILLBOARD_TILT)
}
