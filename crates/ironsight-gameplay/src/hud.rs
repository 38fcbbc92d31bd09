//! Heads-up display model.
//!
//! Builds the list of 2D draw commands for a frame: gun, crosshair, muzzle
//! flash while the trigger is down, a health bar for each target that was
//! just hit, and the camera-position debug readout. Drawing itself belongs
//! to the renderer.

use glam::{Vec2, Vec3};
use ironsight_common::{ScreenRect, Viewport};
use serde::{Deserialize, Serialize};

use crate::input::Input;
use crate::target::Target;

/// Height of the health bar sprite in pixels.
pub const HEALTH_BAR_HEIGHT: i32 = 4;

/// Scale applied when drawing the health bar.
pub const HEALTH_BAR_SCALE: f32 = 2.0;

/// Health bar sits this far left of screen center.
const HEALTH_BAR_CENTER_OFFSET: f32 = 50.0;

/// Health bar top edge.
const HEALTH_BAR_TOP: f32 = 50.0;

/// HUD sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    /// First-person gun
    Gun,
    /// Crosshair
    Crosshair,
    /// Muzzle flash
    MuzzleFlash,
    /// Health bar strip; one pixel of width per point of health
    HealthBar,
}

/// One 2D draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Whole sprite at `position`
    Sprite {
        /// Sprite to draw
        sprite: Sprite,
        /// Top-left corner on screen
        position: Vec2,
        /// Uniform scale
        scale: f32,
    },
    /// Part of a sprite at `position`
    SubSprite {
        /// Sprite to draw from
        sprite: Sprite,
        /// Source rectangle inside the sprite
        source: ScreenRect,
        /// Top-left corner on screen
        position: Vec2,
        /// Uniform scale
        scale: f32,
    },
    /// Debug text in the top-left corner
    DebugText(String),
}

/// Screen placement of the fixed HUD sprites.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudLayout {
    /// Gun sprite position
    pub gun: Vec2,
    /// Crosshair sprite position
    pub crosshair: Vec2,
    /// Muzzle flash sprite position
    pub muzzle_flash: Vec2,
    /// Draw the camera position readout
    pub show_debug_text: bool,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            gun: Vec2::new(338.0, 270.0),
            crosshair: Vec2::new(338.0, 184.0),
            muzzle_flash: Vec2::new(330.0, 184.0),
            show_debug_text: true,
        }
    }
}

/// Latch that is set by a trigger press and cleared by its release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MuzzleFlash {
    firing: bool,
}

impl MuzzleFlash {
    /// Creates an idle latch.
    #[must_use]
    pub const fn new() -> Self {
        Self { firing: false }
    }

    /// Latches on a trigger press and clears on release.
    pub fn update(&mut self, input: &Input) {
        if input.fire_just_pressed {
            self.firing = true;
        }
        if input.fire_just_released {
            self.firing = false;
        }
    }

    /// Whether the flash is showing.
    #[must_use]
    pub const fn is_firing(&self) -> bool {
        self.firing
    }
}

/// Source rectangle of the health bar sprite for a given health value.
#[must_use]
pub fn health_bar_source(health: u32) -> ScreenRect {
    ScreenRect::new(0, 0, health as i32, HEALTH_BAR_HEIGHT)
}

/// Where the health bar is drawn.
#[must_use]
pub fn health_bar_position(viewport: Viewport) -> Vec2 {
    Vec2::new(
        viewport.width as f32 / 2.0 - HEALTH_BAR_CENTER_OFFSET,
        HEALTH_BAR_TOP,
    )
}

/// Camera position readout, one whole-number component per line.
#[must_use]
pub fn debug_text(camera: Vec3) -> String {
    format!("{:.0}\n{:.0}\n{:.0}", camera.x, camera.y, camera.z)
}

/// Per-frame HUD composer.
#[derive(Debug, Clone, Default)]
pub struct Hud {
    layout: HudLayout,
    viewport: Viewport,
    flash: MuzzleFlash,
}

impl Hud {
    /// Creates a HUD for a viewport.
    #[must_use]
    pub fn new(layout: HudLayout, viewport: Viewport) -> Self {
        Self {
            layout,
            viewport,
            flash: MuzzleFlash::new(),
        }
    }

    /// Feeds this frame's input to the muzzle flash.
    pub fn update(&mut self, input: &Input) {
        self.flash.update(input);
    }

    /// Targets whose health bar is on screen.
    fn health_bars(targets: &[Target]) -> impl Iterator<Item = &Target> {
        targets.iter().filter(|t| t.just_hit())
    }

    /// Builds this frame's draw list.
    #[must_use]
    pub fn compose(&self, targets: &[Target], camera: Vec3) -> Vec<DrawCommand> {
        let mut commands = vec![
            DrawCommand::Sprite {
                sprite: Sprite::Gun,
                position: self.layout.gun,
                scale: 1.0,
            },
            DrawCommand::Sprite {
                sprite: Sprite::Crosshair,
                position: self.layout.crosshair,
                scale: 1.0,
            },
        ];

        if self.flash.is_firing() {
            commands.push(DrawCommand::Sprite {
                sprite: Sprite::MuzzleFlash,
                position: self.layout.muzzle_flash,
                scale: 1.0,
            });
        }

        let bar_position = health_bar_position(self.viewport);
        for target in Self::health_bars(targets) {
            commands.push(DrawCommand::SubSprite {
                sprite: Sprite::HealthBar,
                source: health_bar_source(target.health()),
                position: bar_position,
                scale: HEALTH_BAR_SCALE,
            });
        }

        if self.layout.show_debug_text {
            commands.push(DrawCommand::DebugText(debug_text(camera)));
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatConfig, CombatTracker, DEFAULT_RETICLE};
    use crate::target::Lane;
    use ironsight_common::NodeHandle;

    fn press() -> Input {
        Input {
            fire_held: true,
            fire_just_pressed: true,
            ..Input::default()
        }
    }

    fn release() -> Input {
        Input {
            fire_just_released: true,
            ..Input::default()
        }
    }

    #[test]
    fn test_muzzle_flash_latch() {
        let mut flash = MuzzleFlash::new();
        flash.update(&press());
        assert!(flash.is_firing());

        let held = Input {
            fire_held: true,
            ..Input::default()
        };
        flash.update(&held);
        assert!(flash.is_firing());

        flash.update(&release());
        assert!(!flash.is_firing());
    }

    #[test]
    fn test_health_bar_geometry() {
        assert_eq!(health_bar_source(28), ScreenRect::new(0, 0, 28, 4));
        assert!(health_bar_source(0).is_empty());
        assert_eq!(
            health_bar_position(Viewport::new(796, 448)),
            Vec2::new(348.0, 50.0)
        );
    }

    #[test]
    fn test_debug_text_format() {
        assert_eq!(debug_text(Vec3::new(0.0, 1.0, 15.0)), "0\n1\n15");
        assert_eq!(debug_text(Vec3::new(2.6, -1.6, 14.4)), "3\n-2\n14");
    }

    #[test]
    fn test_compose_idle_frame() {
        let hud = Hud::new(HudLayout::default(), Viewport::default());
        let commands = hud.compose(&[], Vec3::ZERO);

        assert_eq!(commands.len(), 3);
        assert!(!commands.iter().any(|c| matches!(
            c,
            DrawCommand::Sprite {
                sprite: Sprite::MuzzleFlash,
                ..
            }
        )));
    }

    #[test]
    fn test_compose_after_hit() {
        let mut tracker = CombatTracker::new(CombatConfig::default(), 1);
        tracker.add_target(NodeHandle::from_index(0), 48, Lane::new(Vec3::ZERO, 1, 1));
        tracker.process_fire(true, &|_: &Target| Some(DEFAULT_RETICLE));

        let mut hud = Hud::new(HudLayout::default(), Viewport::default());
        hud.update(&press());
        let commands = hud.compose(tracker.targets(), Vec3::ZERO);

        assert!(commands.contains(&DrawCommand::Sprite {
            sprite: Sprite::MuzzleFlash,
            position: Vec2::new(330.0, 184.0),
            scale: 1.0,
        }));
        assert!(commands.contains(&DrawCommand::SubSprite {
            sprite: Sprite::HealthBar,
            source: ScreenRect::new(0, 0, 28, 4),
            position: Vec2::new(348.0, 50.0),
            scale: 2.0,
        }));
        assert_eq!(Hud::health_bars(tracker.targets()).count(), 1);
    }
}
