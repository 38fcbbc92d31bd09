//! # Ironsight Gameplay
//!
//! Gameplay systems for Ironsight.
//!
//! This crate is the CPU-side game state, independent of any window, GPU or
//! audio device:
//! - Combat state tracking (reticle hit tests, damage, deaths)
//! - Enemy targets and their spawn lanes
//! - Respawn timer queue on the simulation clock
//! - Input edge tracking and action bindings
//! - First-person player controller
//! - HUD draw-list composition
//! - Event bus for combat notifications

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod combat;
pub mod events;
pub mod hud;
pub mod input;
pub mod player;
pub mod respawn;
pub mod target;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::combat::*;
    pub use crate::events::*;
    pub use crate::hud::*;
    pub use crate::input::*;
    pub use crate::player::*;
    pub use crate::respawn::*;
    pub use crate::target::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use ironsight_common::NodeHandle;

    #[test]
    fn test_fire_edge_drives_single_hit() {
        let mut tracker = CombatTracker::new(CombatConfig::default(), 3);
        let id = tracker.add_target(
            NodeHandle::from_index(0),
            48,
            Lane::new(Vec3::new(21.0, 1.0, -9.0), 10, 3),
        )
        .expect("room for a target");
        let mut input = InputManager::new();
        let projection = |_: &Target| Some(Vec2::new(338.0, 184.0));

        let held = RawInput::at(0.0, 0.0).with_button(MouseButton::Left);
        for _ in 0..5 {
            input.apply(&held);
            let frame = input.process();
            tracker.process_fire(frame.fire_just_pressed, &projection);
            tracker.check_deaths();
            input.end_frame();
        }

        assert_eq!(tracker.target(id).map(Target::health), Some(28));
    }

    #[test]
    fn test_player_and_hud_debug_text() {
        let player = Player::default();
        assert_eq!(debug_text(player.position()), "0\n1\n15");
    }
}
