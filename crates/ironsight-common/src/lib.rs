//! # Ironsight Common
//!
//! Common types shared by every Ironsight crate:
//! - ID types (`TargetId`, `NodeHandle`)
//! - Screen-space coordinate helpers (`Viewport`, `ScreenRect`)
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_viewport_bounds_are_inclusive() {
        let viewport = Viewport::new(796, 448);
        assert!(viewport.contains(Vec2::new(0.0, 0.0)));
        assert!(viewport.contains(Vec2::new(796.0, 448.0)));
        assert!(!viewport.contains(Vec2::new(-0.5, 10.0)));
        assert!(!viewport.contains(Vec2::new(10.0, 448.5)));
    }

    #[test]
    fn test_target_id_roundtrip() {
        let id = TargetId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{id}"), "target#7");
    }
}
