//! ID types for targets and scene nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for an enemy target slot.
///
/// Target slots are created once per session and never destroyed, so the raw
/// value doubles as the slot's position in the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(u16);

impl TargetId {
    /// Creates a target ID from a raw value.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// Handle into the scene-node arena.
///
/// Resolved once when the scene is built; per-frame code never looks nodes up
/// by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle(u32);

impl NodeHandle {
    /// Creates a handle from an arena index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
