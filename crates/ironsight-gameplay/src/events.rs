//! Event bus for combat notifications.
//!
//! The combat tracker publishes what happened each frame; audio, logging and
//! the HUD drain the bus once per frame.

use crossbeam_channel::{bounded, Receiver, Sender};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use ironsight_common::TargetId;

/// Things the combat tracker reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// The trigger was pulled (once per rising edge)
    ShotFired,
    /// A target was inside the hit radius
    TargetHit {
        /// Target that was hit
        target: TargetId,
        /// Health left after the hit
        remaining: u32,
    },
    /// A target was on screen but outside the hit radius
    TargetMissed {
        /// Target that was missed
        target: TargetId,
    },
    /// A target reached zero health and was hidden
    TargetDied {
        /// Target that died
        target: TargetId,
        /// Simulation time at which it comes back
        respawn_at: f64,
    },
    /// A target came back
    TargetRespawned {
        /// Target that respawned
        target: TargetId,
        /// Where it reappeared
        position: Vec3,
    },
}

/// Event bus for broadcasting events to subscribers.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for broadcasting events
    sender: Sender<CombatEvent>,
    /// Receiver for collecting events
    receiver: Receiver<CombatEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: CombatEvent) {
        // Non-blocking send - if full, event is dropped
        if self.sender.try_send(event).is_err() {
            tracing::warn!("combat event bus full, dropping event");
        }
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<CombatEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}
