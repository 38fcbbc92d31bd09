//! Single-threaded respawn timer queue.
//!
//! Timers are keyed by absolute due time on the simulation clock and kept in
//! a min-heap. Each target has at most one live timer: rescheduling or
//! cancelling bumps the target's generation, and heap entries from older
//! generations are discarded when they surface.

use ironsight_common::TargetId;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

#[derive(Debug, Clone, Copy)]
struct Entry {
    due: f64,
    target: TargetId,
    generation: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .total_cmp(&other.due)
            .then_with(|| self.target.cmp(&other.target))
            .then_with(|| self.generation.cmp(&other.generation))
    }
}

/// Pending respawns ordered by due time.
#[derive(Debug, Default)]
pub struct RespawnQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    /// Live (due, generation) per target
    live: HashMap<TargetId, (f64, u64)>,
    next_generation: u64,
}

impl RespawnQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `target` to respawn at `due`, replacing any earlier timer
    /// for the same target.
    pub fn schedule(&mut self, target: TargetId, due: f64) {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.live.insert(target, (due, generation));
        self.heap.push(Reverse(Entry {
            due,
            target,
            generation,
        }));
    }

    /// Removes and returns every target whose timer is due at `now`, earliest first.
    pub fn pop_due(&mut self, now: f64) -> Vec<TargetId> {
        let mut ready = Vec::new();
        while let Some(Reverse(entry)) = self.heap.peek().copied() {
            if entry.due > now {
                break;
            }
            self.heap.pop();
            if self.is_live(&entry) {
                self.live.remove(&entry.target);
                ready.push(entry.target);
            }
        }
        ready
    }

    /// Seconds until `target` respawns, or `None` if it has no timer.
    #[must_use]
    pub fn time_remaining(&self, target: TargetId, now: f64) -> Option<f64> {
        self.live
            .get(&target)
            .map(|(due, _)| (due - now).max(0.0))
    }

    /// Whether `target` has a live timer.
    #[must_use]
    pub fn is_pending(&self, target: TargetId) -> bool {
        self.live.contains_key(&target)
    }

    /// Number of live timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no timers are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    fn is_live(&self, entry: &Entry) -> bool {
        self.live
            .get(&entry.target)
            .is_some_and(|&(_, generation)| generation == entry.generation)
    }
}
