//! Combat state tracking for the shooting range.
//!
//! This module owns every enemy target and answers, once per frame:
//! - whether the trigger pull hit anything (screen-space proximity to the reticle)
//! - which targets died and must be hidden
//! - which hidden targets are due to come back
//!
//! Hit testing is purely 2D: a target's projected screen position is compared
//! against a fixed reticle point. Respawn delays run on the tracker's own
//! simulation clock, advanced by [`CombatTracker::tick_respawns`].

use glam::Vec2;
use ironsight_common::{NodeHandle, TargetId, Viewport};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::events::{CombatEvent, EventBus};
use crate::respawn::RespawnQueue;
use crate::target::{Lane, Target};

/// Reticle position on the reference 796x448 screen.
pub const DEFAULT_RETICLE: Vec2 = Vec2::new(338.0, 184.0);

/// Screen-space hit radius around the reticle.
pub const DEFAULT_HIT_RADIUS: f32 = 50.0;

/// Health removed by one hit.
pub const DEFAULT_DAMAGE: u32 = 20;

/// Seconds a dead target stays hidden.
pub const DEFAULT_RESPAWN_DELAY: f32 = 2.0;

/// Most targets one tracker can hold; every id must fit a [`TargetId`].
pub const MAX_TARGETS: usize = u16::MAX as usize + 1;

/// Tuning for the combat tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Reticle point in screen coordinates
    pub reticle: Vec2,
    /// Hits land strictly inside this distance from the reticle
    pub hit_radius: f32,
    /// Health removed per hit
    pub damage: u32,
    /// Respawn delay in simulated seconds
    pub respawn_delay: f32,
    /// Screen bounds a target must project into to be eligible
    pub viewport: Viewport,
}

impl CombatConfig {
    /// Whether a screen point lies strictly inside the hit radius.
    #[must_use]
    pub fn is_on_reticle(&self, point: Vec2) -> bool {
        point.distance(self.reticle) < self.hit_radius
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            reticle: DEFAULT_RETICLE,
            hit_radius: DEFAULT_HIT_RADIUS,
            damage: DEFAULT_DAMAGE,
            respawn_delay: DEFAULT_RESPAWN_DELAY,
            viewport: Viewport::default(),
        }
    }
}

/// Projects a target to screen space.
///
/// `None` means the target cannot be placed on screen this frame (behind the
/// camera, degenerate viewport).
pub trait ScreenProjection {
    /// Screen position of `target`.
    fn screen_position(&self, target: &Target) -> Option<Vec2>;
}

impl<F> ScreenProjection for F
where
    F: Fn(&Target) -> Option<Vec2>,
{
    fn screen_position(&self, target: &Target) -> Option<Vec2> {
        self(target)
    }
}

/// What one trigger pull did to one visible target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Inside the hit radius
    Hit {
        /// Health left after the hit
        remaining: u32,
    },
    /// On screen but outside the hit radius
    Miss,
    /// Projected outside the viewport; not eligible
    OffScreen,
}

/// Result of [`CombatTracker::process_fire`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireReport {
    /// Whether a shot was fired this frame
    pub fired: bool,
    /// Outcome per visible target, in tracker order
    pub outcomes: Vec<(TargetId, ShotOutcome)>,
}

impl FireReport {
    /// Number of targets hit.
    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ShotOutcome::Hit { .. }))
            .count()
    }

    /// Outcome for a given target, if it was visible.
    #[must_use]
    pub fn outcome(&self, target: TargetId) -> Option<ShotOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| *id == target)
            .map(|(_, outcome)| *outcome)
    }
}

/// Owns the enemy targets and their lifecycle.
#[derive(Debug)]
pub struct CombatTracker {
    config: CombatConfig,
    targets: Vec<Target>,
    respawns: RespawnQueue,
    /// Simulated seconds since the session started
    clock: f64,
    rng: fastrand::Rng,
    events: EventBus,
}

impl CombatTracker {
    /// Creates an empty tracker. `seed` drives spawn jitter.
    #[must_use]
    pub fn new(config: CombatConfig, seed: u64) -> Self {
        Self {
            config,
            targets: Vec::new(),
            respawns: RespawnQueue::new(),
            clock: 0.0,
            rng: fastrand::Rng::with_seed(seed),
            events: EventBus::default(),
        }
    }

    /// Adds a target at full health standing at its lane base.
    ///
    /// Returns `None` once the tracker holds [`MAX_TARGETS`].
    pub fn add_target(
        &mut self,
        node: NodeHandle,
        max_health: u32,
        lane: Lane,
    ) -> Option<TargetId> {
        let id = TargetId::new(u16::try_from(self.targets.len()).ok()?);
        self.targets.push(Target::new(id, node, max_health, lane));
        debug!(target_id = %id, max_health, "target added");
        Some(id)
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// All targets, in creation order.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Looks up a target.
    #[must_use]
    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.raw() as usize)
    }

    /// Simulation clock in seconds.
    #[must_use]
    pub const fn now(&self) -> f64 {
        self.clock
    }

    /// Seconds until a hidden target returns.
    #[must_use]
    pub fn respawn_time_remaining(&self, id: TargetId) -> Option<f64> {
        self.respawns.time_remaining(id, self.clock)
    }

    /// Events published since the last drain.
    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    /// Turns every visible target toward the camera.
    pub fn face_camera(&mut self, camera_yaw: f32) {
        for target in self.targets.iter_mut().filter(|t| t.is_visible()) {
            target.face_camera(camera_yaw);
        }
    }

    /// Resolves a trigger pull.
    ///
    /// `fire_pressed` must be the rising edge of the trigger. When it is
    /// false nothing is touched. Otherwise every visible target projected
    /// inside the viewport is tested: a hit deals damage and sets
    /// `just_hit`, a miss clears it. Off-screen targets keep whatever
    /// `just_hit` they had.
    pub fn process_fire<P: ScreenProjection>(
        &mut self,
        fire_pressed: bool,
        projection: &P,
    ) -> FireReport {
        if !fire_pressed {
            return FireReport::default();
        }

        self.events.publish(CombatEvent::ShotFired);
        let mut report = FireReport {
            fired: true,
            outcomes: Vec::with_capacity(self.targets.len()),
        };

        let config = self.config;

        for target in self.targets.iter_mut().filter(|t| t.is_visible()) {
            let id = target.id();
            let outcome = match projection.screen_position(target) {
                Some(point) if config.viewport.contains(point) => {
                    if config.is_on_reticle(point) {
                        let remaining = target.apply_damage(config.damage);
                        target.set_just_hit(true);
                        debug!(target_id = %id, remaining, "target hit");
                        self.events
                            .publish(CombatEvent::TargetHit { target: id, remaining });
                        ShotOutcome::Hit { remaining }
                    } else {
                        target.set_just_hit(false);
                        debug!(target_id = %id, "target missed");
                        self.events.publish(CombatEvent::TargetMissed { target: id });
                        ShotOutcome::Miss
                    }
                }
                _ => ShotOutcome::OffScreen,
            };
            report.outcomes.push((id, outcome));
        }

        report
    }

    /// Hides every visible target at zero health and schedules its respawn.
    ///
    /// Returns the targets that died. A hidden target never re-triggers.
    pub fn check_deaths(&mut self) -> Vec<TargetId> {
        let due = self.clock + f64::from(self.config.respawn_delay);
        let mut died = Vec::new();

        for target in self
            .targets
            .iter_mut()
            .filter(|t| t.is_visible() && t.health() == 0)
        {
            target.retire();
            self.respawns.schedule(target.id(), due);
            info!(target_id = %target.id(), respawn_at = due, "target down");
            self.events.publish(CombatEvent::TargetDied {
                target: target.id(),
                respawn_at: due,
            });
            died.push(target.id());
        }

        died
    }

    /// Advances the simulation clock and revives every target whose delay
    /// has elapsed at a fresh spot in its lane.
    pub fn tick_respawns(&mut self, elapsed: f32) -> Vec<TargetId> {
        self.clock += f64::from(elapsed.max(0.0));
        let ready = self.respawns.pop_due(self.clock);

        for &id in &ready {
            let Some(target) = self.targets.get_mut(id.raw() as usize) else {
                continue;
            };
            let position = target.lane().spawn_point(&mut self.rng);
            target.revive(position);
            info!(target_id = %id, x = position.x, z = position.z, "target respawned");
            self.events
                .publish(CombatEvent::TargetRespawned { target: id, position });
        }

        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    fn tracker_with(count: usize, max_health: u32) -> CombatTracker {
        let mut tracker = CombatTracker::new(CombatConfig::default(), 42);
        for i in 0..count {
            tracker.add_target(
                NodeHandle::from_index(i),
                max_health,
                Lane::new(Vec3::new(20.0 + i as f32, 1.0, -9.0), 10, 3),
            );
        }
        tracker
    }

    fn at(point: Vec2) -> impl Fn(&Target) -> Option<Vec2> {
        move |_| Some(point)
    }

    fn on_reticle() -> impl Fn(&Target) -> Option<Vec2> {
        at(DEFAULT_RETICLE)
    }

    const A: TargetId = TargetId::new(0);
    const B: TargetId = TargetId::new(1);

    #[test]
    fn test_combat_config_default() {
        let config = CombatConfig::default();
        assert_eq!(config.reticle, Vec2::new(338.0, 184.0));
        assert_eq!(config.hit_radius, 50.0);
        assert_eq!(config.damage, 20);
        assert_eq!(config.viewport, Viewport::new(796, 448));
    }

    #[test]
    fn test_config_reticle_radius_is_strict() {
        let config = CombatConfig::default();
        assert!(config.is_on_reticle(DEFAULT_RETICLE));
        assert!(config.is_on_reticle(DEFAULT_RETICLE + Vec2::new(49.9, 0.0)));
        assert!(!config.is_on_reticle(DEFAULT_RETICLE + Vec2::new(0.0, 50.0)));
    }

    #[test]
    fn test_add_target_stops_at_id_limit() {
        let mut tracker = CombatTracker::new(CombatConfig::default(), 1);
        let lane = Lane::new(Vec3::ZERO, 1, 1);
        let mut last = None;
        for i in 0..MAX_TARGETS {
            last = tracker.add_target(NodeHandle::from_index(i), 10, lane);
        }

        assert_eq!(last, Some(TargetId::new(u16::MAX)));
        assert_eq!(tracker.add_target(NodeHandle::from_index(0), 10, lane), None);
        assert_eq!(tracker.targets().len(), MAX_TARGETS);
    }

    #[test]
    fn test_hit_on_reticle() {
        let mut tracker = tracker_with(1, 48);
        let report = tracker.process_fire(true, &on_reticle());

        assert!(report.fired);
        assert_eq!(report.outcome(A), Some(ShotOutcome::Hit { remaining: 28 }));
        assert!(tracker.target(A).is_some_and(Target::just_hit));
    }

    #[test]
    fn test_exactly_at_radius_is_miss() {
        let mut tracker = tracker_with(1, 48);
        let report = tracker.process_fire(true, &at(Vec2::new(388.0, 184.0)));

        assert_eq!(report.outcome(A), Some(ShotOutcome::Miss));
        assert_eq!(tracker.target(A).map(Target::health), Some(48));
    }

    #[test]
    fn test_just_inside_radius_is_hit() {
        let mut tracker = tracker_with(1, 48);
        let report = tracker.process_fire(true, &at(Vec2::new(387.9, 184.0)));
        assert_eq!(report.hit_count(), 1);
    }

    #[test]
    fn test_no_fire_no_mutation() {
        let mut tracker = tracker_with(2, 48);
        let report = tracker.process_fire(false, &on_reticle());

        assert!(!report.fired);
        assert!(report.outcomes.is_empty());
        assert!(tracker.targets().iter().all(|t| t.health() == 48));
        assert_eq!(tracker.events().pending_count(), 0);
    }

    #[test]
    fn test_off_screen_target_is_ineligible() {
        let mut tracker = tracker_with(1, 48);
        tracker.process_fire(true, &on_reticle());

        // Reticle-adjacent but outside the viewport: neither hit nor cleared
        let report = tracker.process_fire(true, &at(Vec2::new(-1.0, 184.0)));
        assert_eq!(report.outcome(A), Some(ShotOutcome::OffScreen));
        let target = tracker.target(A).cloned();
        assert_eq!(target.as_ref().map(Target::health), Some(28));
        assert!(target.is_some_and(|t| t.just_hit()));
    }

    #[test]
    fn test_unprojectable_target_is_ineligible() {
        let mut tracker = tracker_with(1, 48);
        let report = tracker.process_fire(true, &|_: &Target| None);
        assert_eq!(report.outcome(A), Some(ShotOutcome::OffScreen));
        assert_eq!(tracker.target(A).map(Target::health), Some(48));
    }

    #[test]
    fn test_just_hit_persists_until_missed_fire() {
        let mut tracker = tracker_with(1, 100);
        tracker.process_fire(true, &on_reticle());

        for _ in 0..30 {
            tracker.process_fire(false, &on_reticle());
            tracker.check_deaths();
            tracker.tick_respawns(1.0 / 60.0);
        }
        assert!(tracker.target(A).is_some_and(Target::just_hit));

        tracker.process_fire(true, &at(Vec2::new(700.0, 400.0)));
        assert!(tracker.target(A).is_some_and(|t| !t.just_hit()));
    }

    #[test]
    fn test_one_audio_cue_per_shot() {
        let mut tracker = tracker_with(2, 48);
        tracker.process_fire(true, &on_reticle());

        let shots = tracker
            .events()
            .drain()
            .into_iter()
            .filter(|e| *e == CombatEvent::ShotFired)
            .count();
        assert_eq!(shots, 1);
    }

    #[test]
    fn test_lethal_hit_hides_and_schedules() {
        let mut tracker = tracker_with(1, 20);
        tracker.process_fire(true, &on_reticle());
        assert_eq!(tracker.target(A).map(Target::health), Some(0));

        let died = tracker.check_deaths();
        assert_eq!(died, vec![A]);
        let target = tracker.target(A).cloned();
        assert!(target.as_ref().is_some_and(|t| !t.is_visible()));
        assert_eq!(target.as_ref().map(Target::health), Some(20));
        assert!(target.is_some_and(|t| !t.just_hit()));
        assert_eq!(tracker.respawn_time_remaining(A), Some(2.0));

        // Hidden: excluded from fire, and a second check does not reschedule
        let report = tracker.process_fire(true, &on_reticle());
        assert!(report.outcome(A).is_none());
        assert!(tracker.check_deaths().is_empty());
    }

    #[test]
    fn test_respawn_after_delay() {
        let mut tracker = tracker_with(1, 20);
        tracker.process_fire(true, &on_reticle());
        tracker.check_deaths();

        // 119 frames at 60 Hz is just under two seconds
        for _ in 0..119 {
            assert!(tracker.tick_respawns(1.0 / 60.0).is_empty());
        }
        assert!(tracker.target(A).is_some_and(|t| !t.is_visible()));

        let mut respawned = Vec::new();
        for _ in 0..2 {
            respawned.extend(tracker.tick_respawns(1.0 / 60.0));
        }
        assert_eq!(respawned, vec![A]);

        let target = tracker.target(A).cloned().expect("target exists");
        assert!(target.is_visible());
        assert_eq!(target.health(), target.max_health());
        assert!(!target.just_hit());
        assert!(target.lane().contains(target.position()));
        assert_eq!(target.rotation(), glam::Quat::IDENTITY);
    }

    #[test]
    fn test_independent_respawn_timers() {
        let mut tracker = tracker_with(2, 20);
        let only_a = |t: &Target| {
            if t.id() == A {
                Some(DEFAULT_RETICLE)
            } else {
                Some(Vec2::new(10.0, 10.0))
            }
        };
        let only_b = |t: &Target| {
            if t.id() == B {
                Some(DEFAULT_RETICLE)
            } else {
                Some(Vec2::new(10.0, 10.0))
            }
        };

        tracker.process_fire(true, &only_a);
        tracker.check_deaths();
        tracker.tick_respawns(1.0);

        tracker.process_fire(true, &only_b);
        tracker.check_deaths();

        assert_eq!(tracker.respawn_time_remaining(A), Some(1.0));
        assert_eq!(tracker.respawn_time_remaining(B), Some(2.0));

        assert_eq!(tracker.tick_respawns(1.0), vec![A]);
        assert_eq!(tracker.respawn_time_remaining(B), Some(1.0));
        assert_eq!(tracker.tick_respawns(1.0), vec![B]);
    }

    #[test]
    fn test_events_for_kill_cycle() {
        let mut tracker = tracker_with(1, 20);
        tracker.process_fire(true, &on_reticle());
        tracker.check_deaths();
        tracker.tick_respawns(2.0);

        let events = tracker.events().drain();
        assert_eq!(events[0], CombatEvent::ShotFired);
        assert_eq!(
            events[1],
            CombatEvent::TargetHit {
                target: A,
                remaining: 0
            }
        );
        assert!(matches!(events[2], CombatEvent::TargetDied { target: A, .. }));
        assert!(matches!(
            events[3],
            CombatEvent::TargetRespawned { target: A, .. }
        ));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Fire(Vec<(f32, f32)>),
        Idle,
        Tick(f32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            prop::collection::vec((-100.0f32..900.0, -100.0f32..550.0), 2)
                .prop_map(Op::Fire),
            Just(Op::Idle),
            (0.0f32..1.5).prop_map(Op::Tick),
        ]
    }

    proptest! {
        #[test]
        fn prop_health_and_phase_invariants(
            max_health in 1u32..120,
            ops in prop::collection::vec(op_strategy(), 1..200),
        ) {
            let mut tracker = tracker_with(2, max_health);

            for op in ops {
                match op {
                    Op::Fire(points) => {
                        let projection = |t: &Target| {
                            points
                                .get(t.id().raw() as usize)
                                .map(|&(x, y)| Vec2::new(x, y))
                        };
                        tracker.process_fire(true, &projection);
                    }
                    Op::Idle => {
                        tracker.process_fire(false, &on_reticle());
                    }
                    Op::Tick(dt) => {
                        tracker.tick_respawns(dt);
                    }
                }
                tracker.check_deaths();

                for target in tracker.targets() {
                    prop_assert!(target.health() <= target.max_health());
                    // Hidden exactly when a respawn is pending
                    prop_assert_eq!(
                        !target.is_visible(),
                        tracker.respawns.is_pending(target.id())
                    );
                    if target.is_visible() {
                        prop_assert!(target.health() > 0);
                    } else {
                        prop_assert!(!target.just_hit());
                    }
                }
            }
        }

        #[test]
        fn prop_held_trigger_damages_once(frames in 1usize..120) {
            let mut tracker = tracker_with(2, 100);
            for frame in 0..frames {
                // Only the first frame of a held trigger is a rising edge
                tracker.process_fire(frame == 0, &on_reticle());
                tracker.check_deaths();
            }
            for target in tracker.targets() {
                prop_assert_eq!(target.health(), 80);
            }
        }
    }
}
