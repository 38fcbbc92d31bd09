//! Frame pacing for the fixed-rate simulation.
//!
//! Gameplay always advances in whole frames of `1 / target_fps` seconds.
//! When pacing is on, the loop measures wall-clock time, turns it into a
//! number of frames to simulate and sleeps off the rest of the budget.

use std::time::{Duration, Instant};

/// Most frames simulated for one wall-clock step.
const MAX_CATCH_UP_FRAMES: u32 = 10;

/// Turns wall-clock time into whole simulated frames.
#[derive(Debug)]
pub struct FrameTiming {
    /// Wall-clock length of one frame
    frame_budget: Duration,
    /// When the current frame started
    last_frame: Instant,
    /// Wall-clock time not yet simulated
    accumulator: f32,
    /// Simulated seconds per frame
    fixed_dt: f32,
    /// Longest wall-clock step taken into account
    max_dt: f32,
    /// Sleep off the frame budget
    paced: bool,
}

impl FrameTiming {
    /// Frames of `1 / target_fps` seconds, paced by default.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            frame_budget: Duration::from_secs_f64(1.0 / f64::from(target_fps)),
            last_frame: Instant::now(),
            accumulator: 0.0,
            fixed_dt: 1.0 / target_fps as f32,
            max_dt: 0.25,
            paced: true,
        }
    }

    /// Enable or disable wall-clock pacing.
    #[must_use]
    pub fn with_pacing(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }

    /// Whether frames are paced to wall-clock time.
    #[must_use]
    pub fn is_paced(&self) -> bool {
        self.paced
    }

    /// Simulated seconds per frame.
    #[must_use]
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Wall-clock seconds since the previous call, clamped to `max_dt`.
    pub fn delta_time(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt.min(self.max_dt)
    }

    /// Adds wall-clock time and returns how many frames to simulate.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;
        let mut count = 0;

        while self.accumulator >= self.fixed_dt && count < MAX_CATCH_UP_FRAMES {
            self.accumulator -= self.fixed_dt;
            count += 1;
        }

        // Still behind: drop the backlog
        if self.accumulator > self.fixed_dt * 2.0 {
            self.accumulator = 0.0;
        }

        count
    }

    /// Blocks until the current frame's budget is used up. No-op unpaced.
    pub fn sleep_remainder(&self) {
        if !self.paced {
            return;
        }
        if let Some(remaining) = self.frame_budget.checked_sub(self.last_frame.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    /// Restarts the clock and drops any backlog. Call once loading is done.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_timing_creation() {
        let timing = FrameTiming::new(60);
        assert!((timing.fixed_dt() - 1.0 / 60.0).abs() < 0.001);
        assert!(timing.is_paced());
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        let timing = FrameTiming::new(0);
        assert!((timing.fixed_dt() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_fixed_dt_follows_rate() {
        let timing = FrameTiming::new(30);
        assert!((timing.fixed_dt() - 1.0 / 30.0).abs() < 0.001);
    }

    #[test]
    fn test_frame_timing_max_dt() {
        let mut timing = FrameTiming::new(60);

        std::thread::sleep(Duration::from_millis(300));
        let dt = timing.delta_time();

        assert!(dt <= timing.max_dt);
    }

    #[test]
    fn test_fixed_timestep() {
        let mut timing = FrameTiming::new(60);

        // 32ms of wall time is one or two frames
        let updates = timing.accumulate(0.032);
        assert!(updates == 1 || updates == 2);
    }

    #[test]
    fn test_accumulate_spiral_prevention() {
        let mut timing = FrameTiming::new(60);

        let updates = timing.accumulate(1.0);

        assert!(updates <= MAX_CATCH_UP_FRAMES);
        assert_eq!(timing.accumulator, 0.0);
    }

    #[test]
    fn test_unpaced_sleep_returns_immediately() {
        let timing = FrameTiming::new(1).with_pacing(false);
        let start = Instant::now();
        timing.sleep_remainder();
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_reset_drops_backlog() {
        let mut timing = FrameTiming::new(60);
        timing.accumulator = 0.01;

        timing.reset();

        assert_eq!(timing.accumulate(0.01), 0);
    }

    #[test]
    fn test_paced_sleep_fills_budget() {
        let mut timing = FrameTiming::new(50);
        timing.reset();
        timing.sleep_remainder();
        assert!(timing.delta_time() >= 0.019);
    }
}
