//! Stuck detection
//!
//! A car is a recovery candidate while it is slow, far off the centerline and
//! pointing well away from the track direction. After enough consecutive
//! candidate ticks, and only if it is also facing further off track, it is
//! reported stuck. Any non-candidate tick clears the count.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::params::{DriverParams, RaceConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StuckState {
    #[default]
    Normal,
    Stuck,
}

impl StuckState {
    pub fn is_stuck(self) -> bool {
        matches!(self, StuckState::Stuck)
    }
}

/// Per-vehicle stuck counter.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
#[derive(Debug, Clone, PartialEq)]
pub struct StuckDetector {
    angle_limit: f32,
    max_speed: f32,
    min_distance: f32,
    max_ticks: u32,
    counter: u32,
    state: StuckState,
}

impl StuckDetector {
    pub fn new(angle_limit: f32, max_speed: f32, min_distance: f32, max_ticks: u32) -> Self {
        Self {
            angle_limit,
            max_speed,
            min_distance,
            max_ticks,
            counter: 0,
            state: StuckState::Normal,
        }
    }

    pub fn from_params(params: &DriverParams, race: &RaceConfig) -> Self {
        Self::new(
            params.unstuck_angle(),
            params.max_unstuck_speed,
            params.min_unstuck_distance,
            race.ticks_in(params.unstuck_time_limit),
        )
    }

    /// Evaluate one tick.
    ///
    /// `heading_error` is track tangent minus car yaw, `to_middle` the lateral
    /// offset (positive left).
    pub fn update(&mut self, heading_error: f32, speed: f32, to_middle: f32) -> StuckState {
        let candidate = heading_error.abs() > self.angle_limit
            && speed < self.max_speed
            && to_middle.abs() > self.min_distance;

        let state = if !candidate {
            self.counter = 0;
            StuckState::Normal
        } else if self.counter > self.max_ticks && to_middle * heading_error < 0.0 {
            StuckState::Stuck
        } else {
            self.counter = self.counter.saturating_add(1);
            StuckState::Normal
        };

        if state != self.state {
            debug!(
                ?state,
                counter = self.counter,
                heading_error,
                to_middle,
                "stuck state changed"
            );
            self.state = state;
        }
        state
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    pub fn state(&self) -> StuckState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 60 degrees off to the right of the track direction, 5 m left of center
    const HEADING: f32 = -1.05;
    const OFFSET: f32 = 5.0;

    fn detector(max_ticks: u32) -> StuckDetector {
        StuckDetector::new(30f32.to_radians(), 5.0, 3.0, max_ticks)
    }

    #[test]
    fn test_stuck_after_limit_plus_one() {
        let mut stuck = detector(3);
        for _ in 0..4 {
            assert_eq!(stuck.update(HEADING, 1.0, OFFSET), StuckState::Normal);
        }
        assert_eq!(stuck.counter(), 4);
        assert_eq!(stuck.update(HEADING, 1.0, OFFSET), StuckState::Stuck);
        assert_eq!(stuck.update(HEADING, 1.0, OFFSET), StuckState::Stuck);
    }

    #[test]
    fn test_counter_freezes_while_stuck() {
        let mut stuck = detector(0);
        stuck.update(HEADING, 0.0, OFFSET);
        assert!(stuck.update(HEADING, 0.0, OFFSET).is_stuck());
        assert_eq!(stuck.counter(), 1);
    }

    #[test]
    fn test_resets_when_aligned() {
        let mut stuck = detector(1);
        for _ in 0..3 {
            stuck.update(HEADING, 0.0, OFFSET);
        }
        assert!(stuck.state().is_stuck());

        assert_eq!(stuck.update(0.1, 0.0, OFFSET), StuckState::Normal);
        assert_eq!(stuck.counter(), 0);
    }

    #[test]
    fn test_facing_back_toward_track_is_not_stuck() {
        // Same offset, but pointing back toward the centerline
        let mut stuck = detector(1);
        for _ in 0..10 {
            assert_eq!(stuck.update(-HEADING, 0.0, OFFSET), StuckState::Normal);
        }
        assert_eq!(stuck.counter(), 10);
    }

    #[test]
    fn test_fast_or_centered_is_not_candidate() {
        let mut stuck = detector(0);
        stuck.update(HEADING, 0.0, OFFSET);
        stuck.update(HEADING, 20.0, OFFSET);
        assert_eq!(stuck.counter(), 0);
        stuck.update(HEADING, 0.0, OFFSET);
        stuck.update(HEADING, 0.0, 1.0);
        assert_eq!(stuck.counter(), 0);
    }

    #[test]
    fn test_from_default_params() {
        let stuck = StuckDetector::from_params(&DriverParams::default(), &RaceConfig::default());
        assert_eq!(stuck.max_ticks(), 100);
    }
}
