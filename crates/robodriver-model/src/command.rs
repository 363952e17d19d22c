//! Control command emitted once per tick.

use serde::{Deserialize, Serialize};

pub const NEUTRAL_GEAR: i32 = 0;
pub const REVERSE_GEAR: i32 = -1;

/// Driver inputs for the next simulation step.
///
/// Throttle and brake are never both non-zero once the command has been
/// through [`ControlCommand::sanitized`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlCommand {
    /// Steering, normalized to the steering lock (-1.0 to 1.0, positive left)
    pub steer: f32,
    /// Selected gear (-1 reverse, 0 neutral, 1.. forward)
    pub gear: i32,
    /// Throttle fraction (0.0 to 1.0)
    pub accel: f32,
    /// Brake fraction (0.0 to 1.0)
    pub brake: f32,
}

impl ControlCommand {
    pub fn new(steer: f32, gear: i32, accel: f32, brake: f32) -> Self {
        Self {
            steer,
            gear,
            accel,
            brake,
        }
    }

    /// Coast in neutral with the wheel centered.
    pub fn neutral() -> Self {
        Self::new(0.0, NEUTRAL_GEAR, 0.0, 0.0)
    }

    pub fn is_reverse(&self) -> bool {
        self.gear < NEUTRAL_GEAR
    }

    /// Clamp every channel into range.
    ///
    /// Non-finite values become zero. If both pedals are pressed the brake
    /// wins and the throttle is released.
    pub fn sanitized(self) -> Self {
        let unit = |v: f32, lo: f32| if v.is_finite() { v.clamp(lo, 1.0) } else { 0.0 };

        let steer = unit(self.steer, -1.0);
        let brake = unit(self.brake, 0.0);
        let accel = if brake > 0.0 {
            0.0
        } else {
            unit(self.accel, 0.0)
        };

        Self {
            steer,
            gear: self.gear,
            accel,
            brake,
        }
    }
}
