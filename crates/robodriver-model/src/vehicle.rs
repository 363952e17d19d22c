//! Per-tick vehicle snapshot supplied by the host simulation.

use serde::{Deserialize, Serialize};

use crate::track::SegmentId;

/// Wheel slots in host order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelPosition {
    FrontRight = 0,
    FrontLeft = 1,
    RearRight = 2,
    RearLeft = 3,
}

impl WheelPosition {
    pub const ALL: [WheelPosition; 4] = [
        WheelPosition::FrontRight,
        WheelPosition::FrontLeft,
        WheelPosition::RearRight,
        WheelPosition::RearLeft,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Spin state of a single wheel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wheel {
    /// Angular velocity in rad/s
    pub spin_vel: f32,
    /// Rolling radius in meters
    pub radius: f32,
}

impl Wheel {
    pub fn new(spin_vel: f32, radius: f32) -> Self {
        Self { spin_vel, radius }
    }

    /// Surface speed of the tire, m/s.
    pub fn surface_speed(&self) -> f32 {
        self.spin_vel * self.radius
    }
}

/// Gear ratio table.
///
/// Forward gears are numbered from 1; `-1` is reverse and `0` neutral,
/// which has no ratio.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GearRatios {
    #[serde(default)]
    pub reverse: f32,
    pub forward: Vec<f32>,
}

impl GearRatios {
    pub fn new(reverse: f32, forward: Vec<f32>) -> Self {
        Self { reverse, forward }
    }

    /// Ratio for `gear`, or `None` for neutral and gears outside the table.
    pub fn ratio(&self, gear: i32) -> Option<f32> {
        match gear {
            -1 => Some(self.reverse),
            g if g >= 1 => {
                let index = usize::try_from(g).ok()?.checked_sub(1)?;
                self.forward.get(index).copied()
            }
            _ => None,
        }
    }

    /// Highest forward gear.
    pub fn top_gear(&self) -> i32 {
        i32::try_from(self.forward.len()).unwrap_or(i32::MAX)
    }
}

/// Where the car is relative to the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPosition {
    pub segment: SegmentId,
    /// Progress into the segment: meters on a straight, radians on a curve
    pub to_start: f32,
    /// Lateral offset from the centerline, positive to the left
    pub to_middle: f32,
}

impl TrackPosition {
    pub fn new(segment: SegmentId, to_start: f32, to_middle: f32) -> Self {
        Self {
            segment,
            to_start,
            to_middle,
        }
    }
}

/// Read-only dynamic state for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Longitudinal speed, m/s
    pub speed: f32,
    /// Heading in world frame, radians
    pub yaw: f32,
    pub position: TrackPosition,
    pub gear: i32,
    pub wheels: [Wheel; 4],
    /// Engine redline, rad/s
    pub redline_rpm: f32,
    pub gear_ratios: GearRatios,
    /// Maximum steering angle, radians
    pub steer_lock: f32,
    /// Fuel on board, kg
    #[serde(default)]
    pub fuel: f32,
}

impl VehicleState {
    pub fn wheel(&self, position: WheelPosition) -> Wheel {
        self.wheels
            .get(position.index())
            .copied()
            .unwrap_or_default()
    }

    /// Ratio of the gear currently engaged.
    pub fn current_ratio(&self) -> Option<f32> {
        self.gear_ratios.ratio(self.gear)
    }

    /// Radius used for engine-speed and gearbox estimates.
    pub fn drive_wheel_radius(&self) -> f32 {
        self.wheel(WheelPosition::RearRight).radius
    }
}
