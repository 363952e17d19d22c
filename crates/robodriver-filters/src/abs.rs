//! Anti-Lock Braking Filter
//!
//! Scales the brake command down when the wheels under-rotate relative to
//! ground speed, which is the onset of lock-up.

use robodriver_model::{VehicleState, WheelPosition};
use serde::{Deserialize, Serialize};

/// State for the ABS filter.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
/// - O(1) time complexity
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbsState {
    /// Slip ratio below which the brake is relieved
    pub slip_threshold: f32,
    /// Ground speed (m/s) below which the filter is bypassed
    pub min_speed: f32,
}

impl AbsState {
    /// Create a new ABS filter state.
    ///
    /// # Example
    ///
    /// ```
    /// use robodriver_filters::AbsState;
    ///
    /// let state = AbsState::new(0.9, 3.0);
    /// assert!(state.min_speed > 0.0);
    /// ```
    pub fn new(slip_threshold: f32, min_speed: f32) -> Self {
        Self {
            slip_threshold,
            min_speed,
        }
    }

    /// An ABS filter that never intervenes.
    pub fn disabled() -> Self {
        Self {
            slip_threshold: 0.0,
            min_speed: f32::MAX,
        }
    }
}

impl Default for AbsState {
    fn default() -> Self {
        Self::new(0.9, 3.0)
    }
}

/// Mean ratio of wheel surface speed to ground speed over all four wheels.
///
/// Callers must guard against near-zero `vehicle.speed`.
#[inline]
pub fn average_slip(vehicle: &VehicleState) -> f32 {
    let total: f32 = WheelPosition::ALL
        .iter()
        .map(|&p| vehicle.wheel(p).surface_speed() / vehicle.speed)
        .sum();
    total / 4.0
}

/// ABS filter - relieves the brake in proportion to wheel lock-up.
///
/// Output is never larger than the input brake, and equals it when the car is
/// slower than `min_speed` or the average slip is at or above the threshold.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
/// - No syscalls or I/O
///
/// # Example
///
/// ```
/// use robodriver_filters::prelude::*;
/// use robodriver_model::prelude::*;
///
/// let vehicle = VehicleState {
///     speed: 30.0,
///     yaw: 0.0,
///     position: TrackPosition::new(SegmentId(0), 0.0, 0.0),
///     gear: 3,
///     wheels: [Wheel::new(45.0, 0.33); 4], // ~15 m/s surface speed: locking
///     redline_rpm: 1000.0,
///     gear_ratios: GearRatios::new(-3.0, vec![3.0, 2.0, 1.5]),
///     steer_lock: 0.4,
///     fuel: 0.0,
/// };
///
/// let brake = abs_filter(1.0, &vehicle, &AbsState::default());
/// assert!(brake < 1.0);
/// ```
#[inline]
pub fn abs_filter(brake: f32, vehicle: &VehicleState, state: &AbsState) -> f32 {
    if vehicle.speed < state.min_speed || !vehicle.speed.is_finite() {
        return brake;
    }

    let slip = average_slip(vehicle);
    if slip < state.slip_threshold {
        brake * slip.clamp(0.0, 1.0)
    } else {
        brake
    }
}
