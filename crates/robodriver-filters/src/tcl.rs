//! Traction Control Filter
//!
//! Cuts the throttle while the driven wheels spin faster than ground speed
//! implies. Which wheels count as driven is fixed at race start by the
//! car's [`Drivetrain`].

use robodriver_model::{Drivetrain, VehicleState};
use serde::{Deserialize, Serialize};

/// State for the traction control filter.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
/// - O(1) time complexity
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TclState {
    /// Ground-to-wheel speed ratio below which the throttle is cut
    pub slip_threshold: f32,
    /// Ground speed (m/s) below which the filter is bypassed
    pub min_speed: f32,
    /// Selects the driven-wheel speed formula
    pub drivetrain: Drivetrain,
}

impl TclState {
    /// Create a new traction control state.
    ///
    /// # Example
    ///
    /// ```
    /// use robodriver_filters::TclState;
    /// use robodriver_model::Drivetrain;
    ///
    /// let state = TclState::new(0.9, 3.0, Drivetrain::Front);
    /// assert_eq!(state.drivetrain, Drivetrain::Front);
    /// ```
    pub fn new(slip_threshold: f32, min_speed: f32, drivetrain: Drivetrain) -> Self {
        Self {
            slip_threshold,
            min_speed,
            drivetrain,
        }
    }

    /// Default thresholds for the given drivetrain.
    pub fn for_drivetrain(drivetrain: Drivetrain) -> Self {
        Self {
            drivetrain,
            ..Self::default()
        }
    }
}

impl Default for TclState {
    fn default() -> Self {
        Self::new(0.9, 3.0, Drivetrain::Rear)
    }
}

/// Ratio of ground speed to driven-wheel surface speed.
///
/// Returns `None` when the driven wheels are not turning forward, where no
/// wheelspin is possible.
#[inline]
pub fn traction_slip(vehicle: &VehicleState, drivetrain: Drivetrain) -> Option<f32> {
    let driven = drivetrain.driven_wheel_speed(&vehicle.wheels);
    (driven > 0.0).then(|| vehicle.speed / driven)
}

/// Traction control filter - all-or-nothing throttle cut on wheelspin.
///
/// The output is either `accel` unchanged or `0.0`; it never scales.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
/// - No syscalls or I/O
#[inline]
pub fn tcl_filter(accel: f32, vehicle: &VehicleState, state: &TclState) -> f32 {
    if vehicle.speed < state.min_speed || !vehicle.speed.is_finite() {
        return accel;
    }

    match traction_slip(vehicle, state.drivetrain) {
        Some(slip) if slip < state.slip_threshold => 0.0,
        _ => accel,
    }
}
