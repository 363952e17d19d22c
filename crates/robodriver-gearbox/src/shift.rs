//! Automatic shift logic

use robodriver_model::VehicleState;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FIRST_GEAR, GearSelection, GearboxError, GearboxResult};

/// Redline-based up/down shift rule with a hysteresis band.
///
/// Shifts up once ground speed passes `shift_threshold` of the redline
/// speed in the current gear. Shifts down only when the redline speed of the
/// gear below, scaled the same way, is more than `shift_margin` above
/// ground speed. The gap between the two triggers keeps repeated ticks at a
/// constant speed from hunting between gears.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gearbox {
    pub shift_threshold: f32,
    pub shift_margin: f32,
}

impl Default for Gearbox {
    fn default() -> Self {
        Self {
            shift_threshold: 0.9,
            shift_margin: 4.0,
        }
    }
}

impl Gearbox {
    pub fn new(shift_threshold: f32, shift_margin: f32) -> GearboxResult<Self> {
        if !(shift_threshold.is_finite() && shift_threshold > 0.0 && shift_threshold <= 1.0) {
            return Err(GearboxError::InvalidThreshold(shift_threshold));
        }
        if !(shift_margin.is_finite() && shift_margin >= 0.0) {
            return Err(GearboxError::InvalidMargin(shift_margin));
        }
        Ok(Self {
            shift_threshold,
            shift_margin,
        })
    }

    /// Ground speed at which `gear` reaches the shift point.
    ///
    /// `None` for gears without a positive ratio.
    pub fn shift_speed(&self, vehicle: &VehicleState, gear: i32) -> Option<f32> {
        let ratio = vehicle.gear_ratios.ratio(gear).filter(|r| *r > 0.0)?;
        let omega = vehicle.redline_rpm / ratio;
        Some(omega * vehicle.drive_wheel_radius() * self.shift_threshold)
    }

    /// Pick the gear for this tick. At most one step, up or down.
    pub fn select(&self, vehicle: &VehicleState) -> GearSelection {
        let gear = vehicle.gear;
        if gear < FIRST_GEAR {
            return GearSelection::engage();
        }

        let Some(up_speed) = self.shift_speed(vehicle, gear) else {
            return GearSelection::hold(gear);
        };

        let selection = if up_speed < vehicle.speed && gear < vehicle.gear_ratios.top_gear() {
            GearSelection::up(gear)
        } else if gear > FIRST_GEAR
            && self
                .shift_speed(vehicle, gear.saturating_sub(1))
                .is_some_and(|down_speed| down_speed > vehicle.speed + self.shift_margin)
        {
            GearSelection::down(gear)
        } else {
            GearSelection::hold(gear)
        };

        if selection.decision.is_shift() {
            debug!(
                from = gear,
                to = selection.gear,
                speed = vehicle.speed,
                "gear shift"
            );
        }
        selection
    }
}
