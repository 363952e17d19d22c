//! Tuning parameters and race configuration
//!
//! Every constant the controller uses lives in [`DriverParams`]. Missing
//! fields in a parameter file fall back to the defaults below.

use robodriver_filters::{AbsState, PedalFilters, TclState, TrackEdgeState};
use robodriver_gearbox::{Gearbox, GearboxError};
use robodriver_model::{ConfigError, ConfigResult, Drivetrain, G};
use serde::{Deserialize, Serialize};

/// Controller tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverParams {
    /// Fraction of redline speed at which to shift up
    pub shift_threshold: f32,
    /// Extra speed (m/s) required below the lower gear's shift point before shifting down
    pub shift_margin: f32,
    pub abs_slip: f32,
    pub abs_min_speed: f32,
    pub tcl_slip: f32,
    pub tcl_min_speed: f32,
    /// Speed headroom (m/s) under the cornering limit that still gets full throttle
    pub full_accel_margin: f32,
    /// Heading error (degrees) beyond which the car may be stuck
    pub unstuck_angle_deg: f32,
    /// Seconds of continuous misalignment before recovery starts
    pub unstuck_time_limit: f32,
    pub max_unstuck_speed: f32,
    pub min_unstuck_distance: f32,
    /// Throttle applied in reverse while recovering
    pub recovery_accel: f32,
    pub track_edge_min_speed: f32,
    pub track_edge_width_divisor: f32,
    pub gravity: f32,
}

impl Default for DriverParams {
    fn default() -> Self {
        Self {
            shift_threshold: 0.9,
            shift_margin: 4.0,
            abs_slip: 0.9,
            abs_min_speed: 3.0,
            tcl_slip: 0.9,
            tcl_min_speed: 3.0,
            full_accel_margin: 1.0,
            unstuck_angle_deg: 30.0,
            unstuck_time_limit: 2.0,
            max_unstuck_speed: 5.0,
            min_unstuck_distance: 3.0,
            recovery_accel: 0.5,
            track_edge_min_speed: 5.0,
            track_edge_width_divisor: 4.0,
            gravity: G,
        }
    }
}

fn non_negative(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, value, "must be finite and >= 0"))
    }
}

fn positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, value, "must be finite and > 0"))
    }
}

fn unit_fraction(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, value, "must be within [0, 1]"))
    }
}

impl DriverParams {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as [`ConfigError::InvalidParameter`].
    pub fn validate(&self) -> ConfigResult<()> {
        self.gearbox()?;
        unit_fraction("abs_slip", self.abs_slip)?;
        positive("abs_min_speed", self.abs_min_speed)?;
        unit_fraction("tcl_slip", self.tcl_slip)?;
        positive("tcl_min_speed", self.tcl_min_speed)?;
        non_negative("full_accel_margin", self.full_accel_margin)?;
        if !(self.unstuck_angle_deg.is_finite() && (0.0..180.0).contains(&self.unstuck_angle_deg))
        {
            return Err(ConfigError::invalid(
                "unstuck_angle_deg",
                self.unstuck_angle_deg,
                "must be within [0, 180)",
            ));
        }
        positive("unstuck_time_limit", self.unstuck_time_limit)?;
        non_negative("max_unstuck_speed", self.max_unstuck_speed)?;
        non_negative("min_unstuck_distance", self.min_unstuck_distance)?;
        unit_fraction("recovery_accel", self.recovery_accel)?;
        non_negative("track_edge_min_speed", self.track_edge_min_speed)?;
        positive("track_edge_width_divisor", self.track_edge_width_divisor)?;
        positive("gravity", self.gravity)?;
        Ok(())
    }

    /// Gearbox built from the shift parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] naming the shift field.
    pub fn gearbox(&self) -> ConfigResult<Gearbox> {
        Gearbox::new(self.shift_threshold, self.shift_margin).map_err(|err| match err {
            GearboxError::InvalidThreshold(value) => {
                ConfigError::invalid("shift_threshold", value, "must be within (0, 1]")
            }
            GearboxError::InvalidMargin(value) => {
                ConfigError::invalid("shift_margin", value, "must be finite and >= 0")
            }
        })
    }

    /// Pedal filter states for a car with `drivetrain`.
    pub fn pedal_filters(&self, drivetrain: Drivetrain) -> PedalFilters {
        PedalFilters::new(
            AbsState::new(self.abs_slip, self.abs_min_speed),
            TclState::new(self.tcl_slip, self.tcl_min_speed, drivetrain),
            TrackEdgeState::new(self.track_edge_min_speed, self.track_edge_width_divisor),
        )
    }

    pub fn unstuck_angle(&self) -> f32 {
        self.unstuck_angle_deg.to_radians()
    }
}

/// Host timing for one race.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Seconds between controller ticks
    pub tick_duration: f32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            tick_duration: 0.02,
        }
    }
}

impl RaceConfig {
    pub fn new(tick_duration: f32) -> Self {
        Self { tick_duration }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTickDuration`] for a non-positive or
    /// non-finite step.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tick_duration.is_finite() && self.tick_duration > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidTickDuration(self.tick_duration))
        }
    }

    /// Whole ticks that fit in `seconds`, saturating at `u32::MAX`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn ticks_in(&self, seconds: f32) -> u32 {
        let ticks = (f64::from(seconds) / f64::from(self.tick_duration)).floor();
        if ticks.is_nan() || ticks <= 0.0 {
            0
        } else {
            ticks.min(f64::from(u32::MAX)) as u32
        }
    }
}
