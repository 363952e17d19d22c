//! Per-vehicle controller lifecycle and the per-tick decision.

use robodriver_filters::PedalFilters;
use robodriver_gearbox::Gearbox;
use robodriver_model::{
    CarSpec, ControlCommand, Drivetrain, REVERSE_GEAR, Track, TrackSegment, VehicleState,
    normalize_pi,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::braking::brake_fraction;
use crate::cornering::CorneringModel;
use crate::params::{DriverParams, RaceConfig};
use crate::stuck::{StuckDetector, StuckState};

/// Counters reported when a race ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RaceSummary {
    pub ticks: u64,
    pub recovery_ticks: u64,
    pub gear_shifts: u64,
    /// Ticks where the snapshot could not be used and the car coasted
    pub coasting_ticks: u64,
}

/// Controller for one car over one race.
///
/// Created at race start from static car data, ticked once per simulation
/// step, consumed at race end. Nothing is shared between instances.
///
/// # Example
///
/// ```
/// use robodriver_core::prelude::*;
/// use robodriver_model::prelude::*;
///
/// let track = Track::from_specs(&[SegmentSpec::straight(500.0)], true)?;
/// let mut driver = RobotDriver::new_race(
///     &CarSpec::default(),
///     DriverParams::default(),
///     RaceConfig::default(),
/// )?;
///
/// let vehicle = VehicleState {
///     speed: 20.0,
///     yaw: 0.0,
///     position: TrackPosition::new(SegmentId(0), 10.0, 0.0),
///     gear: 2,
///     wheels: [Wheel::new(20.0 / 0.3, 0.3); 4],
///     redline_rpm: 900.0,
///     gear_ratios: GearRatios::new(-10.0, vec![10.0, 7.0, 5.0]),
///     steer_lock: 0.4,
///     fuel: 50.0,
/// };
///
/// let command = driver.tick(&track, &vehicle);
/// assert!(command.accel > 0.0);
/// assert!(command.brake.abs() < f32::EPSILON);
///
/// let summary = driver.end_race();
/// assert_eq!(summary.ticks, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct RobotDriver {
    params: DriverParams,
    car_mass: f32,
    drivetrain: Drivetrain,
    cornering: CorneringModel,
    gearbox: Gearbox,
    filters: PedalFilters,
    stuck: StuckDetector,
    heading_error: f32,
    summary: RaceSummary,
}

impl RobotDriver {
    /// Validate configuration and derive the static coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`robodriver_model::ConfigError`] if the car, the parameters or
    /// the tick duration are invalid.
    pub fn new_race(
        car: &CarSpec,
        params: DriverParams,
        race: RaceConfig,
    ) -> robodriver_model::ConfigResult<Self> {
        params.validate()?;
        race.validate()?;
        let coefficients = car.coefficients()?;
        let gearbox = params.gearbox()?;
        let stuck = StuckDetector::from_params(&params, &race);

        info!(
            mass = coefficients.mass,
            downforce = coefficients.downforce,
            drag = coefficients.drag,
            drivetrain = %coefficients.drivetrain,
            max_stuck_ticks = stuck.max_ticks(),
            "race start"
        );

        Ok(Self {
            params,
            car_mass: coefficients.mass,
            drivetrain: coefficients.drivetrain,
            cornering: CorneringModel::new(
                &coefficients,
                params.gravity,
                params.full_accel_margin,
            ),
            gearbox,
            filters: params.pedal_filters(coefficients.drivetrain),
            stuck,
            heading_error: 0.0,
            summary: RaceSummary::default(),
        })
    }

    /// Compute the command for the next simulation step.
    ///
    /// Never fails. A snapshot on a segment the track does not contain yields
    /// [`ControlCommand::neutral`].
    ///
    /// # RT Safety
    ///
    /// - No heap allocations
    /// - Bounded by one lap of braking look-ahead
    pub fn tick(&mut self, track: &Track, vehicle: &VehicleState) -> ControlCommand {
        self.summary.ticks = self.summary.ticks.saturating_add(1);

        let Some(segment) = track.segment(vehicle.position.segment) else {
            warn!(segment = %vehicle.position.segment, "vehicle on unknown segment, coasting");
            self.heading_error = 0.0;
            self.summary.coasting_ticks = self.summary.coasting_ticks.saturating_add(1);
            return ControlCommand::neutral();
        };

        self.heading_error =
            normalize_pi(segment.tangent_heading(vehicle.position.to_start) - vehicle.yaw);
        self.update_mass(vehicle.fuel);

        let state = self
            .stuck
            .update(self.heading_error, vehicle.speed, vehicle.position.to_middle);

        let command = match state {
            StuckState::Stuck => {
                self.summary.recovery_ticks = self.summary.recovery_ticks.saturating_add(1);
                self.recover(vehicle)
            }
            StuckState::Normal => self.drive(track, segment, vehicle),
        };
        command.sanitized()
    }

    /// Finish the race and report counters.
    pub fn end_race(self) -> RaceSummary {
        info!(
            ticks = self.summary.ticks,
            recovery_ticks = self.summary.recovery_ticks,
            gear_shifts = self.summary.gear_shifts,
            "race end"
        );
        self.summary
    }

    fn update_mass(&mut self, fuel: f32) {
        let fuel = if fuel.is_finite() { fuel.max(0.0) } else { 0.0 };
        self.cornering.mass = self.car_mass + fuel;
    }

    fn recover(&self, vehicle: &VehicleState) -> ControlCommand {
        let steer = steer_fraction(-self.heading_error, vehicle.steer_lock);
        ControlCommand::new(steer, REVERSE_GEAR, self.params.recovery_accel, 0.0)
    }

    fn drive(
        &mut self,
        track: &Track,
        segment: &TrackSegment,
        vehicle: &VehicleState,
    ) -> ControlCommand {
        let offset_fraction = vehicle.position.to_middle / segment.width;
        let steer = steer_fraction(self.heading_error - offset_fraction, vehicle.steer_lock);

        let selection = self.gearbox.select(vehicle);
        if selection.decision.is_shift() {
            self.summary.gear_shifts = self.summary.gear_shifts.saturating_add(1);
        }
        if vehicle.gear_ratios.ratio(selection.gear).is_none() {
            warn!(gear = selection.gear, "no ratio for selected gear");
        }

        let brake = self
            .filters
            .brake(brake_fraction(&self.cornering, track, segment, vehicle), vehicle);

        let accel = if brake > 0.0 {
            0.0
        } else {
            // Reverse and neutral have no forward ratio to hold a speed with
            let ratio = if vehicle.gear > 0 {
                vehicle.current_ratio()
            } else {
                vehicle.gear_ratios.ratio(selection.gear)
            };
            let raw = self.cornering.desired_accel(segment, vehicle, ratio);
            self.filters.accel(raw, vehicle, segment)
        };

        if brake > 0.0 {
            debug!(brake, speed = vehicle.speed, segment = %segment.id, "braking");
        }

        ControlCommand::new(steer, selection.gear, accel, brake)
    }

    pub fn params(&self) -> &DriverParams {
        &self.params
    }

    /// Static mass plus the fuel reported on the last tick.
    pub fn cumulative_mass(&self) -> f32 {
        self.cornering.mass
    }

    pub fn downforce_coeff(&self) -> f32 {
        self.cornering.downforce
    }

    pub fn drag_coeff(&self) -> f32 {
        self.cornering.drag
    }

    pub fn drivetrain(&self) -> Drivetrain {
        self.drivetrain
    }

    /// Signed track-minus-heading angle from the last tick, in (-PI, PI].
    pub fn heading_error(&self) -> f32 {
        self.heading_error
    }

    pub fn stuck_counter(&self) -> u32 {
        self.stuck.counter()
    }

    pub fn max_stuck_ticks(&self) -> u32 {
        self.stuck.max_ticks()
    }

    pub fn stuck_state(&self) -> StuckState {
        self.stuck.state()
    }

    pub fn cornering(&self) -> &CorneringModel {
        &self.cornering
    }

    pub fn summary(&self) -> &RaceSummary {
        &self.summary
    }
}

fn steer_fraction(angle: f32, steer_lock: f32) -> f32 {
    if steer_lock > 0.0 {
        angle / steer_lock
    } else {
        0.0
    }
}
