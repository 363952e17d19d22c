//! `robodriver check`: validate a car (and optional tuning) and show derived values

use anyhow::Result;
use robodriver_core::{DriverParams, RaceConfig, RobotDriver};
use robodriver_model::CarSpec;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::error::CliError;
use crate::output;
use crate::scenario::load;

/// What `check` reports for a valid car.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub mass: f32,
    pub drivetrain: String,
    pub downforce_coeff: f32,
    pub drag_coeff: f32,
    pub max_stuck_ticks: u32,
    pub tick_duration: f32,
}

pub fn build_report(car: &CarSpec, params: DriverParams, race: RaceConfig) -> Result<CheckReport> {
    let driver = RobotDriver::new_race(car, params, race).map_err(CliError::from)?;
    Ok(CheckReport {
        mass: driver.cumulative_mass(),
        drivetrain: driver.drivetrain().to_string(),
        downforce_coeff: driver.downforce_coeff(),
        drag_coeff: driver.drag_coeff(),
        max_stuck_ticks: driver.max_stuck_ticks(),
        tick_duration: race.tick_duration,
    })
}

pub fn execute(
    car_path: &Path,
    params_path: Option<&Path>,
    tick_duration: Option<f32>,
    json: bool,
) -> Result<()> {
    let car: CarSpec = load(car_path)?;
    let params = match params_path {
        Some(path) => load(path)?,
        None => DriverParams::default(),
    };
    let race = tick_duration.map(RaceConfig::new).unwrap_or_default();

    info!(car = %car_path.display(), "checking car");
    let report = build_report(&car, params, race)?;
    output::print_check(&report, json);
    Ok(())
}
