//! `robodriver replay`: run recorded snapshots through one controller

use anyhow::Result;
use robodriver_core::{RaceSummary, RobotDriver};
use robodriver_model::ControlCommand;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::error::CliError;
use crate::output;
use crate::scenario::{Scenario, load};

/// One replayed tick.
#[derive(Debug, Clone, Serialize)]
pub struct TickRecord {
    pub tick: usize,
    pub segment: usize,
    pub speed: f32,
    pub heading_error: f32,
    pub stuck_counter: u32,
    pub command: ControlCommand,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub ticks: Vec<TickRecord>,
    pub summary: RaceSummary,
}

pub fn run(scenario: &Scenario) -> Result<ReplayReport, CliError> {
    let track = scenario.build_track()?;
    scenario.validate(&track)?;
    info!(
        segments = track.len(),
        length = track.total_length(),
        "track built"
    );
    let mut driver = RobotDriver::new_race(&scenario.car, scenario.params, scenario.race)?;

    let ticks = scenario
        .snapshots
        .iter()
        .enumerate()
        .map(|(tick, vehicle)| {
            let command = driver.tick(&track, vehicle);
            TickRecord {
                tick,
                segment: vehicle.position.segment.0,
                speed: vehicle.speed,
                heading_error: driver.heading_error(),
                stuck_counter: driver.stuck_counter(),
                command,
            }
        })
        .collect();

    Ok(ReplayReport {
        ticks,
        summary: driver.end_race(),
    })
}

pub fn execute(scenario_path: &Path, json: bool) -> Result<()> {
    let scenario: Scenario = load(scenario_path)?;
    info!(
        scenario = %scenario_path.display(),
        snapshots = scenario.snapshots.len(),
        "replaying"
    );
    let report = run(&scenario)?;
    output::print_replay(&report, json);
    Ok(())
}
