//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use serde::Serialize;
use serde_json::json;

use crate::commands::check::CheckReport;
use crate::commands::replay::ReplayReport;
use crate::error::CliError;

fn print_json<T: Serialize>(value: &T, what: &str) {
    let output = json!({
        "success": true,
        "data": value
    });
    match serde_json::to_string_pretty(&output) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format {what} as JSON: {e}"),
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::UnsupportedFormat(_)) => "unsupported_format",
        Some(CliError::InvalidScenario(_)) => "invalid_scenario",
        Some(CliError::Config(_)) => "config",
        Some(CliError::Track(_)) => "track",
        Some(CliError::Io(_)) => "io",
        Some(CliError::Json(_)) | Some(CliError::Yaml(_)) => "parse",
        None => "error",
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

pub fn print_check(report: &CheckReport, json: bool) {
    if json {
        print_json(report, "car report");
        return;
    }

    println!("{} {}", "●".green(), "Car configuration is valid".bold());
    println!("  Mass:             {:.1} kg", report.mass);
    println!("  Drivetrain:       {}", report.drivetrain.cyan());
    println!("  Downforce (CA):   {:.4}", report.downforce_coeff);
    println!("  Drag (CW):        {:.4}", report.drag_coeff);
    println!(
        "  Stuck limit:      {} ticks at {:.3} s",
        report.max_stuck_ticks, report.tick_duration
    );
}

pub fn print_replay(report: &ReplayReport, json: bool) {
    if json {
        print_json(report, "replay");
        return;
    }

    println!(
        "{}",
        format!(
            "{:>5} {:>4} {:>7} {:>7} {:>4} {:>6} {:>6}",
            "tick", "seg", "speed", "steer", "gear", "accel", "brake"
        )
        .bold()
    );
    for record in &report.ticks {
        let cmd = &record.command;
        let line = format!(
            "{:>5} {:>4} {:>7.2} {:>7.3} {:>4} {:>6.3} {:>6.3}",
            record.tick, record.segment, record.speed, cmd.steer, cmd.gear, cmd.accel, cmd.brake
        );
        if cmd.is_reverse() {
            println!("{}", line.yellow());
        } else if cmd.brake > 0.0 {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }

    let summary = &report.summary;
    println!();
    println!(
        "{} {} ticks, {} gear shifts, {} recovery, {} coasting",
        "Summary:".bold(),
        summary.ticks,
        summary.gear_shifts,
        summary.recovery_ticks,
        summary.coasting_ticks
    );
}
