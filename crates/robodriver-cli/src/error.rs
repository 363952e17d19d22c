//! Error types for the robodriver CLI

use robodriver_model::{ConfigError, TrackError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Unsupported file format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid track: {0}")]
    Track(#[from] TrackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Process exit code for this error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Io(_) => 2,
            CliError::UnsupportedFormat(_) | CliError::Json(_) | CliError::Yaml(_) => 3,
            CliError::Config(_) | CliError::Track(_) | CliError::InvalidScenario(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::UnsupportedFormat("car.toml".into()).exit_code(), 3);
        assert_eq!(CliError::Track(TrackError::Empty).exit_code(), 4);
        assert_eq!(
            CliError::Config(ConfigError::InvalidTickDuration(0.0)).exit_code(),
            4
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(CliError::Io(io).exit_code(), 2);
    }

    #[test]
    fn test_display() {
        insta::assert_snapshot!(
            CliError::Config(ConfigError::invalid("mass", -1.0, "must be > 0")).to_string(),
            @"Invalid configuration: Invalid parameter 'mass': -1 (must be > 0)"
        );
    }
}
