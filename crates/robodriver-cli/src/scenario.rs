//! Config and scenario files
//!
//! Files are JSON or YAML, picked by extension.

use robodriver_core::{DriverParams, RaceConfig};
use robodriver_model::{CarSpec, SegmentSpec, Track, TrackError, VehicleState};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self, CliError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("yaml" | "yml") => Ok(FileFormat::Yaml),
            _ => Err(CliError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read and deserialize `path`.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let format = FileFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let value = match format {
        FileFormat::Json => serde_json::from_str(&content)?,
        FileFormat::Yaml => serde_yaml::from_str(&content)?,
    };
    Ok(value)
}

/// Recorded race input: one car on one track, with host snapshots in tick order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub car: CarSpec,
    #[serde(default)]
    pub params: DriverParams,
    #[serde(default)]
    pub race: RaceConfig,
    /// Link the last segment back to the first
    #[serde(default)]
    pub closed: bool,
    pub track: Vec<SegmentSpec>,
    pub snapshots: Vec<VehicleState>,
}

impl Scenario {
    pub fn build_track(&self) -> Result<Track, CliError> {
        Ok(Track::from_specs(&self.track, self.closed)?)
    }

    /// Check the snapshots against the track they will be replayed on.
    pub fn validate(&self, track: &Track) -> Result<(), CliError> {
        if self.snapshots.is_empty() {
            return Err(CliError::InvalidScenario(
                "scenario has no vehicle snapshots".to_string(),
            ));
        }
        if let Some(unknown) = self
            .snapshots
            .iter()
            .map(|snapshot| snapshot.position.segment)
            .find(|&id| track.segment(id).is_none())
        {
            return Err(TrackError::UnknownSegment(unknown).into());
        }
        Ok(())
    }
}
