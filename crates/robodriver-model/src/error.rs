//! Configuration and track construction errors.
//!
//! These only surface at race start. The per-tick path never fails; it
//! substitutes a safe command instead.

use thiserror::Error;

use crate::track::SegmentId;

/// Errors raised while validating static car data and tuning parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A tuning or car parameter is outside its valid range.
    #[error("Invalid parameter '{name}': {value} ({reason})")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f32,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The drivetrain string is not one of RWD, FWD or 4WD.
    #[error("Unknown drivetrain '{0}', expected one of: RWD, FWD, 4WD")]
    UnknownDrivetrain(String),

    /// The simulation step must be strictly positive.
    #[error("Invalid tick duration: {0} s (must be > 0)")]
    InvalidTickDuration(f32),
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidParameter`].
    pub fn invalid(name: &'static str, value: f32, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Errors raised while building a track segment chain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    /// A track needs at least one segment.
    #[error("Track has no segments")]
    Empty,

    /// A segment links to a segment that does not exist.
    #[error("Segment {segment} links to missing segment {next}")]
    DanglingLink {
        /// Segment holding the bad link
        segment: SegmentId,
        /// Target that could not be resolved
        next: SegmentId,
    },

    /// Segment geometry is not usable (non-positive length, radius, width...).
    #[error("Segment {segment} has invalid geometry: {reason}")]
    InvalidGeometry {
        /// Offending segment
        segment: SegmentId,
        /// What is wrong with it
        reason: &'static str,
    },

    /// A segment id was looked up that is not part of the track.
    #[error("Unknown segment {0}")]
    UnknownSegment(SegmentId),
}

/// Result alias for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result alias for track construction.
pub type TrackResult<T> = Result<T, TrackError>;
