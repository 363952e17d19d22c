//! Data model for the robodriver controller
//!
//! This crate holds the read-only inputs the host hands the controller and the
//! command record it gets back:
//!
//! - [`track`]: segment chain with geometry, friction and next-segment links
//! - [`vehicle`]: per-tick dynamic snapshot (speed, position, wheels, gearbox)
//! - [`car`]: static car data and the aerodynamic coefficients derived from it
//! - [`command`]: steering, gear, throttle and brake output
//! - [`error`]: configuration and track construction errors
//!
//! # Example
//!
//! ```
//! use robodriver_model::prelude::*;
//!
//! let track = Track::from_specs(
//!     &[SegmentSpec::straight(100.0), SegmentSpec::left(40.0, 1.5)],
//!     true,
//! )?;
//! assert_eq!(track.len(), 2);
//! assert!(track.is_closed());
//! # Ok::<(), TrackError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_debug_implementations)]

pub mod car;
pub mod command;
pub mod error;
pub mod prelude;
pub mod track;
pub mod vehicle;

pub use car::{AeroSpec, CarCoefficients, CarSpec, Drivetrain};
pub use command::{ControlCommand, NEUTRAL_GEAR, REVERSE_GEAR};
pub use error::{ConfigError, ConfigResult, TrackError, TrackResult};
pub use track::{SegmentId, SegmentKind, SegmentSpec, Track, TrackSegment, normalize_pi};
pub use vehicle::{GearRatios, TrackPosition, VehicleState, Wheel, WheelPosition};

/// Gravitational acceleration, m/s^2.
pub const G: f32 = 9.81;
