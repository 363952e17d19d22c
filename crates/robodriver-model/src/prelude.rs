//! Prelude for the model crate.
//!
//! ```
//! use robodriver_model::prelude::*;
//!
//! let cmd = ControlCommand::neutral();
//! assert_eq!(cmd.gear, NEUTRAL_GEAR);
//! ```

pub use crate::G;
pub use crate::car::{AeroSpec, CarCoefficients, CarSpec, Drivetrain};
pub use crate::command::{ControlCommand, NEUTRAL_GEAR, REVERSE_GEAR};
pub use crate::error::{ConfigError, ConfigResult, TrackError, TrackResult};
pub use crate::track::{SegmentId, SegmentKind, SegmentSpec, Track, TrackSegment, normalize_pi};
pub use crate::vehicle::{GearRatios, TrackPosition, VehicleState, Wheel, WheelPosition};
