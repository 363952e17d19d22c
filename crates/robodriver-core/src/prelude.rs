//! Prelude for the controller crate.
//!
//! ```
//! use robodriver_core::prelude::*;
//!
//! let params = DriverParams::default();
//! assert!(params.validate().is_ok());
//! ```

pub use crate::braking::{brake_fraction, braking_distance};
pub use crate::cornering::{CorneringModel, UNLIMITED_SPEED};
pub use crate::driver::{RaceSummary, RobotDriver};
pub use crate::params::{DriverParams, RaceConfig};
pub use crate::stuck::{StuckDetector, StuckState};
