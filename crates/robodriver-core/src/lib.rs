//! Per-tick race car controller
//!
//! [`RobotDriver`] turns one [`VehicleState`](robodriver_model::VehicleState)
//! snapshot into one [`ControlCommand`](robodriver_model::ControlCommand):
//!
//! ```text
//! heading error, mass ──► stuck check ──► Stuck:  reverse and realign
//!                                    └──► Normal: steer
//!                                                 gearbox
//!                                                 braking look-ahead ──► ABS
//!                                                 cornering throttle ──► TCL ──► track edge
//! ```
//!
//! Configuration errors surface once, from [`RobotDriver::new_race`]. The
//! tick itself never fails and never allocates.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![warn(missing_debug_implementations)]

pub mod braking;
pub mod cornering;
pub mod driver;
pub mod params;
pub mod prelude;
pub mod stuck;

pub use braking::{FULL_BRAKE, NO_BRAKE, brake_fraction, braking_distance, stopping_distance};
pub use cornering::{CorneringModel, UNLIMITED_SPEED};
pub use driver::{RaceSummary, RobotDriver};
pub use params::{DriverParams, RaceConfig};
pub use stuck::{StuckDetector, StuckState};
