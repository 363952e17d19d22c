//! Automatic gearbox for robodriver
//!
//! Picks a forward gear each tick from ground speed, engine redline and the
//! gear ratio table. Up and down shift points are separated by a speed margin
//! so the selection settles instead of oscillating.
//!
//! # Example
//!
//! ```
//! use robodriver_gearbox::prelude::*;
//! use robodriver_model::prelude::*;
//!
//! let vehicle = VehicleState {
//!     speed: 0.0,
//!     yaw: 0.0,
//!     position: TrackPosition::new(SegmentId(0), 0.0, 0.0),
//!     gear: 0,
//!     wheels: [Wheel::new(0.0, 0.3); 4],
//!     redline_rpm: 900.0,
//!     gear_ratios: GearRatios::new(-10.0, vec![10.0, 7.0, 5.0]),
//!     steer_lock: 0.4,
//!     fuel: 0.0,
//! };
//!
//! let selection = Gearbox::default().select(&vehicle);
//! assert_eq!(selection.gear, 1);
//! assert_eq!(selection.decision, ShiftDecision::Engage);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_debug_implementations)]

pub mod prelude;
pub mod shift;
pub mod types;

pub use shift::Gearbox;
pub use types::{FIRST_GEAR, GearSelection, NEUTRAL_GEAR, REVERSE_GEAR, ShiftDecision};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GearboxError {
    #[error("Shift threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f32),
    #[error("Shift margin must be finite and non-negative, got {0}")]
    InvalidMargin(f32),
}

pub type GearboxResult<T> = Result<T, GearboxError>;
