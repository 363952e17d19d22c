//! RT-Safe Pedal Filters for robodriver
//!
//! Post-processing applied to the raw brake and throttle commands every tick.
//!
//! # Overview
//!
//! - **ABS**: relieves the brake in proportion to wheel lock-up
//! - **TCL**: cuts the throttle on driven-wheel spin, per drivetrain layout
//! - **Track edge**: cuts the throttle while running wide of the racing band
//!
//! # RT Safety Guarantees
//!
//! - No heap allocations in filter paths
//! - O(1) time complexity for all operations
//! - Every division by ground speed sits behind a minimum-speed bypass
//! - All state types are `#[repr(C)]` and `Copy`
//!
//! # Example
//!
//! ```
//! use robodriver_filters::prelude::*;
//!
//! // Create filter states at race start
//! let filters = PedalFilters::new(
//!     AbsState::default(),
//!     TclState::for_drivetrain(robodriver_model::Drivetrain::Front),
//!     TrackEdgeState::default(),
//! );
//! assert_eq!(filters.tcl.drivetrain, robodriver_model::Drivetrain::Front);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod abs;
pub mod prelude;
pub mod tcl;
pub mod track_edge;

pub use abs::{AbsState, abs_filter, average_slip};
pub use tcl::{TclState, tcl_filter, traction_slip};
pub use track_edge::{TrackEdgeState, track_edge_filter};

use robodriver_model::{TrackSegment, VehicleState};

/// The three pedal filter states, configured once per race.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PedalFilters {
    /// Anti-lock braking
    pub abs: AbsState,
    /// Traction control
    pub tcl: TclState,
    /// Track-edge throttle cut
    pub track_edge: TrackEdgeState,
}

impl PedalFilters {
    /// Bundle filter states.
    pub fn new(abs: AbsState, tcl: TclState, track_edge: TrackEdgeState) -> Self {
        Self {
            abs,
            tcl,
            track_edge,
        }
    }

    /// Run the brake chain (ABS).
    #[inline]
    pub fn brake(&self, brake: f32, vehicle: &VehicleState) -> f32 {
        abs_filter(brake, vehicle, &self.abs)
    }

    /// Run the throttle chain (TCL, then track edge).
    #[inline]
    pub fn accel(&self, accel: f32, vehicle: &VehicleState, segment: &TrackSegment) -> f32 {
        let accel = tcl_filter(accel, vehicle, &self.tcl);
        track_edge_filter(accel, vehicle, segment, &self.track_edge)
    }
}
