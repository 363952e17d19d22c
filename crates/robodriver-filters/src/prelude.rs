//! Prelude for the filters crate.
//!
//! ```
//! use robodriver_filters::prelude::*;
//!
//! let state = AbsState::default();
//! assert!(state.slip_threshold < 1.0);
//! ```

pub use crate::PedalFilters;
pub use crate::abs::{AbsState, abs_filter, average_slip};
pub use crate::tcl::{TclState, tcl_filter, traction_slip};
pub use crate::track_edge::{TrackEdgeState, track_edge_filter};
