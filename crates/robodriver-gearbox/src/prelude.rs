//! Prelude for the gearbox crate.

pub use crate::shift::Gearbox;
pub use crate::types::{FIRST_GEAR, GearSelection, ShiftDecision};
pub use crate::{GearboxError, GearboxResult};
