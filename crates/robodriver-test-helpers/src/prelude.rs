//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use robodriver_test_helpers::prelude::*;
//! ```

pub use crate::fixtures::{
    CarFixture, REDLINE, STEER_LOCK, TrackFixture, VehicleFixture, WHEEL_RADIUS, six_speed,
};
pub use crate::must::{must, must_some, must_with};

#[cfg(feature = "tracking")]
pub use crate::tracking::{AllocationGuard, TrackingAllocator, track};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
