//! Shared test utilities for robodriver.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with `#[track_caller]` panics
//! - [`fixtures`] - Track, vehicle and car builders
//! - [`tracking`] - Allocation tracking for the per-tick path
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! robodriver-test-helpers = { path = "crates/robodriver-test-helpers" }
//! ```
//!
//! ```rust,ignore
//! use robodriver_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod fixtures;
pub mod must;
pub mod prelude;

#[cfg(feature = "tracking")]
pub mod tracking;

pub use must::*;

#[cfg(feature = "tracking")]
pub use tracking::track;
