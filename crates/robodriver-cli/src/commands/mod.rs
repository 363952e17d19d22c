//! Subcommand implementations

pub mod check;
pub mod replay;
