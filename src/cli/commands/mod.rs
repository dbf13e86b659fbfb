//! Command implementations for the mlss CLI
//!
//! Each command is organized into its own module.

pub mod config;
pub mod sync;
