//! vng-cli library root.
//!
//! The `vng` binary is a thin wrapper over these modules so integration
//! tests can drive commands, config loading, and file reading directly.

pub mod cli;
pub mod commands;
pub mod config;
pub mod files;
