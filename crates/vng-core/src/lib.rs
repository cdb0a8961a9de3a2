//! vng-core
//!
//! Pure domain types and run configuration for VNG report analysis.
//! No I/O. Shared vocabulary of the parser, the analysis engine and
//! the collaborators that consume their output.

pub mod config;
pub mod error;
pub mod models;
