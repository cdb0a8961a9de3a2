//! vng-export
//!
//! Markdown report generation from analysis results.

pub mod error;
pub mod render;
