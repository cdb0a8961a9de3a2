//! vng-analysis
//!
//! Cross-file analysis of parsed VNG reports: metric alignment, per-metric
//! statistics, and the run orchestrator that assembles [`AnalysisResults`].
//! Also builds the structured payload handed to an interpretation model.
//!
//! [`AnalysisResults`]: vng_core::models::analysis::AnalysisResults

pub mod align;
pub mod error;
pub mod interpret;
pub mod legacy;
pub mod orchestrate;
pub mod stats;

pub use error::AnalysisError;
pub use orchestrate::{analyze, analyze_with};
