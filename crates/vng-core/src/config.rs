use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Default upper bound on the number of files in one analysis run.
pub const DEFAULT_MAX_FILES: usize = 50;

/// Default minimum number of present values for a metric to be eligible
/// for a confidence interval.
pub const DEFAULT_MIN_FILES_FOR_CI: usize = 3;

/// Options recognized by the analysis engine.
///
/// Every field has a fixed name, type, and effect. Missing fields take
/// their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct AnalysisConfig {
    /// Upper bound on files per run.
    pub max_files: usize,
    /// Minimum present-value count for confidence-interval eligibility.
    pub min_files_for_ci: usize,
    /// Reserved for tolerance-based change classification. Classification
    /// currently compares the delta against exactly zero and does not read
    /// this value.
    pub significant_change_epsilon: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            min_files_for_ci: DEFAULT_MIN_FILES_FOR_CI,
            significant_change_epsilon: 0.0,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.max_files == 0 {
            return Err(CoreError::InvalidConfig(
                "max_files must be at least 1".to_string(),
            ));
        }
        if self.min_files_for_ci == 0 {
            return Err(CoreError::InvalidConfig(
                "min_files_for_ci must be at least 1".to_string(),
            ));
        }
        if !self.significant_change_epsilon.is_finite() || self.significant_change_epsilon < 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "significant_change_epsilon must be a non-negative number, got {}",
                self.significant_change_epsilon
            )));
        }
        Ok(())
    }
}
