//! Analysis output: metrics aligned across every file of a run.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Direction of change across a metric's present values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChangeClassification {
    Increased,
    Decreased,
    Unchanged,
    /// Fewer than two present values.
    InsufficientData,
}

impl ChangeClassification {
    /// Increased or decreased.
    pub fn is_significant(&self) -> bool {
        matches!(
            self,
            ChangeClassification::Increased | ChangeClassification::Decreased
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeClassification::Increased => "increased",
            ChangeClassification::Decreased => "decreased",
            ChangeClassification::Unchanged => "unchanged",
            ChangeClassification::InsufficientData => "insufficient data",
        }
    }
}

/// Statistics derived from one aligned value sequence.
///
/// Anything that cannot be computed is `None`, never zero or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MetricStatistics {
    pub delta: Option<f64>,
    pub percent_change: Option<f64>,
    pub std_dev: Option<f64>,
    pub ci_eligible: bool,
    pub change: ChangeClassification,
}

/// One metric across every file in a run.
///
/// `values`, `flags`, and `units` each hold exactly one slot per file, in
/// the run's file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MetricData {
    pub category: String,
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub flags: Vec<bool>,
    pub units: Vec<Option<String>>,
    pub delta: Option<f64>,
    pub percent_change: Option<f64>,
    pub std_dev: Option<f64>,
    pub ci_eligible: bool,
    pub any_flagged: bool,
    pub change_classification: ChangeClassification,
}

impl MetricData {
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// First unit recorded for this metric, for display.
    pub fn display_unit(&self) -> Option<&str> {
        self.units.iter().flatten().map(String::as_str).next()
    }
}

/// One category's worth of metrics plus its summary counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisResult {
    pub category: String,
    pub metrics: Vec<MetricData>,
    /// Metrics flagged in at least one file.
    pub flagged_count: usize,
    /// Metrics with at least one present value.
    pub metrics_with_data: usize,
}

impl AnalysisResult {
    pub fn metric(&self, name: &str) -> Option<&MetricData> {
        self.metrics.iter().find(|m| m.name == name)
    }
}

/// Run-wide counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RunSummary {
    pub total_files: usize,
    pub total_metrics: usize,
    pub total_flagged: usize,
    pub total_significant_changes: usize,
    /// Metrics with a present value in every file.
    pub metrics_in_all_files: usize,
}

/// The full output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisResults {
    /// Categories in first-seen order across all files.
    pub results: Vec<AnalysisResult>,
    pub summary: RunSummary,
    /// Source names in the order used for alignment.
    pub file_order: Vec<String>,
}

impl AnalysisResults {
    pub fn category(&self, name: &str) -> Option<&AnalysisResult> {
        self.results.iter().find(|r| r.category == name)
    }

    pub fn metric(&self, category: &str, name: &str) -> Option<&MetricData> {
        self.category(category).and_then(|r| r.metric(name))
    }

    /// Every metric in category order.
    pub fn metrics(&self) -> impl Iterator<Item = &MetricData> {
        self.results.iter().flat_map(|r| r.metrics.iter())
    }
}
