//! Parser output: one structured record per source report.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One source report, fully parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParsedFile {
    /// Identifying label, usually the original filename.
    pub source_name: String,
    /// Categories in order of first appearance in the text.
    pub categories: Vec<Category>,
    /// Non-fatal issues found while parsing.
    #[serde(default)]
    pub warnings: Vec<ParseWarning>,
}

impl ParsedFile {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            categories: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Total number of metric entries across all categories.
    pub fn metric_count(&self) -> usize {
        self.categories.iter().map(|c| c.metrics.len()).sum()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// A named grouping of related metrics, e.g. one test section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub name: String,
    pub metrics: Vec<MetricValue>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: Vec::new(),
        }
    }

    pub fn metric(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.iter().find(|m| m.name == name)
    }
}

/// One (name, value) pair read from one file.
///
/// A flag never accompanies an absent value; the parser clears it and
/// records a [`ParseWarningKind::FlagWithoutValue`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MetricValue {
    pub name: String,
    pub value: Option<f64>,
    /// Unit text exactly as written in the report.
    pub unit: Option<String>,
    /// The report marked this value as outside its normative range.
    pub flagged: bool,
}

/// A non-fatal parse issue, tied to the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParseWarning {
    /// 1-based line number.
    pub line: usize,
    pub kind: ParseWarningKind,
    /// The offending line, trimmed.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ParseWarningKind {
    /// Neither a header, a metric entry, nor blank.
    UnrecognizedLine,
    /// The value text is not a finite decimal number.
    UnparseableValue,
    /// A trailing bracketed tag that is not a known flag marker.
    MalformedFlagMarker,
    /// A flag marker on a metric whose value could not be read.
    FlagWithoutValue,
    /// A metric entry before the first category header.
    MetricOutsideCategory,
    /// A metric name repeated within one category; the first is kept.
    DuplicateMetric,
}

impl ParseWarningKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ParseWarningKind::UnrecognizedLine => "unrecognized line",
            ParseWarningKind::UnparseableValue => "value is not a number",
            ParseWarningKind::MalformedFlagMarker => "malformed flag marker",
            ParseWarningKind::FlagWithoutValue => "flag marker without a value",
            ParseWarningKind::MetricOutsideCategory => "metric before any category header",
            ParseWarningKind::DuplicateMetric => "duplicate metric in category",
        }
    }
}
