//! Interpretation payload for a text-generation model.
//!
//! The analysis engine does not call any model. It produces a plain,
//! serializable summary and a structured-text rendering of it; the host
//! sends that to whichever model it is configured for.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use vng_core::models::analysis::{AnalysisResults, ChangeClassification, MetricData};

/// Instruction block sent ahead of [`build_interpretation_prompt`] output.
pub const INTERPRETATION_SYSTEM_PROMPT: &str = "\
You are assisting a clinician reviewing videonystagmography (VNG) results \
from several test sessions. Describe the notable changes between sessions, \
call out values the reports flagged as outside normative range, and note \
where data is missing or insufficient. Do not offer a diagnosis. Refer to \
sessions by their file names.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterpretationSummary {
    pub file_names: Vec<String>,
    pub categories: Vec<CategorySummary>,
    /// `Category / Metric` labels of every flagged metric.
    pub flagged_metrics: Vec<String>,
    pub total_metrics: usize,
    pub total_significant_changes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategorySummary {
    pub name: String,
    pub metrics: Vec<MetricSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MetricSummary {
    pub name: String,
    pub unit: Option<String>,
    pub values: Vec<Option<f64>>,
    pub delta: Option<f64>,
    pub percent_change: Option<f64>,
    pub change: ChangeClassification,
    pub flagged: bool,
}

impl InterpretationSummary {
    pub fn from_results(results: &AnalysisResults) -> Self {
        let categories = results
            .results
            .iter()
            .map(|r| CategorySummary {
                name: r.category.clone(),
                metrics: r.metrics.iter().map(metric_summary).collect(),
            })
            .collect();

        let flagged_metrics = results
            .metrics()
            .filter(|m| m.any_flagged)
            .map(|m| format!("{} / {}", m.category, m.name))
            .collect();

        Self {
            file_names: results.file_order.clone(),
            categories,
            flagged_metrics,
            total_metrics: results.summary.total_metrics,
            total_significant_changes: results.summary.total_significant_changes,
        }
    }
}

fn metric_summary(metric: &MetricData) -> MetricSummary {
    MetricSummary {
        name: metric.name.clone(),
        unit: metric.display_unit().map(str::to_string),
        values: metric.values.clone(),
        delta: metric.delta,
        percent_change: metric.percent_change,
        change: metric.change_classification,
        flagged: metric.any_flagged,
    }
}

/// Render the summary as structured text for a model prompt.
pub fn build_interpretation_prompt(summary: &InterpretationSummary) -> String {
    let mut output = String::from("## VNG comparison\n\n");
    output.push_str(&format!("Sessions (in order): {}\n\n", summary.file_names.join(", ")));

    for category in &summary.categories {
        output.push_str(&format!("### {}\n", category.name));
        for metric in &category.metrics {
            let unit = metric.unit.as_deref().map(|u| format!(" {u}")).unwrap_or_default();
            let values = metric
                .values
                .iter()
                .map(|v| v.map(|v| format!("{v}{unit}")).unwrap_or_else(|| "missing".to_string()))
                .collect::<Vec<_>>()
                .join(" -> ");

            output.push_str(&format!("- {}: {}", metric.name, values));
            if let Some(delta) = metric.delta {
                output.push_str(&format!(" (delta {delta:+.2}{unit}"));
                if let Some(pct) = metric.percent_change {
                    output.push_str(&format!(", {pct:+.1}%"));
                }
                output.push(')');
            }
            output.push_str(&format!(" [{}]", metric.change.label()));
            if metric.flagged {
                output.push_str(" FLAGGED");
            }
            output.push('\n');
        }
        output.push('\n');
    }

    if summary.flagged_metrics.is_empty() {
        output.push_str("No values were flagged as outside normative range.\n");
    } else {
        output.push_str("Flagged as outside normative range:\n");
        for label in &summary.flagged_metrics {
            output.push_str(&format!("- {label}\n"));
        }
    }

    output
}
