use std::collections::HashMap;

use serde::Serialize;
use tera::{Context, Tera, Value};
use tracing::debug;

use vng_core::models::analysis::{AnalysisResults, MetricData, RunSummary};

use crate::error::ExportError;

/// Built-in Markdown report template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/report.md.tera");

const DEFAULT_TEMPLATE_NAME: &str = "report.md";

/// Report-level details that are not part of the analysis itself.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub title: String,
    pub generated_at: Option<String>,
    /// Narrative text from an interpretation model, shown verbatim.
    pub interpretation: Option<String>,
}

impl Default for ReportMeta {
    fn default() -> Self {
        Self {
            title: "VNG Comparison Report".to_string(),
            generated_at: None,
            interpretation: None,
        }
    }
}

#[derive(Serialize)]
struct ReportContext<'a> {
    title: &'a str,
    generated_at: Option<&'a str>,
    interpretation: Option<&'a str>,
    summary: &'a RunSummary,
    file_order: &'a [String],
    categories: Vec<CategoryRow<'a>>,
}

#[derive(Serialize)]
struct CategoryRow<'a> {
    name: &'a str,
    flagged_count: usize,
    metrics_with_data: usize,
    metrics: Vec<MetricRow<'a>>,
}

#[derive(Serialize)]
struct MetricRow<'a> {
    name: &'a str,
    unit: &'a str,
    cells: Vec<Cell>,
    delta: Option<f64>,
    percent_change: Option<f64>,
    std_dev: Option<f64>,
    change: &'static str,
    flagged: bool,
}

#[derive(Serialize)]
struct Cell {
    value: Option<f64>,
    flagged: bool,
}

impl<'a> ReportContext<'a> {
    fn new(results: &'a AnalysisResults, meta: &'a ReportMeta) -> Self {
        let categories = results
            .results
            .iter()
            .map(|r| CategoryRow {
                name: &r.category,
                flagged_count: r.flagged_count,
                metrics_with_data: r.metrics_with_data,
                metrics: r.metrics.iter().map(MetricRow::new).collect(),
            })
            .collect();

        Self {
            title: &meta.title,
            generated_at: meta.generated_at.as_deref(),
            interpretation: meta.interpretation.as_deref(),
            summary: &results.summary,
            file_order: &results.file_order,
            categories,
        }
    }
}

impl<'a> MetricRow<'a> {
    fn new(metric: &'a MetricData) -> Self {
        Self {
            name: &metric.name,
            unit: metric.display_unit().unwrap_or(""),
            cells: metric
                .values
                .iter()
                .zip(&metric.flags)
                .map(|(&value, &flagged)| Cell { value, flagged })
                .collect(),
            delta: metric.delta,
            percent_change: metric.percent_change,
            std_dev: metric.std_dev,
            change: metric.change_classification.label(),
            flagged: metric.any_flagged,
        }
    }
}

/// Render analysis results with the built-in Markdown template.
pub fn render_markdown(results: &AnalysisResults, meta: &ReportMeta) -> Result<String, ExportError> {
    render_with_template(DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE, results, meta)
}

/// Render analysis results with a caller-supplied Tera template.
///
/// The template sees `title`, `generated_at`, `interpretation`, `summary`,
/// `file_order`, and `categories`, and can use the `opt_num` filter.
pub fn render_with_template(
    template_name: &str,
    template_content: &str,
    results: &AnalysisResults,
    meta: &ReportMeta,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.register_filter("opt_num", opt_num);
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(ReportContext::new(results, meta))?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    debug!(template_name, len = rendered.len(), "report rendered");
    Ok(rendered)
}

/// Format an optional number; absent values print as `-`.
///
/// Takes an optional `decimals` argument (default 2).
fn opt_num(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let decimals = match args.get("decimals") {
        Some(d) => d
            .as_u64()
            .ok_or_else(|| tera::Error::msg("opt_num: `decimals` must be a non-negative integer"))?
            as usize,
        None => 2,
    };

    match value {
        Value::Null => Ok(Value::String("-".to_string())),
        Value::Number(n) => {
            let x = n
                .as_f64()
                .ok_or_else(|| tera::Error::msg(format!("opt_num: {n} is not representable")))?;
            Ok(Value::String(format!("{:.*}", decimals, x)))
        }
        other => Err(tera::Error::msg(format!(
            "opt_num: expected a number, got {other}"
        ))),
    }
}
