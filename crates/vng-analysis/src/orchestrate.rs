//! Analysis run orchestration.
//!
//! `analyze` is a pure function of its inputs: the canonical file order is
//! the input order, and the output depends on nothing else.

use std::collections::{HashMap, HashSet};

use tracing::info;
use vng_core::config::AnalysisConfig;
use vng_core::models::analysis::{AnalysisResult, AnalysisResults, MetricData, RunSummary};
use vng_core::models::report::ParsedFile;

use crate::align::{self, AlignedMetric};
use crate::error::AnalysisError;
use crate::stats;

/// Analyze a run with the default configuration.
pub fn analyze(files: &[ParsedFile]) -> Result<AnalysisResults, AnalysisError> {
    analyze_with(files, &AnalysisConfig::default())
}

pub fn analyze_with(
    files: &[ParsedFile],
    config: &AnalysisConfig,
) -> Result<AnalysisResults, AnalysisError> {
    config.validate()?;

    if files.is_empty() {
        return Err(AnalysisError::NoFiles);
    }
    if files.len() > config.max_files {
        return Err(AnalysisError::TooManyFiles {
            count: files.len(),
            max: config.max_files,
        });
    }

    let mut seen = HashSet::new();
    for file in files {
        if !seen.insert(file.source_name.as_str()) {
            return Err(AnalysisError::DuplicateSource(file.source_name.clone()));
        }
    }

    if files.iter().all(|f| f.metric_count() == 0) {
        return Err(AnalysisError::NoMetrics(files.len()));
    }

    let metrics: Vec<MetricData> = align::align(files)
        .into_iter()
        .map(|aligned| metric_data(aligned, config.min_files_for_ci))
        .collect();

    let results = group_by_category(files, metrics);
    let summary = summarize(&results, files.len());

    info!(
        files = summary.total_files,
        metrics = summary.total_metrics,
        flagged = summary.total_flagged,
        significant = summary.total_significant_changes,
        "analysis complete"
    );

    Ok(AnalysisResults {
        results,
        summary,
        file_order: files.iter().map(|f| f.source_name.clone()).collect(),
    })
}

fn metric_data(aligned: AlignedMetric, min_for_ci: usize) -> MetricData {
    let stats = stats::compute_with(&aligned.values, min_for_ci);
    let any_flagged = aligned.flags.iter().any(|&f| f);

    MetricData {
        category: aligned.category,
        name: aligned.name,
        values: aligned.values,
        flags: aligned.flags,
        units: aligned.units,
        delta: stats.delta,
        percent_change: stats.percent_change,
        std_dev: stats.std_dev,
        ci_eligible: stats.ci_eligible,
        any_flagged,
        change_classification: stats.change,
    }
}

/// Bucket metrics into categories. Category order follows the headers as
/// they first appear across files, even where a file lists a category
/// without metrics. Categories left empty are dropped.
fn group_by_category(files: &[ParsedFile], metrics: Vec<MetricData>) -> Vec<AnalysisResult> {
    let mut results: Vec<AnalysisResult> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for category in files.iter().flat_map(|f| &f.categories) {
        if !index.contains_key(category.name.as_str()) {
            index.insert(category.name.as_str(), results.len());
            results.push(AnalysisResult {
                category: category.name.clone(),
                metrics: Vec::new(),
                flagged_count: 0,
                metrics_with_data: 0,
            });
        }
    }

    for metric in metrics {
        let Some(&idx) = index.get(metric.category.as_str()) else {
            continue;
        };
        let result = &mut results[idx];
        if metric.any_flagged {
            result.flagged_count += 1;
        }
        if metric.present_count() > 0 {
            result.metrics_with_data += 1;
        }
        result.metrics.push(metric);
    }

    results.retain(|r| !r.metrics.is_empty());
    results
}

fn summarize(results: &[AnalysisResult], total_files: usize) -> RunSummary {
    let mut summary = RunSummary {
        total_files,
        total_metrics: 0,
        total_flagged: 0,
        total_significant_changes: 0,
        metrics_in_all_files: 0,
    };

    for metric in results.iter().flat_map(|r| &r.metrics) {
        summary.total_metrics += 1;
        if metric.any_flagged {
            summary.total_flagged += 1;
        }
        if metric.change_classification.is_significant() {
            summary.total_significant_changes += 1;
        }
        if metric.present_count() == total_files {
            summary.metrics_in_all_files += 1;
        }
    }

    summary
}
