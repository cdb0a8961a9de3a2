//! Per-metric statistics over an aligned value sequence.
//!
//! Only present values take part. Anything that cannot be computed (too
//! few values, a zero baseline) comes back as `None`.

use vng_core::config::DEFAULT_MIN_FILES_FOR_CI;
use vng_core::models::analysis::{ChangeClassification, MetricStatistics};

pub fn compute(values: &[Option<f64>]) -> MetricStatistics {
    compute_with(values, DEFAULT_MIN_FILES_FOR_CI)
}

/// Like [`compute`], with an explicit confidence-interval threshold.
pub fn compute_with(values: &[Option<f64>], min_for_ci: usize) -> MetricStatistics {
    let present: Vec<f64> = values.iter().flatten().copied().collect();

    let endpoints = match (present.first(), present.last()) {
        (Some(&first), Some(&last)) if present.len() >= 2 => Some((first, last)),
        _ => None,
    };

    let delta = endpoints.and_then(|(first, last)| finite(last - first));

    let percent_change = match (delta, endpoints) {
        (Some(delta), Some((first, _))) if first != 0.0 => finite(delta / first * 100.0),
        _ => None,
    };

    // Compared directly so an overflowing delta still classifies.
    let change = match endpoints {
        None => ChangeClassification::InsufficientData,
        Some((first, last)) if last == first => ChangeClassification::Unchanged,
        Some((first, last)) if last > first => ChangeClassification::Increased,
        Some(_) => ChangeClassification::Decreased,
    };

    MetricStatistics {
        delta,
        percent_change,
        std_dev: population_std_dev(&present),
        ci_eligible: present.len() >= min_for_ci,
        change,
    }
}

/// Population standard deviation (divides by `n`). The files of a run are
/// the whole observed population, not a sample of one.
pub fn population_std_dev(present: &[f64]) -> Option<f64> {
    if present.len() < 2 {
        return None;
    }
    let n = present.len() as f64;
    let mean = present.iter().sum::<f64>() / n;
    let variance = present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    finite(variance.sqrt())
}

/// Each present value as percent change from the first present value.
///
/// Puts metrics with different units on one scale for charting. Slots are
/// `None` where the value is absent or the baseline is zero.
pub fn relative_to_baseline(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let baseline = values.iter().flatten().copied().next();
    values
        .iter()
        .map(|value| match (value, baseline) {
            (Some(v), Some(b)) if b != 0.0 => finite((v - b) / b * 100.0),
            _ => None,
        })
        .collect()
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}
