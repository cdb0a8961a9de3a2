//! Adapter to the older nested result shape.
//!
//! Earlier consumers read results as `category -> metric -> {values, flags,
//! delta, percent_change, std_dev}` and always listed keys sorted, so the
//! maps here are ordered by name. This is a view over [`AnalysisResults`];
//! no statistics are recomputed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vng_core::models::analysis::AnalysisResults;

pub type LegacyResults = BTreeMap<String, BTreeMap<String, LegacyMetric>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyMetric {
    pub values: Vec<Option<f64>>,
    pub flags: Vec<bool>,
    pub delta: Option<f64>,
    pub percent_change: Option<f64>,
    pub std_dev: Option<f64>,
}

pub fn to_legacy_map(results: &AnalysisResults) -> LegacyResults {
    results
        .results
        .iter()
        .map(|category| {
            let metrics = category
                .metrics
                .iter()
                .map(|m| {
                    (
                        m.name.clone(),
                        LegacyMetric {
                            values: m.values.clone(),
                            flags: m.flags.clone(),
                            delta: m.delta,
                            percent_change: m.percent_change,
                            std_dev: m.std_dev,
                        },
                    )
                })
                .collect();
            (category.category.clone(), metrics)
        })
        .collect()
}
