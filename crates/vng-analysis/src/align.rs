//! Metric alignment across files.
//!
//! Metrics are keyed by `(category, metric)`. Keys appear in first-seen
//! order: every key of the first file in its own order, then keys the
//! second file introduces, and so on. Each aligned sequence has one slot per
//! file; a file without the key gets an empty slot, never a zero.

use std::collections::HashMap;

use vng_core::models::report::ParsedFile;

/// One metric's raw readings across every file, before statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedMetric {
    pub category: String,
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub flags: Vec<bool>,
    pub units: Vec<Option<String>>,
}

impl AlignedMetric {
    fn empty(category: &str, name: &str, file_count: usize) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            values: vec![None; file_count],
            flags: vec![false; file_count],
            units: vec![None; file_count],
        }
    }
}

pub fn align(files: &[ParsedFile]) -> Vec<AlignedMetric> {
    let file_count = files.len();
    let mut aligned: Vec<AlignedMetric> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for (slot, file) in files.iter().enumerate() {
        for category in &file.categories {
            for metric in &category.metrics {
                let key = (category.name.as_str(), metric.name.as_str());
                let idx = *index.entry(key).or_insert_with(|| {
                    aligned.push(AlignedMetric::empty(&category.name, &metric.name, file_count));
                    aligned.len() - 1
                });

                let entry = &mut aligned[idx];
                entry.values[slot] = metric.value;
                entry.flags[slot] = metric.flagged;
                entry.units[slot] = metric.unit.clone();
            }
        }
    }

    aligned
}
