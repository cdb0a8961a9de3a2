use vng_analysis::stats::{compute, compute_with, population_std_dev, relative_to_baseline};
use vng_core::models::analysis::ChangeClassification;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn population_std_dev_of_ten_twenty_thirty() {
    let stats = compute(&[Some(10.0), Some(20.0), Some(30.0)]);
    let expected = (((10.0f64 - 20.0).powi(2) + 0.0 + (30.0f64 - 20.0).powi(2)) / 3.0).sqrt();
    assert!(approx(stats.std_dev.unwrap(), expected));
    assert!(approx(stats.std_dev.unwrap(), 8.165));
}

#[test]
fn classification_boundaries() {
    assert_eq!(
        compute(&[Some(5.0), Some(5.0)]).change,
        ChangeClassification::Unchanged
    );
    assert_eq!(
        compute(&[Some(5.0)]).change,
        ChangeClassification::InsufficientData
    );
    assert_eq!(
        compute(&[Some(5.0), Some(7.0)]).change,
        ChangeClassification::Increased
    );
    assert_eq!(
        compute(&[Some(7.0), Some(5.0)]).change,
        ChangeClassification::Decreased
    );
}

#[test]
fn delta_uses_first_and_last_present_values() {
    let stats = compute(&[None, Some(40.0), None, Some(50.0), Some(46.0), None]);
    assert_eq!(stats.delta, Some(6.0));
    assert!(approx(stats.percent_change.unwrap(), 15.0));
    assert_eq!(stats.change, ChangeClassification::Increased);
}

#[test]
fn zero_baseline_leaves_percent_change_absent() {
    let stats = compute(&[Some(0.0), Some(3.0)]);
    assert_eq!(stats.delta, Some(3.0));
    assert_eq!(stats.percent_change, None);
    assert_eq!(stats.change, ChangeClassification::Increased);
}

#[test]
fn single_value_yields_no_statistics() {
    let stats = compute(&[None, Some(12.0), None]);
    assert_eq!(stats.delta, None);
    assert_eq!(stats.percent_change, None);
    assert_eq!(stats.std_dev, None);
    assert!(!stats.ci_eligible);
    assert_eq!(stats.change, ChangeClassification::InsufficientData);
}

#[test]
fn all_absent_yields_no_statistics() {
    let stats = compute(&[None, None]);
    assert_eq!(stats.delta, None);
    assert_eq!(stats.std_dev, None);
    assert_eq!(stats.change, ChangeClassification::InsufficientData);
    assert!(compute(&[]).delta.is_none());
}

#[test]
fn ci_eligibility_follows_present_count() {
    assert!(!compute(&[Some(1.0), Some(2.0)]).ci_eligible);
    assert!(compute(&[Some(1.0), Some(2.0), Some(3.0)]).ci_eligible);
    assert!(!compute(&[Some(1.0), None, Some(3.0)]).ci_eligible);
    assert!(compute_with(&[Some(1.0), Some(2.0)], 2).ci_eligible);
}

#[test]
fn std_dev_requires_two_values() {
    assert_eq!(population_std_dev(&[4.0]), None);
    assert_eq!(population_std_dev(&[4.0, 4.0]), Some(0.0));
    assert_eq!(population_std_dev(&[2.0, 4.0]), Some(1.0));
}

#[test]
fn relative_series_against_first_present_value() {
    let series = relative_to_baseline(&[None, Some(50.0), Some(75.0), None, Some(25.0)]);
    assert_eq!(series, vec![None, Some(0.0), Some(50.0), None, Some(-50.0)]);

    let series = relative_to_baseline(&[Some(0.0), Some(1.0)]);
    assert_eq!(series, vec![None, None]);
}

#[test]
fn percent_change_survives_large_deltas() {
    let stats = compute(&[Some(1e300), Some(3e306)]);
    assert!(stats.delta.is_some());
    let pct = stats.percent_change.unwrap();
    assert!((pct - 299_999_900.0).abs() < 1.0);
}

#[test]
fn overflowing_delta_still_classifies() {
    let stats = compute(&[Some(-1.7e308), Some(1.7e308)]);
    assert_eq!(stats.delta, None);
    assert_eq!(stats.percent_change, None);
    assert_eq!(stats.change, ChangeClassification::Increased);

    let stats = compute(&[Some(1.7e308), Some(-1.7e308)]);
    assert_eq!(stats.change, ChangeClassification::Decreased);
}
