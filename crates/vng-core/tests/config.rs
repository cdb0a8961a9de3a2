use vng_core::config::{AnalysisConfig, DEFAULT_MAX_FILES, DEFAULT_MIN_FILES_FOR_CI};
use vng_core::error::CoreError;

#[test]
fn defaults_are_valid() {
    let config = AnalysisConfig::default();
    assert_eq!(config.max_files, DEFAULT_MAX_FILES);
    assert_eq!(config.min_files_for_ci, DEFAULT_MIN_FILES_FOR_CI);
    assert_eq!(config.significant_change_epsilon, 0.0);
    assert!(config.validate().is_ok());
}

#[test]
fn zero_max_files_is_rejected() {
    let config = AnalysisConfig {
        max_files: 0,
        ..AnalysisConfig::default()
    };
    assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));
}

#[test]
fn zero_ci_threshold_is_rejected() {
    let config = AnalysisConfig {
        min_files_for_ci: 0,
        ..AnalysisConfig::default()
    };
    assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));
}

#[test]
fn negative_epsilon_is_rejected() {
    let config = AnalysisConfig {
        significant_change_epsilon: -0.5,
        ..AnalysisConfig::default()
    };
    assert!(config.validate().is_err());

    let config = AnalysisConfig {
        significant_change_epsilon: f64::NAN,
        ..AnalysisConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn partial_json_fills_defaults() {
    let config: AnalysisConfig = serde_json::from_str(r#"{"max_files": 4}"#).unwrap();
    assert_eq!(config.max_files, 4);
    assert_eq!(config.min_files_for_ci, DEFAULT_MIN_FILES_FOR_CI);
}
