use vng_analysis::analyze;
use vng_analysis::interpret::{InterpretationSummary, build_interpretation_prompt};
use vng_analysis::legacy::to_legacy_map;
use vng_core::models::analysis::ChangeClassification;
use vng_core::models::report::ParsedFile;

fn run() -> Vec<ParsedFile> {
    let reports = [
        (
            "2024-01.txt",
            "[Saccade]\nLatency: 100 ms\n[Caloric]\nUnilateral Weakness: 18 %\n",
        ),
        (
            "2024-06.txt",
            "[Saccade]\nLatency: 110 ms\n[Caloric]\nUnilateral Weakness: 29 % *\n",
        ),
    ];
    reports
        .iter()
        .map(|(name, text)| vng_parser::parse(text, name).unwrap())
        .collect()
}

#[test]
fn summary_carries_categories_and_flags() {
    let results = analyze(&run()).unwrap();
    let summary = InterpretationSummary::from_results(&results);

    assert_eq!(summary.file_names, vec!["2024-01.txt", "2024-06.txt"]);
    assert_eq!(summary.categories.len(), 2);
    assert_eq!(summary.categories[0].name, "Saccade");
    assert_eq!(summary.flagged_metrics, vec!["Caloric / Unilateral Weakness"]);
    assert_eq!(summary.total_metrics, 2);
    assert_eq!(summary.total_significant_changes, 2);

    let latency = &summary.categories[0].metrics[0];
    assert_eq!(latency.unit.as_deref(), Some("ms"));
    assert_eq!(latency.delta, Some(10.0));
    assert_eq!(latency.change, ChangeClassification::Increased);
}

#[test]
fn summary_serializes_to_plain_json() {
    let results = analyze(&run()).unwrap();
    let summary = InterpretationSummary::from_results(&results);
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["categories"][1]["metrics"][0]["flagged"], true);
    assert_eq!(json["categories"][0]["metrics"][0]["change"], "increased");
}

#[test]
fn prompt_lists_values_deltas_and_flags() {
    let results = analyze(&run()).unwrap();
    let prompt = build_interpretation_prompt(&InterpretationSummary::from_results(&results));

    assert!(prompt.contains("Sessions (in order): 2024-01.txt, 2024-06.txt"));
    assert!(prompt.contains("### Saccade"));
    assert!(prompt.contains("- Latency: 100 ms -> 110 ms (delta +10.00 ms, +10.0%) [increased]"));
    assert!(prompt.contains("Unilateral Weakness"));
    assert!(prompt.contains("FLAGGED"));
    assert!(prompt.contains("- Caloric / Unilateral Weakness"));
}

#[test]
fn prompt_marks_missing_values() {
    let files = vec![
        vng_parser::parse("[Saccade]\nLatency: 100 ms\n", "a").unwrap(),
        vng_parser::parse("[Saccade]\nAccuracy: 90 %\n", "b").unwrap(),
    ];
    let results = analyze(&files).unwrap();
    let prompt = build_interpretation_prompt(&InterpretationSummary::from_results(&results));

    assert!(prompt.contains("- Latency: 100 ms -> missing [insufficient data]"));
    assert!(prompt.contains("No values were flagged"));
}

#[test]
fn legacy_map_mirrors_results() {
    let results = analyze(&run()).unwrap();
    let legacy = to_legacy_map(&results);

    let keys: Vec<_> = legacy.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Caloric", "Saccade"]);

    let uw = &legacy["Caloric"]["Unilateral Weakness"];
    assert_eq!(uw.values, vec![Some(18.0), Some(29.0)]);
    assert_eq!(uw.flags, vec![false, true]);
    assert_eq!(uw.delta, Some(11.0));
    assert_eq!(uw.std_dev, Some(5.5));
}
