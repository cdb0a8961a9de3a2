use vng_analysis::analyze;
use vng_core::models::analysis::AnalysisResults;
use vng_export::error::ExportError;
use vng_export::render::{ReportMeta, render_markdown, render_with_template};

fn results() -> AnalysisResults {
    let reports = [
        ("visit1.txt", "[Saccade]\nLatency: 100 ms\nAccuracy: 92 %\n"),
        ("visit2.txt", "[Saccade]\nLatency: 110 ms *\n"),
        ("visit3.txt", "[Saccade]\nLatency: 95 ms\nAccuracy: 90 %\n"),
    ];
    let files: Vec<_> = reports
        .iter()
        .map(|(name, text)| vng_parser::parse(text, name).unwrap())
        .collect();
    analyze(&files).unwrap()
}

#[test]
fn markdown_report_has_summary_and_table() {
    let report = render_markdown(&results(), &ReportMeta::default()).unwrap();

    assert!(report.starts_with("# VNG Comparison Report"));
    assert!(report.contains("- Files compared: 3"));
    assert!(report.contains("- Metrics: 2 (1 present in every file)"));
    assert!(report.contains("1. visit1.txt"));
    assert!(report.contains("3. visit3.txt"));
    assert!(report.contains("## Saccade"));
    assert!(report.contains(
        "| Metric | Unit | visit1.txt | visit2.txt | visit3.txt | Delta | % Change | Std Dev | Trend |"
    ));
    assert!(report.contains(
        "| Latency (!) | ms | 100.00 | 110.00* | 95.00 | -5.00 | -5.0 | 6.24 | decreased |"
    ));
    assert!(report.contains("| Accuracy | % | 92.00 | - | 90.00 | -2.00 |"));
    assert!(!report.contains("## Interpretation"));
    assert!(!report.contains("_Generated"));
}

#[test]
fn optional_sections_render_when_present() {
    let meta = ReportMeta {
        title: "Patient 0042".to_string(),
        generated_at: Some("2026-10-17T09:00:00Z".to_string()),
        interpretation: Some("Saccade latency is stable across sessions.".to_string()),
    };
    let report = render_markdown(&results(), &meta).unwrap();

    assert!(report.starts_with("# Patient 0042"));
    assert!(report.contains("_Generated 2026-10-17T09:00:00Z_"));
    assert!(report.contains("## Interpretation"));
    assert!(report.contains("Saccade latency is stable across sessions."));
}

#[test]
fn custom_template() {
    let template = "{% for c in categories %}{{ c.name }}: {{ c.metrics | length }}\n{% endfor %}";
    let out = render_with_template("counts.txt", template, &results(), &ReportMeta::default())
        .unwrap();
    assert_eq!(out, "Saccade: 2\n");
}

#[test]
fn opt_num_precision_argument() {
    let template = "{% for m in categories.0.metrics %}{{ m.std_dev | opt_num(decimals=3) }};{% endfor %}";
    let out = render_with_template("std.txt", template, &results(), &ReportMeta::default())
        .unwrap();
    assert_eq!(out, "6.236;1.000;");
}

#[test]
fn broken_template_is_a_parse_error() {
    let err = render_with_template("bad", "{% for %}", &results(), &ReportMeta::default())
        .unwrap_err();
    assert!(matches!(err, ExportError::TemplateParse(_)));
}
