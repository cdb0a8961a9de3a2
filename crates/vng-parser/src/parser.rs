//! Report parser: raw text in, one [`ParsedFile`] out.
//!
//! Malformed lines never abort a parse. They are skipped and recorded as
//! [`ParseWarning`]s on the result. Only empty input and input without a
//! single category header are fatal.

use tracing::{debug, info};
use vng_core::models::report::{Category, MetricValue, ParseWarning, ParseWarningKind, ParsedFile};

use crate::error::{ParseFailure, ParsingError};
use crate::grammar::{self, FlagMarker, LineKind, MetricEntry};

/// Values are rounded to this many decimal places when read, so exact
/// comparisons in the analysis stage see stable numbers.
pub const VALUE_DECIMALS: i32 = 6;

/// One line of input with its 1-based line number.
#[derive(Debug, Clone, Copy)]
struct RawLine<'a> {
    number: usize,
    text: &'a str,
}

fn raw_lines(text: &str) -> impl Iterator<Item = RawLine<'_>> {
    text.lines().enumerate().map(|(i, text)| RawLine {
        number: i + 1,
        text,
    })
}

/// Parse one report.
pub fn parse(raw_text: &str, source_name: &str) -> Result<ParsedFile, ParsingError> {
    if raw_text.trim().is_empty() {
        return Err(ParsingError::new(source_name, ParseFailure::EmptyInput));
    }

    let mut categories: Vec<Category> = Vec::new();
    let mut warnings = Vec::new();
    let mut current: Option<usize> = None;

    let lines: Vec<(RawLine<'_>, LineKind)> = raw_lines(raw_text)
        .map(|line| (line, grammar::classify(line.text)))
        .collect();

    for (i, (line, kind)) in lines.iter().enumerate() {
        let line = *line;
        match kind.clone() {
            LineKind::Blank => {}
            LineKind::CategoryHeader(name) => {
                if current.is_some() && looks_like_blank_metric(line, &lines[i + 1..]) {
                    warn(&mut warnings, line, ParseWarningKind::UnrecognizedLine);
                }
                let idx = match categories.iter().position(|c| c.name == name) {
                    Some(idx) => idx,
                    None => {
                        categories.push(Category::new(name));
                        categories.len() - 1
                    }
                };
                current = Some(idx);
            }
            LineKind::MetricEntry(entry) => match current {
                Some(idx) => record_metric(&mut categories[idx], entry, line, &mut warnings),
                None => warn(&mut warnings, line, ParseWarningKind::MetricOutsideCategory),
            },
            LineKind::Unrecognized => {
                warn(&mut warnings, line, ParseWarningKind::UnrecognizedLine);
            }
        }
    }

    if categories.is_empty() {
        return Err(ParsingError::new(source_name, ParseFailure::NoCategories));
    }

    let file = ParsedFile {
        source_name: source_name.to_string(),
        categories,
        warnings,
    };

    info!(
        source = source_name,
        categories = file.categories.len(),
        metrics = file.metric_count(),
        warnings = file.warnings.len(),
        "parsed report"
    );

    Ok(file)
}

/// Parse several reports, keeping input order. Each input fails or
/// succeeds on its own.
pub fn parse_many<N, T>(inputs: &[(N, T)]) -> Vec<Result<ParsedFile, ParsingError>>
where
    N: AsRef<str>,
    T: AsRef<str>,
{
    inputs
        .iter()
        .map(|(name, text)| parse(text.as_ref(), name.as_ref()))
        .collect()
}

/// A `Name:` header inside an open category with nothing under it reads
/// more like a metric exported without a value.
fn looks_like_blank_metric(line: RawLine<'_>, rest: &[(RawLine<'_>, LineKind)]) -> bool {
    if line.text.trim_start().starts_with('[') {
        return false;
    }
    !matches!(
        rest.iter().map(|(_, kind)| kind).find(|kind| **kind != LineKind::Blank),
        Some(LineKind::MetricEntry(_))
    )
}

fn record_metric(
    category: &mut Category,
    entry: MetricEntry,
    line: RawLine<'_>,
    warnings: &mut Vec<ParseWarning>,
) {
    if category.metric(&entry.name).is_some() {
        warn(warnings, line, ParseWarningKind::DuplicateMetric);
        return;
    }

    let value = parse_value(&entry.raw_value);
    if value.is_none() {
        warn(warnings, line, ParseWarningKind::UnparseableValue);
    }

    let mut flagged = match entry.flag {
        FlagMarker::None => false,
        FlagMarker::Present => true,
        FlagMarker::Malformed(_) => {
            warn(warnings, line, ParseWarningKind::MalformedFlagMarker);
            false
        }
    };
    if flagged && value.is_none() {
        warn(warnings, line, ParseWarningKind::FlagWithoutValue);
        flagged = false;
    }

    category.metrics.push(MetricValue {
        name: entry.name,
        value,
        unit: entry.unit,
        flagged,
    });
}

/// Read a finite decimal number. Words such as `inf` or `NaN` are rejected
/// even though `f64::from_str` accepts them.
pub fn parse_value(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let first = raw.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '+' | '-' | '.')) {
        return None;
    }

    let value: f64 = raw.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    let scale = 10f64.powi(VALUE_DECIMALS);
    let rounded = (value * scale).round() / scale;
    Some(if rounded.is_finite() { rounded } else { value })
}

fn warn(warnings: &mut Vec<ParseWarning>, line: RawLine<'_>, kind: ParseWarningKind) {
    debug!(line = line.number, reason = kind.describe(), "parse warning");
    warnings.push(ParseWarning {
        line: line.number,
        kind,
        text: line.text.trim().to_string(),
    });
}
