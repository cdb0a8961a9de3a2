//! Line classification for VNG report text.
//!
//! Every line is classified on its own, with no lookahead:
//!
//! ```text
//! [Saccade]                  category header (bracketed)
//! Smooth Pursuit:            category header (trailing colon)
//! Latency: 185 ms            metric entry
//! Gain Left: 0.62 *          metric entry, flagged
//! Velocity: 12.5deg/s [H]    metric entry, flagged, unit glued to value
//! ```
//!
//! A flag marker is a trailing run of `*` (standalone or glued to the value
//! token) or a trailing bracketed tag from [`FLAG_TAGS`].
//!
//! `Name:` with nothing after the colon is always a category header, even
//! inside an open category. A metric exported with a blank value therefore
//! opens a new category; the parser records an `UnrecognizedLine` warning
//! when such a header is followed directly by another header or the end of
//! input, since that shape is far more likely a blank metric.

/// Bracketed tags that mark a value as outside its normative range.
pub const FLAG_TAGS: &[&str] = &["H", "L", "A", "ABN", "!"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    CategoryHeader(String),
    MetricEntry(MetricEntry),
    Blank,
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricEntry {
    pub name: String,
    /// Value text as written, possibly empty or non-numeric.
    pub raw_value: String,
    pub unit: Option<String>,
    pub flag: FlagMarker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagMarker {
    None,
    Present,
    /// A trailing bracketed tag outside [`FLAG_TAGS`].
    Malformed(String),
}

/// Classify one line of report text.
pub fn classify(line: &str) -> LineKind {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }

    if let Some(inner) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
        let name = inner.trim();
        if is_name(name) && !name.contains(['[', ']']) {
            return LineKind::CategoryHeader(name.to_string());
        }
        return LineKind::Unrecognized;
    }

    let Some((name, rest)) = line.split_once(':') else {
        return LineKind::Unrecognized;
    };
    let name = name.trim();
    if !is_name(name) {
        return LineKind::Unrecognized;
    }

    let rest = rest.trim();
    if rest.is_empty() {
        return LineKind::CategoryHeader(name.to_string());
    }

    LineKind::MetricEntry(metric_entry(name, rest))
}

/// Names need at least one letter, which keeps rule lines like `=====` or
/// timestamps out.
fn is_name(s: &str) -> bool {
    s.chars().any(char::is_alphabetic)
}

fn metric_entry(name: &str, rest: &str) -> MetricEntry {
    let (body, mut flag) = strip_flag_marker(rest);

    let mut tokens = body.split_whitespace();
    let value_token = tokens.next().unwrap_or("");
    let mut unit_parts: Vec<&str> = tokens.collect();

    // `100* ms`: the marker is glued to the value with a unit after it.
    let value_token = match value_token.strip_suffix('*') {
        Some(stripped) => {
            if flag == FlagMarker::None {
                flag = FlagMarker::Present;
            }
            stripped.trim_end_matches('*')
        }
        None => value_token,
    };

    let (raw_value, glued_unit) = split_glued_unit(value_token);
    if let Some(unit) = glued_unit {
        unit_parts.insert(0, unit);
    }

    let unit = if unit_parts.is_empty() {
        None
    } else {
        Some(unit_parts.join(" "))
    };

    MetricEntry {
        name: name.to_string(),
        raw_value: raw_value.to_string(),
        unit,
        flag,
    }
}

/// Remove trailing flag markers, returning the remaining text. Star runs
/// and bracketed tags may be stacked (`100 ms [H] *`). An unknown tag makes
/// the whole marker malformed.
fn strip_flag_marker(rest: &str) -> (&str, FlagMarker) {
    let mut body = rest;
    let mut flag = FlagMarker::None;

    loop {
        let without_stars = body.trim_end_matches('*');
        if without_stars.len() != body.len() {
            body = without_stars.trim_end();
            if flag == FlagMarker::None {
                flag = FlagMarker::Present;
            }
            continue;
        }

        if body.ends_with(']')
            && let Some(open) = body.rfind('[')
        {
            let tag = body[open + 1..body.len() - 1].trim();
            if FLAG_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                if flag == FlagMarker::None {
                    flag = FlagMarker::Present;
                }
            } else if !matches!(flag, FlagMarker::Malformed(_)) {
                flag = FlagMarker::Malformed(tag.to_string());
            }
            body = body[..open].trim_end();
            continue;
        }

        return (body, flag);
    }
}

/// Split `100ms` into `("100", Some("ms"))`. Tokens that already read as a
/// number, or that do not start with one, are returned whole.
fn split_glued_unit(token: &str) -> (&str, Option<&str>) {
    if token.parse::<f64>().is_ok() {
        return (token, None);
    }

    let bytes = token.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    let has_digit = token[digits_start..end].bytes().any(|b| b.is_ascii_digit());
    let suffix = &token[end..];
    let unit_like = suffix
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '%' || c == '°');

    if has_digit && unit_like {
        (&token[..end], Some(suffix))
    } else {
        (token, None)
    }
}
