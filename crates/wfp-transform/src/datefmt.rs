//! User-facing date patterns.
//!
//! Rule authors write patterns with the tokens `yyyy`, `mmm`, `mm`, `yy`,
//! and `dd` (for example `dd/mm/yyyy` or `mmm-yy`). A compiled pattern
//! knows its strftime form, the length a well-formed value renders to, and
//! whether it carries a day component. Parsing truncates the raw cell to
//! the rendered length first, so trailing noise such as a `00:00:00` time
//! suffix does not fail an otherwise valid date.

use std::fmt;
use std::fmt::Write as _;

use chrono::NaiveDate;

/// A compiled user date pattern.
#[derive(Debug, Clone)]
pub struct DatePattern {
    tokens: String,
    strftime: String,
    rendered_len: Option<usize>,
    has_day: bool,
}

/// Compiles a token pattern into its strftime form.
///
/// Substitution runs longest token first so `yyyy` is consumed before
/// `yy` and `mmm` before `mm`.
pub fn compile_pattern(tokens: &str) -> DatePattern {
    let strftime = tokens
        .replace("yyyy", "%Y")
        .replace("mmm", "%b")
        .replace("mm", "%m")
        .replace("yy", "%y")
        .replace("dd", "%d");
    let has_day = strftime.contains("%d");
    let rendered_len = expected_rendered_length(&strftime);
    DatePattern {
        tokens: tokens.to_string(),
        strftime,
        rendered_len,
        has_day,
    }
}

/// Length of a sample date rendered through the strftime pattern, used to
/// truncate raw input before parsing. None when the pattern cannot render.
fn expected_rendered_length(strftime: &str) -> Option<usize> {
    let sample = NaiveDate::from_ymd_opt(2000, 11, 22)?;
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(strftime)).ok()?;
    Some(rendered.chars().count())
}

impl DatePattern {
    /// The pattern as the rule author wrote it.
    pub fn tokens(&self) -> &str {
        &self.tokens
    }

    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Truncates a raw cell to the expected rendered length.
    pub fn truncate<'a>(&self, raw: &'a str) -> &'a str {
        let trimmed = raw.trim();
        match self.rendered_len {
            Some(len) => match trimmed.char_indices().nth(len) {
                Some((byte_idx, _)) => &trimmed[..byte_idx],
                None => trimmed,
            },
            None => trimmed,
        }
    }

    /// Parses a raw cell, truncating first. Patterns without a day token
    /// parse with the day defaulted to the first of the month.
    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let truncated = self.truncate(raw);
        if truncated.is_empty() {
            return None;
        }
        if self.has_day {
            NaiveDate::parse_from_str(truncated, &self.strftime).ok()
        } else {
            let padded = format!("01 {truncated}");
            let padded_fmt = format!("%d {}", self.strftime);
            NaiveDate::parse_from_str(&padded, &padded_fmt).ok()
        }
    }

    /// Renders a date back through the pattern.
    pub fn render(&self, date: NaiveDate) -> Option<String> {
        let mut rendered = String::new();
        write!(rendered, "{}", date.format(&self.strftime)).ok()?;
        Some(rendered)
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens)
    }
}

const INFER_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%b %d, %Y",
];

const INFER_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Best-effort date inference for cells without a configured pattern.
pub fn infer_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in INFER_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in INFER_DATETIME_FORMATS {
        if let Ok(datetime) = chrono::NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Canonical ISO rendering used across exports and range labels.
pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
