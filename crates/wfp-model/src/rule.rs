//! Declarative validation rules for uploaded tabular files.
//!
//! A [`FileSpec`] describes one logical file type: either a single flat
//! table ([`TableRule`]) or a set of named sheets that each carry their own
//! `TableRule`. Rule sets are immutable once constructed; the engine never
//! mutates them.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Declared value kind for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    String,
    Date,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::String => write!(f, "string"),
            Self::Date => write!(f, "date"),
        }
    }
}

/// A column paired with its declared kind. Declaration order is the order
/// in which type checks run and report the first offense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTypeRule {
    pub column: String,
    pub kind: ColumnKind,
}

/// Calendar generation frequency for a date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekly(Weekday),
}

impl Default for Frequency {
    fn default() -> Self {
        Self::Weekly(Weekday::Mon)
    }
}

impl Frequency {
    /// True when the window expects Monday-anchored weekly labels.
    pub fn is_weekly_monday(self) -> bool {
        matches!(self, Self::Weekly(Weekday::Mon))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly(day) => {
                let name = match day {
                    Weekday::Mon => "monday",
                    Weekday::Tue => "tuesday",
                    Weekday::Wed => "wednesday",
                    Weekday::Thu => "thursday",
                    Weekday::Fri => "friday",
                    Weekday::Sat => "saturday",
                    Weekday::Sun => "sunday",
                };
                write!(f, "weekly-{name}")
            }
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();
        if lower == "daily" {
            return Ok(Self::Daily);
        }
        if let Some(day) = lower.strip_prefix("weekly-") {
            let weekday = Weekday::from_str(day)
                .map_err(|_| format!("unknown weekday in frequency '{value}'"))?;
            return Ok(Self::Weekly(weekday));
        }
        Err(format!(
            "unknown frequency '{value}' (expected 'daily' or 'weekly-<weekday>')"
        ))
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.to_string()
    }
}

/// An inclusive calendar window with optional day offsets on either end.
///
/// Offsets are applied before label generation, so a weekly anchor can
/// drift off its weekday when an offset moves the window start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeRule {
    #[serde(with = "iso_date")]
    pub start: NaiveDate,
    #[serde(with = "iso_date")]
    pub end: NaiveDate,
    #[serde(default)]
    pub start_offset_days: i64,
    #[serde(default)]
    pub end_offset_days: i64,
    #[serde(default)]
    pub frequency: Frequency,
}

impl DateRangeRule {
    pub fn weekly_monday(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            start_offset_days: 0,
            end_offset_days: 0,
            frequency: Frequency::default(),
        }
    }

    /// Window start after applying the start offset.
    pub fn effective_start(&self) -> NaiveDate {
        self.start + chrono::Duration::days(self.start_offset_days)
    }

    /// Window end after applying the end offset.
    pub fn effective_end(&self) -> NaiveDate {
        self.end + chrono::Duration::days(self.end_offset_days)
    }
}

impl fmt::Display for DateRangeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{} ({})",
            self.effective_start().format("%Y-%m-%d"),
            self.effective_end().format("%Y-%m-%d"),
            self.frequency
        )
    }
}

/// Per-column date configuration: a user-friendly token pattern
/// (`yyyy`, `mmm`, `mm`, `yy`, `dd`) and an optional expected window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateColumnSpec {
    pub column: String,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub range: Option<DateRangeRule>,
}

/// Per-column value constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ValueRuleRepr", into = "ValueRuleRepr")]
pub enum ValueRule {
    /// Every cell must be populated.
    NotNull,
    /// Every populated cell must come from this set.
    OneOf(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ValueRuleRepr {
    Keyword(String),
    Allowed(Vec<String>),
}

impl TryFrom<ValueRuleRepr> for ValueRule {
    type Error = String;

    fn try_from(repr: ValueRuleRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            ValueRuleRepr::Keyword(word) if word == "not_null" => Ok(Self::NotNull),
            ValueRuleRepr::Keyword(word) => Err(format!("unknown value check '{word}'")),
            ValueRuleRepr::Allowed(values) => Ok(Self::OneOf(values)),
        }
    }
}

impl From<ValueRule> for ValueRuleRepr {
    fn from(rule: ValueRule) -> Self {
        match rule {
            ValueRule::NotNull => Self::Keyword("not_null".to_string()),
            ValueRule::OneOf(values) => Self::Allowed(values),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueCheckRule {
    pub column: String,
    pub rule: ValueRule,
}

/// How a validated wide table is reshaped into long form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformConfig {
    /// No reshape; the table is exported as uploaded.
    #[default]
    None,
    /// The table is already long; one existing column holds the date axis.
    SingleDateColumn,
    /// Wide layout: every non-identity column header is a date label.
    DateColumnsAsHeaders {
        #[serde(default)]
        column_pattern: Option<String>,
        #[serde(default = "default_require_monday")]
        require_monday: bool,
        #[serde(default = "default_label_name")]
        label_name: String,
        #[serde(default = "default_value_name")]
        value_name: String,
    },
    /// Wide layout: a fixed identity set (which may mix date and dimension
    /// columns); every remaining column becomes a label/value pair.
    MultiDateIdColumns {
        id_columns: Vec<String>,
        label_name: String,
        value_name: String,
    },
}

fn default_require_monday() -> bool {
    true
}

fn default_label_name() -> String {
    "date".to_string()
}

fn default_value_name() -> String {
    "value".to_string()
}

/// Where a validated table is written, and by which registered sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSpec {
    pub destination: PathBuf,
    pub sink: String,
}

/// The full contract for one flat table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableRule {
    pub required_columns: Vec<String>,
    #[serde(default)]
    pub column_types: Vec<ColumnTypeRule>,
    #[serde(default)]
    pub date_columns: Vec<DateColumnSpec>,
    #[serde(default)]
    pub value_checks: Vec<ValueCheckRule>,
    #[serde(default)]
    pub transform: TransformConfig,
    /// When n > 0, the first n-1 data rows are dropped and the next row
    /// becomes the header row.
    #[serde(default)]
    pub skip_leading_rows: usize,
    /// Whole-rule fallback window, used when no per-column range applies.
    #[serde(default)]
    pub date_range: Option<DateRangeRule>,
    #[serde(default)]
    pub export: Option<ExportSpec>,
}

impl TableRule {
    pub fn new(required_columns: Vec<String>) -> Self {
        Self {
            required_columns,
            column_types: Vec::new(),
            date_columns: Vec::new(),
            value_checks: Vec::new(),
            transform: TransformConfig::None,
            skip_leading_rows: 0,
            date_range: None,
            export: None,
        }
    }

    pub fn column_kind(&self, column: &str) -> Option<ColumnKind> {
        self.column_types
            .iter()
            .find(|rule| rule.column == column)
            .map(|rule| rule.kind)
    }

    pub fn date_column(&self, column: &str) -> Option<&DateColumnSpec> {
        self.date_columns.iter().find(|spec| spec.column == column)
    }

    /// The date axis inferred for `SingleDateColumn` layouts: the first
    /// declared date column.
    pub fn inferred_date_column(&self) -> Option<&DateColumnSpec> {
        self.date_columns.first()
    }
}

/// One logical file type: a flat table or a set of named sheets.
///
/// The enum makes the "flat fields or sheets, never both" invariant
/// unrepresentable rather than checked at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "FileSpecRepr", into = "FileSpecRepr")]
pub enum FileSpec {
    Single(TableRule),
    Sheets(BTreeMap<String, TableRule>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum FileSpecRepr {
    Sheets { sheets: BTreeMap<String, TableRule> },
    Single(TableRule),
}

impl From<FileSpecRepr> for FileSpec {
    fn from(repr: FileSpecRepr) -> Self {
        match repr {
            FileSpecRepr::Sheets { sheets } => Self::Sheets(sheets),
            FileSpecRepr::Single(rule) => Self::Single(rule),
        }
    }
}

impl From<FileSpec> for FileSpecRepr {
    fn from(spec: FileSpec) -> Self {
        match spec {
            FileSpec::Sheets(sheets) => Self::Sheets { sheets },
            FileSpec::Single(rule) => Self::Single(rule),
        }
    }
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &NaiveDate,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_parses_known_labels() {
        assert_eq!(
            Frequency::try_from("weekly-monday".to_string()),
            Ok(Frequency::Weekly(Weekday::Mon))
        );
        assert_eq!(Frequency::try_from("daily".to_string()), Ok(Frequency::Daily));
        assert!(Frequency::try_from("fortnightly".to_string()).is_err());
    }

    #[test]
    fn range_offsets_shift_the_window() {
        let rule = DateRangeRule {
            start: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 18).unwrap(),
            start_offset_days: 0,
            end_offset_days: -1,
            frequency: Frequency::default(),
        };
        assert_eq!(
            rule.effective_end(),
            NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
        );
        assert_eq!(rule.to_string(), "2025-01-05..2025-01-17 (weekly-monday)");
    }
}
