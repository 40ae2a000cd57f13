//! Immutable catalogue of logical file types.
//!
//! The registry is built once at startup, either from the builtin set or
//! from a JSON document, and is never mutated afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::rule::{
    ColumnKind, ColumnTypeRule, DateColumnSpec, DateRangeRule, ExportSpec, FileSpec, Frequency,
    TableRule, TransformConfig, ValueCheckRule, ValueRule,
};

#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: BTreeMap<String, FileSpec>,
}

impl RuleRegistry {
    pub fn new(rules: BTreeMap<String, FileSpec>) -> Self {
        Self { rules }
    }

    pub fn get(&self, file_type: &str) -> Option<&FileSpec> {
        self.rules.get(file_type)
    }

    pub fn file_types(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileSpec)> {
        self.rules.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parse a registry from a JSON document mapping file type to spec.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let rules: BTreeMap<String, FileSpec> = serde_json::from_str(raw)?;
        Ok(Self { rules })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// The builtin workforce-planning rule set.
    pub fn builtin() -> Self {
        let mut rules = BTreeMap::new();

        rules.insert(
            "attrition".to_string(),
            FileSpec::Single(attrition_rule()),
        );
        rules.insert(
            "recruitment".to_string(),
            FileSpec::Single(weekly_count_rule("recruitment_count", "exports/recruitment.csv")),
        );
        rules.insert(
            "fte".to_string(),
            FileSpec::Single(weekly_count_rule("fte_count", "exports/fte.csv")),
        );
        rules.insert("fte_wide".to_string(), FileSpec::Single(fte_wide_rule()));
        rules.insert(
            "patch_mapping".to_string(),
            FileSpec::Single(patch_mapping_rule()),
        );
        rules.insert(
            "resource_allocation".to_string(),
            FileSpec::Single(resource_allocation_rule()),
        );

        let mut demand_sheets = BTreeMap::new();
        demand_sheets.insert(
            "Volume".to_string(),
            demand_sheet_rule("demand_jobs", "exports/demand_volume.csv"),
        );
        demand_sheets.insert(
            "Mix".to_string(),
            demand_sheet_rule("demand_hours", "exports/demand_mix.csv"),
        );
        rules.insert("demand".to_string(), FileSpec::Sheets(demand_sheets));

        Self { rules }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("builtin rule date is valid")
}

fn standard_week_range() -> DateRangeRule {
    DateRangeRule::weekly_monday(date(2025, 1, 6), date(2025, 1, 20))
}

fn job_type_check() -> ValueCheckRule {
    ValueCheckRule {
        column: "job_type".to_string(),
        rule: ValueRule::OneOf(vec!["A".to_string(), "B".to_string(), "C".to_string()]),
    }
}

fn not_null(column: &str) -> ValueCheckRule {
    ValueCheckRule {
        column: column.to_string(),
        rule: ValueRule::NotNull,
    }
}

fn csv_export(destination: &str) -> ExportSpec {
    ExportSpec {
        destination: destination.into(),
        sink: "csv".to_string(),
    }
}

/// Long-format weekly table with a `week` date axis, `job_type`, and one
/// numeric count column. Shared by `recruitment` and `fte`.
fn weekly_count_rule(count_column: &str, destination: &str) -> TableRule {
    TableRule {
        required_columns: vec![
            "week".to_string(),
            "job_type".to_string(),
            count_column.to_string(),
        ],
        column_types: vec![
            ColumnTypeRule {
                column: "week".to_string(),
                kind: ColumnKind::Date,
            },
            ColumnTypeRule {
                column: "job_type".to_string(),
                kind: ColumnKind::String,
            },
            ColumnTypeRule {
                column: count_column.to_string(),
                kind: ColumnKind::Numeric,
            },
        ],
        date_columns: vec![DateColumnSpec {
            column: "week".to_string(),
            pattern: Some("yyyy-mm-dd".to_string()),
            range: Some(standard_week_range()),
        }],
        value_checks: vec![not_null("week"), job_type_check(), not_null(count_column)],
        transform: TransformConfig::SingleDateColumn,
        skip_leading_rows: 0,
        date_range: None,
        export: Some(csv_export(destination)),
    }
}

fn attrition_rule() -> TableRule {
    let mut rule = weekly_count_rule("attrition_count", "exports/attrition.csv");
    rule.required_columns.push("hire_date".to_string());
    rule.column_types.push(ColumnTypeRule {
        column: "hire_date".to_string(),
        kind: ColumnKind::Date,
    });
    rule.date_columns.push(DateColumnSpec {
        column: "hire_date".to_string(),
        pattern: Some("yyyy/mm/dd".to_string()),
        range: Some(DateRangeRule {
            start: date(2025, 1, 5),
            end: date(2025, 1, 18),
            start_offset_days: 0,
            end_offset_days: -1,
            frequency: Frequency::default(),
        }),
    });
    rule.value_checks.push(not_null("hire_date"));
    rule.skip_leading_rows = 1;
    rule
}

fn fte_wide_rule() -> TableRule {
    TableRule {
        required_columns: vec!["job_type".to_string()],
        column_types: vec![ColumnTypeRule {
            column: "job_type".to_string(),
            kind: ColumnKind::String,
        }],
        date_columns: Vec::new(),
        value_checks: vec![job_type_check()],
        transform: TransformConfig::DateColumnsAsHeaders {
            column_pattern: Some("yyyy-mm-dd".to_string()),
            require_monday: true,
            label_name: "week".to_string(),
            value_name: "fte_count".to_string(),
        },
        skip_leading_rows: 0,
        date_range: Some(standard_week_range()),
        export: Some(csv_export("exports/fte_wide.csv")),
    }
}

fn patch_mapping_rule() -> TableRule {
    TableRule {
        required_columns: vec!["wmis".to_string(), "region".to_string()],
        column_types: vec![
            ColumnTypeRule {
                column: "wmis".to_string(),
                kind: ColumnKind::String,
            },
            ColumnTypeRule {
                column: "region".to_string(),
                kind: ColumnKind::String,
            },
        ],
        date_columns: Vec::new(),
        value_checks: vec![
            ValueCheckRule {
                column: "wmis".to_string(),
                rule: ValueRule::OneOf(vec![
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string(),
                ]),
            },
            ValueCheckRule {
                column: "region".to_string(),
                rule: ValueRule::OneOf(vec![
                    "North".to_string(),
                    "South".to_string(),
                    "East".to_string(),
                    "West".to_string(),
                ]),
            },
        ],
        transform: TransformConfig::None,
        skip_leading_rows: 0,
        date_range: None,
        export: Some(csv_export("exports/patch_mapping.csv")),
    }
}

fn resource_allocation_rule() -> TableRule {
    let date_columns = vec![
        DateColumnSpec {
            column: "date_1".to_string(),
            pattern: Some("dd/mm/yyyy".to_string()),
            range: None,
        },
        DateColumnSpec {
            column: "date_2".to_string(),
            pattern: Some("mmm-yy".to_string()),
            range: None,
        },
        DateColumnSpec {
            column: "date_3".to_string(),
            pattern: Some("mm/dd/yy".to_string()),
            range: None,
        },
    ];
    TableRule {
        required_columns: vec![
            "date_1".to_string(),
            "date_2".to_string(),
            "date_3".to_string(),
            "skill".to_string(),
        ],
        column_types: vec![
            ColumnTypeRule {
                column: "date_1".to_string(),
                kind: ColumnKind::Date,
            },
            ColumnTypeRule {
                column: "date_2".to_string(),
                kind: ColumnKind::Date,
            },
            ColumnTypeRule {
                column: "date_3".to_string(),
                kind: ColumnKind::Date,
            },
            ColumnTypeRule {
                column: "skill".to_string(),
                kind: ColumnKind::String,
            },
        ],
        date_columns,
        value_checks: vec![
            not_null("date_1"),
            not_null("date_2"),
            not_null("date_3"),
            ValueCheckRule {
                column: "skill".to_string(),
                rule: ValueRule::OneOf(vec!["MS".to_string(), "SS".to_string()]),
            },
        ],
        transform: TransformConfig::MultiDateIdColumns {
            id_columns: vec![
                "date_1".to_string(),
                "date_2".to_string(),
                "date_3".to_string(),
                "skill".to_string(),
            ],
            label_name: "city_name".to_string(),
            value_name: "allocation_value".to_string(),
        },
        skip_leading_rows: 0,
        date_range: None,
        export: Some(csv_export("exports/resource_allocation.csv")),
    }
}

fn demand_sheet_rule(value_name: &str, destination: &str) -> TableRule {
    TableRule {
        required_columns: vec!["job_type".to_string()],
        column_types: vec![
            ColumnTypeRule {
                column: "job_type".to_string(),
                kind: ColumnKind::String,
            },
            ColumnTypeRule {
                column: value_name.to_string(),
                kind: ColumnKind::Numeric,
            },
        ],
        date_columns: Vec::new(),
        value_checks: vec![job_type_check()],
        transform: TransformConfig::DateColumnsAsHeaders {
            column_pattern: Some("yyyy-mm-dd".to_string()),
            require_monday: true,
            label_name: "week".to_string(),
            value_name: value_name.to_string(),
        },
        skip_leading_rows: 0,
        date_range: Some(standard_week_range()),
        export: Some(csv_export(destination)),
    }
}
