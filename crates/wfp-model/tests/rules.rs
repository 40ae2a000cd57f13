use chrono::{NaiveDate, Weekday};
use wfp_model::{
    ColumnKind, FileSpec, Frequency, RuleRegistry, TableRule, TransformConfig, ValueRule,
};

fn single<'a>(registry: &'a RuleRegistry, file_type: &str) -> &'a TableRule {
    match registry.get(file_type) {
        Some(FileSpec::Single(rule)) => rule,
        other => panic!("expected single-table spec for {file_type}, got {other:?}"),
    }
}

#[test]
fn builtin_registry_lists_all_file_types() {
    let registry = RuleRegistry::builtin();
    let types: Vec<&str> = registry.file_types().collect();
    assert_eq!(
        types,
        vec![
            "attrition",
            "demand",
            "fte",
            "fte_wide",
            "patch_mapping",
            "recruitment",
            "resource_allocation",
        ]
    );
}

#[test]
fn attrition_carries_header_offset_and_shifted_hire_window() {
    let registry = RuleRegistry::builtin();
    let rule = single(&registry, "attrition");

    assert_eq!(rule.skip_leading_rows, 1);
    assert_eq!(
        rule.required_columns,
        vec!["week", "job_type", "attrition_count", "hire_date"]
    );
    assert_eq!(rule.column_kind("hire_date"), Some(ColumnKind::Date));

    let hire = rule.date_column("hire_date").expect("hire_date spec");
    assert_eq!(hire.pattern.as_deref(), Some("yyyy/mm/dd"));
    let range = hire.range.as_ref().expect("hire_date range");
    assert_eq!(range.end_offset_days, -1);
    assert_eq!(
        range.effective_end(),
        NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
    );

    // The first declared date column is the inferred long-format axis.
    assert_eq!(rule.inferred_date_column().unwrap().column, "week");
}

#[test]
fn demand_is_a_two_sheet_spec_with_monday_headers() {
    let registry = RuleRegistry::builtin();
    let sheets = match registry.get("demand") {
        Some(FileSpec::Sheets(sheets)) => sheets,
        other => panic!("expected sheet spec, got {other:?}"),
    };
    let names: Vec<&str> = sheets.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Mix", "Volume"]);

    let volume = &sheets["Volume"];
    match &volume.transform {
        TransformConfig::DateColumnsAsHeaders {
            column_pattern,
            require_monday,
            label_name,
            value_name,
        } => {
            assert_eq!(column_pattern.as_deref(), Some("yyyy-mm-dd"));
            assert!(require_monday);
            assert_eq!(label_name, "week");
            assert_eq!(value_name, "demand_jobs");
        }
        other => panic!("unexpected transform {other:?}"),
    }
    assert!(volume.date_range.is_some());
}

#[test]
fn registry_round_trips_through_json() {
    let registry = RuleRegistry::builtin();
    let rules: std::collections::BTreeMap<&str, &FileSpec> = registry.iter().collect();
    let raw = serde_json::to_string(&rules).expect("serialize registry");

    let reparsed = RuleRegistry::from_json_str(&raw).expect("reparse registry");
    assert_eq!(reparsed.len(), registry.len());

    let allocation = single(&reparsed, "resource_allocation");
    match &allocation.transform {
        TransformConfig::MultiDateIdColumns {
            id_columns,
            label_name,
            value_name,
        } => {
            assert_eq!(id_columns, &["date_1", "date_2", "date_3", "skill"]);
            assert_eq!(label_name, "city_name");
            assert_eq!(value_name, "allocation_value");
        }
        other => panic!("unexpected transform {other:?}"),
    }
    let skill_check = allocation
        .value_checks
        .iter()
        .find(|check| check.column == "skill")
        .expect("skill check");
    assert_eq!(
        skill_check.rule,
        ValueRule::OneOf(vec!["MS".to_string(), "SS".to_string()])
    );
}

#[test]
fn value_rules_parse_from_keyword_or_list() {
    let not_null: ValueRule = serde_json::from_str("\"not_null\"").unwrap();
    assert_eq!(not_null, ValueRule::NotNull);

    let one_of: ValueRule = serde_json::from_str("[\"A\",\"B\"]").unwrap();
    assert_eq!(one_of, ValueRule::OneOf(vec!["A".into(), "B".into()]));

    assert!(serde_json::from_str::<ValueRule>("\"unique\"").is_err());
}

#[test]
fn frequency_defaults_to_weekly_monday() {
    assert_eq!(Frequency::default(), Frequency::Weekly(Weekday::Mon));
    assert!(Frequency::default().is_weekly_monday());
    assert!(!Frequency::Daily.is_weekly_monday());
}
