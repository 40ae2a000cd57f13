//! Every shipped template must validate cleanly against its builtin rule.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use wfp_cli::samples::template_files;
use wfp_core::apply_header_offset;
use wfp_ingest::read_csv_frame;
use wfp_model::{FileSpec, RuleRegistry, TableRule};
use wfp_validate::validate_table;

fn read_template(contents: &str) -> DataFrame {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("template.csv");
    std::fs::write(&path, contents).expect("write template");
    read_csv_frame(&path).expect("read template")
}

fn assert_sheet_valid(contents: &str, rule: &TableRule, file_id: &str) {
    let raw = read_template(contents);
    let frame = apply_header_offset(&raw, rule.skip_leading_rows).expect("header offset");
    let outcome = validate_table(&frame, rule, file_id);
    assert!(
        outcome.valid,
        "template for {file_id} failed: {}",
        outcome.message
    );
}

#[test]
fn builtin_templates_validate_against_their_rules() {
    let registry = RuleRegistry::builtin();
    for (file_type, spec) in registry.iter() {
        let files = template_files(file_type)
            .unwrap_or_else(|| panic!("no template for builtin type {file_type}"));
        match spec {
            FileSpec::Single(rule) => {
                assert_eq!(files.len(), 1);
                assert_sheet_valid(&files[0].1, rule, file_type);
            }
            FileSpec::Sheets(sheets) => {
                let by_name: BTreeMap<&str, &str> = files
                    .iter()
                    .map(|(name, contents)| (name.as_str(), contents.as_str()))
                    .collect();
                for (sheet_name, rule) in sheets {
                    let file_name = format!("{file_type}_{sheet_name}.csv");
                    let contents = by_name
                        .get(file_name.as_str())
                        .unwrap_or_else(|| panic!("missing template {file_name}"));
                    assert_sheet_valid(contents, rule, &format!("{file_type} - {sheet_name}"));
                }
            }
        }
    }
}

#[test]
fn unknown_type_has_no_template() {
    assert!(template_files("headcount").is_none());
}
