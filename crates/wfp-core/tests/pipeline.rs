use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use polars::prelude::*;
use wfp_core::{ValidateRequest, validate_file};
use wfp_export::{ExportError, ExportRegistry, ExportSink};
use wfp_ingest::{LogicalFile, value_to_string};
use wfp_model::{FileSpec, RuleRegistry, TableRule};

fn frame(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
    let series: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            let owned: Vec<Option<String>> = values
                .into_iter()
                .map(|value| value.map(str::to_string))
                .collect();
            Series::new(name.into(), owned).into()
        })
        .collect();
    DataFrame::new(series).expect("build test frame")
}

fn cell(frame: &DataFrame, name: &str, idx: usize) -> String {
    value_to_string(frame.column(name).unwrap().get(idx).unwrap())
}

#[derive(Default)]
struct RecordingSink {
    calls: Mutex<Vec<(String, PathBuf, DataFrame)>>,
    fail: bool,
}

impl RecordingSink {
    fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn calls(&self) -> Vec<(String, PathBuf, DataFrame)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ExportSink for RecordingSink {
    fn export(
        &self,
        frame: &DataFrame,
        destination: &Path,
        file_id: &str,
    ) -> Result<(), ExportError> {
        self.calls
            .lock()
            .unwrap()
            .push((file_id.to_string(), destination.to_path_buf(), frame.clone()));
        if self.fail {
            Err(ExportError::Message("sink unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

fn registry_with(sink: &Arc<RecordingSink>) -> ExportRegistry {
    ExportRegistry::new().with_sink("csv", Arc::clone(sink) as Arc<dyn ExportSink>)
}

fn builtin_spec(file_type: &str) -> FileSpec {
    RuleRegistry::builtin()
        .get(file_type)
        .expect("builtin spec")
        .clone()
}

fn demand_upload() -> LogicalFile {
    let sheet = |values: [&str; 2]| {
        frame(vec![
            ("job_type", vec![Some("A"), Some("B")]),
            ("2025-01-06", vec![Some(values[0]), Some(values[1])]),
            ("2025-01-13", vec![Some("3"), Some("4")]),
            ("2025-01-20", vec![Some("5"), Some("6")]),
        ])
    };
    let mut sheets = BTreeMap::new();
    sheets.insert("Volume".to_string(), sheet(["1", "2"]));
    sheets.insert("Mix".to_string(), sheet(["7", "8"]));
    LogicalFile::Sheets(sheets)
}

#[test]
fn multi_sheet_upload_exports_every_sheet_with_one_key() {
    let sink = Arc::new(RecordingSink::default());
    let exports = registry_with(&sink);
    let mut request = ValidateRequest::new("demand", "demand_week3.xlsx");
    request.remarks = "week 3 load".to_string();

    let outcome = validate_file(&demand_upload(), &builtin_spec("demand"), &request, &exports);
    assert!(outcome.valid, "unexpected failure: {}", outcome.message);
    assert_eq!(outcome.message, "demand: Sheets Mix, Volume valid and exported");

    let calls = sink.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "demand - Mix");
    assert_eq!(calls[1].0, "demand - Volume");
    assert_eq!(calls[0].1, PathBuf::from("exports/demand_mix.csv"));

    // Both sheets carry the same generated key and the remarks text.
    let mix_key = cell(&calls[0].2, "key", 0);
    let volume_key = cell(&calls[1].2, "key", 0);
    assert!(mix_key.starts_with("demand_week3_"), "got: {mix_key}");
    assert_eq!(mix_key, volume_key);
    assert_eq!(cell(&calls[0].2, "Remarks", 0), "week 3 load");

    // Melted shape: 2 rows x 3 date columns, id + week + value + 3 metadata.
    assert_eq!(calls[0].2.height(), 6);
    assert_eq!(calls[0].2.width(), 6);
    assert_eq!(cell(&calls[0].2, "week", 0), "2025-01-06");
    assert_eq!(cell(&calls[0].2, "demand_hours", 0), "7");
}

#[test]
fn one_bad_sheet_blocks_every_export() {
    let sink = Arc::new(RecordingSink::default());
    let exports = registry_with(&sink);
    let request = ValidateRequest::new("demand", "demand.xlsx");

    let LogicalFile::Sheets(mut sheets) = demand_upload() else {
        unreachable!()
    };
    sheets.insert(
        "Volume".to_string(),
        frame(vec![
            ("job_type", vec![Some("Z")]),
            ("2025-01-06", vec![Some("1")]),
            ("2025-01-13", vec![Some("2")]),
            ("2025-01-20", vec![Some("3")]),
        ]),
    );
    let upload = LogicalFile::Sheets(sheets);

    let outcome = validate_file(&upload, &builtin_spec("demand"), &request, &exports);
    assert!(!outcome.valid);
    assert!(
        outcome.message.starts_with("demand - Volume: Column 'job_type'"),
        "got: {}",
        outcome.message
    );
    assert!(sink.calls().is_empty(), "no sheet may be exported");
}

#[test]
fn missing_sheet_fails_before_any_validation_output() {
    let sink = Arc::new(RecordingSink::default());
    let exports = registry_with(&sink);
    let request = ValidateRequest::new("demand", "demand.xlsx");

    let LogicalFile::Sheets(mut sheets) = demand_upload() else {
        unreachable!()
    };
    sheets.remove("Mix");
    let upload = LogicalFile::Sheets(sheets);

    let outcome = validate_file(&upload, &builtin_spec("demand"), &request, &exports);
    assert!(!outcome.valid);
    assert_eq!(
        outcome.message,
        "demand: Missing required sheet 'Mix' in upload."
    );
    assert!(sink.calls().is_empty());
}

#[test]
fn flat_upload_against_sheet_spec_is_rejected() {
    let sink = Arc::new(RecordingSink::default());
    let exports = registry_with(&sink);
    let request = ValidateRequest::new("demand", "demand.csv");

    let upload = LogicalFile::Table(frame(vec![("job_type", vec![Some("A")])]));
    let outcome = validate_file(&upload, &builtin_spec("demand"), &request, &exports);
    assert!(!outcome.valid);
    assert!(
        outcome.message.contains("not multi-sheet"),
        "got: {}",
        outcome.message
    );
}

#[test]
fn single_upload_is_annotated_and_exported() {
    let sink = Arc::new(RecordingSink::default());
    let exports = registry_with(&sink);
    let mut request = ValidateRequest::new("patch_mapping", "patches.csv");
    request.key = Some("patches_fixed_key".to_string());

    let upload = LogicalFile::Table(frame(vec![
        ("wmis", vec![Some("A"), Some("B")]),
        ("region", vec![Some("North"), Some("South")]),
    ]));
    let outcome = validate_file(&upload, &builtin_spec("patch_mapping"), &request, &exports);
    assert!(outcome.valid, "unexpected failure: {}", outcome.message);
    assert_eq!(outcome.message, "patch_mapping: File is valid and exported");

    let calls = sink.calls();
    assert_eq!(calls.len(), 1);
    let exported = &calls[0].2;
    // Caller key wins over the generated one.
    assert_eq!(cell(exported, "key", 1), "patches_fixed_key");
    assert!(exported.column("Last Update").is_ok());
    assert!(exported.column("Remarks").is_ok());
}

#[test]
fn export_failure_reports_invalid_with_warning() {
    let sink = Arc::new(RecordingSink::failing());
    let exports = registry_with(&sink);
    let request = ValidateRequest::new("patch_mapping", "patches.csv");

    let upload = LogicalFile::Table(frame(vec![
        ("wmis", vec![Some("A")]),
        ("region", vec![Some("North")]),
    ]));
    let outcome = validate_file(&upload, &builtin_spec("patch_mapping"), &request, &exports);
    assert!(!outcome.valid);
    assert!(
        outcome.message.contains("export failed"),
        "got: {}",
        outcome.message
    );
    assert_eq!(outcome.warning.as_deref(), Some("Export failed"));
}

#[test]
fn unregistered_sink_skips_the_export() {
    let exports = ExportRegistry::new();
    let request = ValidateRequest::new("patch_mapping", "patches.csv");

    let upload = LogicalFile::Table(frame(vec![
        ("wmis", vec![Some("A")]),
        ("region", vec![Some("North")]),
    ]));
    let outcome = validate_file(&upload, &builtin_spec("patch_mapping"), &request, &exports);
    assert!(!outcome.valid);
    assert!(
        outcome.message.contains("sink 'csv' is not registered"),
        "got: {}",
        outcome.message
    );
    assert_eq!(outcome.warning.as_deref(), Some("Export skipped"));
}

#[test]
fn rule_without_destination_is_valid_but_not_exported() {
    let sink = Arc::new(RecordingSink::default());
    let exports = registry_with(&sink);
    let request = ValidateRequest::new("patch_mapping", "patches.csv");

    let FileSpec::Single(rule) = builtin_spec("patch_mapping") else {
        unreachable!()
    };
    let stripped = TableRule {
        export: None,
        ..rule
    };
    let upload = LogicalFile::Table(frame(vec![
        ("wmis", vec![Some("A")]),
        ("region", vec![Some("North")]),
    ]));
    let outcome = validate_file(
        &upload,
        &FileSpec::Single(stripped),
        &request,
        &exports,
    );
    assert!(!outcome.valid);
    assert!(
        outcome.message.contains("no export destination defined"),
        "got: {}",
        outcome.message
    );
    assert_eq!(outcome.warning.as_deref(), Some("Export skipped"));
    assert!(sink.calls().is_empty());
}

#[test]
fn leading_title_row_is_skipped_before_validation() {
    let sink = Arc::new(RecordingSink::default());
    let exports = registry_with(&sink);
    let request = ValidateRequest::new("attrition", "attrition.csv");

    // Row 0 is a report title; the real headers sit underneath.
    let upload = LogicalFile::Table(frame(vec![
        (
            "Attrition report",
            vec![Some("week"), Some("2025-01-06"), Some("2025-01-13"), Some("2025-01-20")],
        ),
        (
            "c2",
            vec![Some("job_type"), Some("A"), Some("B"), Some("C")],
        ),
        (
            "c3",
            vec![Some("attrition_count"), Some("1"), Some("2"), Some("3")],
        ),
        (
            "c4",
            vec![
                Some("hire_date"),
                Some("2025/01/06"),
                Some("2025/01/13"),
                Some("2025/01/06"),
            ],
        ),
    ]));
    let outcome = validate_file(&upload, &builtin_spec("attrition"), &request, &exports);
    assert!(outcome.valid, "unexpected failure: {}", outcome.message);

    let calls = sink.calls();
    assert_eq!(calls.len(), 1);
    // Exported dates are normalized to ISO regardless of input pattern.
    assert_eq!(cell(&calls[0].2, "hire_date", 0), "2025-01-06");
}
