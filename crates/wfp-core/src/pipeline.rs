//! End-to-end orchestration for one uploaded logical file.
//!
//! A file flows through header offsetting, the validation stages,
//! reshaping, key and metadata annotation, date normalization, and
//! finally its export sink. For multi-sheet files the flow is atomic:
//! every sheet must validate and every sink must resolve before the
//! first row is exported, and all sheets share one identity key.

use std::path::PathBuf;
use std::sync::Arc;

use polars::prelude::{DataFrame, PolarsError};
use tracing::{debug, warn};
use wfp_export::{ExportRegistry, ExportSink};
use wfp_ingest::LogicalFile;
use wfp_model::{FileSpec, TableRule, ValidationOutcome};
use wfp_transform::{normalize_dates_for_export, reshape};
use wfp_validate::validate_table;

use crate::frame::apply_header_offset;
use crate::keying::{Annotations, annotate, generate_key};

/// One validation request: the upload's label, original filename, free
/// remarks, and an optional caller-supplied identity key.
#[derive(Debug, Clone)]
pub struct ValidateRequest {
    pub file_id: String,
    pub filename: String,
    pub remarks: String,
    pub key: Option<String>,
}

impl ValidateRequest {
    pub fn new(file_id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            filename: filename.into(),
            remarks: String::new(),
            key: None,
        }
    }
}

/// Validates one logical file and, when fully valid, exports it.
pub fn validate_file(
    upload: &LogicalFile,
    spec: &FileSpec,
    request: &ValidateRequest,
    exports: &ExportRegistry,
) -> ValidationOutcome {
    match spec {
        FileSpec::Single(rule) => validate_single(upload, rule, request, exports),
        FileSpec::Sheets(sheets) => validate_sheets(upload, sheets, request, exports),
    }
}

fn internal_fail(file_id: &str, err: &PolarsError) -> ValidationOutcome {
    warn!(%file_id, error = %err, "pipeline frame error");
    ValidationOutcome::fail(format!("{file_id}: internal error while processing: {err}"))
}

fn validate_single(
    upload: &LogicalFile,
    rule: &TableRule,
    request: &ValidateRequest,
    exports: &ExportRegistry,
) -> ValidationOutcome {
    let file_id = request.file_id.as_str();
    let LogicalFile::Table(raw) = upload else {
        return ValidationOutcome::fail(format!(
            "{file_id}: Expected a single-table upload, but uploaded data has sheets."
        ));
    };

    let frame = match apply_header_offset(raw, rule.skip_leading_rows) {
        Ok(frame) => frame,
        Err(err) => return internal_fail(file_id, &err),
    };

    let outcome = validate_table(&frame, rule, file_id);
    if !outcome.valid {
        return outcome;
    }
    let validation_warning = outcome.warning;
    debug!(%file_id, "sheet validated, preparing export");

    let reshaped = match reshape(&frame, rule) {
        Ok(frame) => frame,
        Err(err) => {
            return ValidationOutcome::fail(format!(
                "{file_id}: internal error while reshaping: {err}"
            ));
        }
    };
    let key = request
        .key
        .clone()
        .unwrap_or_else(|| generate_key(&request.filename));
    let annotations = Annotations::new(key, request.remarks.clone());
    let annotated = match annotate(&reshaped, &annotations) {
        Ok(frame) => frame,
        Err(err) => return internal_fail(file_id, &err),
    };

    let Some(export) = &rule.export else {
        return ValidationOutcome::fail(format!(
            "{file_id}: File is valid but no export destination defined"
        ))
        .with_warning("Export skipped");
    };
    let Some(sink) = exports.get(&export.sink) else {
        return ValidationOutcome::fail(format!(
            "{file_id}: File is valid but export sink '{}' is not registered",
            export.sink
        ))
        .with_warning("Export skipped");
    };

    match export_frame(&annotated, rule, &export.destination, sink, file_id) {
        Ok(()) => {
            let outcome =
                ValidationOutcome::pass(format!("{file_id}: File is valid and exported"));
            match validation_warning {
                Some(warning) => outcome.with_warning(warning),
                None => outcome,
            }
        }
        Err(message) => ValidationOutcome::fail(message).with_warning("Export failed"),
    }
}

fn validate_sheets(
    upload: &LogicalFile,
    sheets: &std::collections::BTreeMap<String, TableRule>,
    request: &ValidateRequest,
    exports: &ExportRegistry,
) -> ValidationOutcome {
    let file_id = request.file_id.as_str();
    let sheet_names: Vec<&str> = sheets.keys().map(String::as_str).collect();
    let LogicalFile::Sheets(uploaded) = upload else {
        return ValidationOutcome::fail(format!(
            "{file_id}: Expected an upload with sheets {sheet_names:?}, \
             but uploaded data is not multi-sheet."
        ));
    };

    // One key and one timestamp for the whole file.
    let key = request
        .key
        .clone()
        .unwrap_or_else(|| generate_key(&request.filename));
    let annotations = Annotations::new(key, request.remarks.clone());

    let mut warnings: Vec<String> = Vec::new();
    let mut transformed: Vec<(&str, &TableRule, DataFrame)> = Vec::new();
    for (sheet_name, rule) in sheets {
        let Some(raw) = uploaded.get(sheet_name) else {
            return ValidationOutcome::fail(format!(
                "{file_id}: Missing required sheet '{sheet_name}' in upload."
            ));
        };
        let frame = match apply_header_offset(raw, rule.skip_leading_rows) {
            Ok(frame) => frame,
            Err(err) => return internal_fail(file_id, &err),
        };

        let outcome = validate_table(&frame, rule, &format!("{file_id} - {sheet_name}"));
        if !outcome.valid {
            return outcome;
        }
        if let Some(warning) = outcome.warning {
            warnings.push(warning);
        }

        let reshaped = match reshape(&frame, rule) {
            Ok(frame) => frame,
            Err(err) => {
                return ValidationOutcome::fail(format!(
                    "{file_id}: internal error while reshaping '{sheet_name}': {err}"
                ));
            }
        };
        let annotated = match annotate(&reshaped, &annotations) {
            Ok(frame) => frame,
            Err(err) => return internal_fail(file_id, &err),
        };
        transformed.push((sheet_name.as_str(), rule, annotated));
    }

    // Resolve every sink before exporting anything.
    let mut resolved: Vec<(&str, &TableRule, &DataFrame, &PathBuf, &Arc<dyn ExportSink>)> =
        Vec::new();
    for (sheet_name, rule, frame) in &transformed {
        let sink = rule
            .export
            .as_ref()
            .and_then(|export| exports.get(&export.sink).map(|sink| (export, sink)));
        let Some((export, sink)) = sink else {
            return ValidationOutcome::fail(format!(
                "{file_id}: Sheets valid but some export sinks are not registered"
            ))
            .with_warning("Export skipped");
        };
        resolved.push((*sheet_name, *rule, frame, &export.destination, sink));
    }

    let mut all_exported = true;
    for (sheet_name, rule, frame, destination, sink) in resolved {
        let sheet_id = format!("{file_id} - {sheet_name}");
        if let Err(message) = export_frame(frame, rule, destination, sink, &sheet_id) {
            warn!(%file_id, sheet = sheet_name, "{message}");
            all_exported = false;
        }
    }

    let listed = sheet_names.join(", ");
    if all_exported {
        let outcome =
            ValidationOutcome::pass(format!("{file_id}: Sheets {listed} valid and exported"));
        if warnings.is_empty() {
            outcome
        } else {
            outcome.with_warning(warnings.join("; "))
        }
    } else {
        ValidationOutcome::fail(format!(
            "{file_id}: Sheets {listed} valid but some exports failed"
        ))
        .with_warning("Export failed")
    }
}

fn export_frame(
    frame: &DataFrame,
    rule: &TableRule,
    destination: &std::path::Path,
    sink: &Arc<dyn ExportSink>,
    file_id: &str,
) -> Result<(), String> {
    let normalized = normalize_dates_for_export(frame, rule)
        .map_err(|err| format!("{file_id}: internal error while normalizing dates: {err}"))?;
    sink.export(&normalized, destination, file_id)
        .map_err(|err| format!("{file_id}: File is valid but export failed: {err}"))
}
