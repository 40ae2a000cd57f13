//! Per-cell and per-header date checks, branching on the transform kind.
//!
//! Row numbers in long-format messages count from the original file
//! including its header row, so cell index 0 reports as row 2.

use chrono::{Datelike, Weekday};
use polars::prelude::DataFrame;
use wfp_ingest::column_values;
use wfp_model::{ColumnKind, DateColumnSpec, TableRule, TransformConfig};
use wfp_transform::{DatePattern, compile_pattern, infer_date};

use super::CheckError;

pub fn check(frame: &DataFrame, rule: &TableRule, file_id: &str) -> Result<(), CheckError> {
    match &rule.transform {
        TransformConfig::None => Ok(()),
        TransformConfig::SingleDateColumn => {
            let Some(spec) = rule.inferred_date_column() else {
                return Ok(());
            };
            check_date_cells(frame, rule, spec, file_id)
        }
        TransformConfig::DateColumnsAsHeaders {
            column_pattern,
            require_monday,
            ..
        } => check_date_headers(frame, rule, column_pattern.as_deref(), *require_monday, file_id),
        TransformConfig::MultiDateIdColumns { id_columns, .. } => {
            for column in id_columns {
                if frame.column(column).is_err() {
                    return Err(CheckError::new(format!(
                        "{file_id}: Missing required ID column '{column}'"
                    )));
                }
                if rule.column_kind(column) != Some(ColumnKind::Date) {
                    continue;
                }
                if let Some(spec) = rule.date_column(column) {
                    check_date_cells(frame, rule, spec, file_id)?;
                }
            }
            Ok(())
        }
    }
}

/// Validates every populated cell of one date column; Monday membership
/// is enforced when the column's window is weekly Monday anchored.
fn check_date_cells(
    frame: &DataFrame,
    rule: &TableRule,
    spec: &DateColumnSpec,
    file_id: &str,
) -> Result<(), CheckError> {
    let column = spec.column.as_str();
    if frame.column(column).is_err() {
        return Ok(());
    }
    let cells = column_values(frame, column).map_err(|err| CheckError::internal(file_id, &err))?;
    let pattern = spec.pattern.as_deref().map(compile_pattern);
    let require_monday = spec
        .range
        .as_ref()
        .or(rule.date_range.as_ref())
        .is_some_and(|range| range.frequency.is_weekly_monday());

    for (idx, cell) in cells.iter().enumerate() {
        let Some(raw) = cell else { continue };
        let shown = pattern
            .as_ref()
            .map_or_else(|| raw.trim().to_string(), |p| p.truncate(raw).to_string());
        let parsed = match &pattern {
            Some(pattern) => pattern.parse(raw),
            None => infer_date(raw),
        };
        let Some(date) = parsed else {
            return Err(CheckError::new(format!(
                "{file_id}: Column '{column}' has invalid date '{shown}' at row {}",
                idx + 2
            )));
        };
        if require_monday && date.weekday() != Weekday::Mon {
            return Err(CheckError::new(format!(
                "{file_id}: Column '{column}' has non-Monday date '{shown}' at row {}",
                idx + 2
            )));
        }
    }
    Ok(())
}

/// Validates that every non-identity header parses as a date.
fn check_date_headers(
    frame: &DataFrame,
    rule: &TableRule,
    column_pattern: Option<&str>,
    require_monday: bool,
    file_id: &str,
) -> Result<(), CheckError> {
    let pattern: Option<DatePattern> = column_pattern.map(compile_pattern);
    for name in frame.get_column_names() {
        let header = name.as_str();
        if rule.required_columns.iter().any(|col| col.as_str() == header) {
            continue;
        }
        let parsed = match &pattern {
            Some(pattern) => pattern.parse(header),
            None => infer_date(header),
        };
        let Some(date) = parsed else {
            return Err(CheckError::new(format!(
                "{file_id}: Invalid date column '{header}'. Expected format {}",
                column_pattern.unwrap_or("ISO")
            )));
        };
        if require_monday && date.weekday() != Weekday::Mon {
            return Err(CheckError::new(format!(
                "{file_id}: Date column '{header}' is not a valid Monday"
            )));
        }
    }
    Ok(())
}
