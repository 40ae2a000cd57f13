use polars::prelude::DataFrame;
use wfp_ingest::{column_values, parse_numeric};
use wfp_model::{ColumnKind, TableRule};
use wfp_transform::{compile_pattern, infer_date};

use super::CheckError;

/// Checks each declared column type in declaration order. Columns the
/// upload does not carry are skipped; wide layouts declare their melted
/// value column here so it is typed after reshaping.
pub fn check(frame: &DataFrame, rule: &TableRule, file_id: &str) -> Result<(), CheckError> {
    for type_rule in &rule.column_types {
        let column = type_rule.column.as_str();
        if frame.column(column).is_err() {
            continue;
        }
        let cells =
            column_values(frame, column).map_err(|err| CheckError::internal(file_id, &err))?;
        match type_rule.kind {
            ColumnKind::Numeric => check_numeric(&cells, column, file_id)?,
            // String cells always render; kept for declaration completeness.
            ColumnKind::String => {}
            ColumnKind::Date => check_date(rule, &cells, column, file_id)?,
        }
    }
    Ok(())
}

fn check_numeric(
    cells: &[Option<String>],
    column: &str,
    file_id: &str,
) -> Result<(), CheckError> {
    for (idx, cell) in cells.iter().enumerate() {
        let Some(raw) = cell else { continue };
        if parse_numeric(raw).is_none() {
            return Err(CheckError::new(format!(
                "{file_id}: Column '{column}' has invalid numeric format. \
                 Found '{raw}' at row {}",
                idx + 1
            )));
        }
    }
    Ok(())
}

fn check_date(
    rule: &TableRule,
    cells: &[Option<String>],
    column: &str,
    file_id: &str,
) -> Result<(), CheckError> {
    let pattern = rule
        .date_column(column)
        .and_then(|spec| spec.pattern.as_deref())
        .map(compile_pattern);
    match pattern {
        Some(pattern) => {
            for (idx, cell) in cells.iter().enumerate() {
                let Some(raw) = cell else { continue };
                if pattern.parse(raw).is_none() {
                    return Err(CheckError::new(format!(
                        "{file_id}: Column '{column}' has invalid date format. \
                         Expected format '{pattern}'. Found '{raw}' at row {}",
                        idx + 1
                    )));
                }
            }
        }
        None => {
            for cell in cells {
                let Some(raw) = cell else { continue };
                if infer_date(raw).is_none() {
                    return Err(CheckError::new(format!(
                        "{file_id}: Column '{column}' has invalid type. Expected date."
                    )));
                }
            }
        }
    }
    Ok(())
}
