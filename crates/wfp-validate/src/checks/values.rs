use polars::prelude::DataFrame;
use wfp_ingest::column_values;
use wfp_model::{TableRule, ValueRule};

use super::CheckError;

/// Per-column value constraints, in declaration order. `NotNull` fails on
/// the first empty cell; an allowed-value set fails on the first populated
/// cell outside it.
pub fn check(frame: &DataFrame, rule: &TableRule, file_id: &str) -> Result<(), CheckError> {
    for check in &rule.value_checks {
        let column = check.column.as_str();
        if frame.column(column).is_err() {
            continue;
        }
        let cells =
            column_values(frame, column).map_err(|err| CheckError::internal(file_id, &err))?;
        match &check.rule {
            ValueRule::NotNull => {
                if let Some(idx) = cells.iter().position(Option::is_none) {
                    return Err(CheckError::new(format!(
                        "{file_id}: Column '{column}' has null value at row {}",
                        idx + 1
                    )));
                }
            }
            ValueRule::OneOf(allowed) => {
                for (idx, cell) in cells.iter().enumerate() {
                    let Some(value) = cell else { continue };
                    if !allowed.contains(value) {
                        return Err(CheckError::new(format!(
                            "{file_id}: Column '{column}' has invalid value '{value}' \
                             at row {}. Allowed values: {allowed:?}",
                            idx + 1
                        )));
                    }
                }
            }
        }
    }
    Ok(())
}
