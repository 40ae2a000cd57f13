use polars::prelude::DataFrame;
use wfp_model::TableRule;

use super::CheckError;

/// Every required column must be present. Extra columns are allowed;
/// wide layouts carry their date axis in the headers.
pub fn check(frame: &DataFrame, rule: &TableRule, file_id: &str) -> Result<(), CheckError> {
    let present: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let missing = rule
        .required_columns
        .iter()
        .any(|required| !present.contains(required));
    if missing {
        return Err(CheckError::new(format!(
            "{file_id}: Invalid columns. Expected {:?}, got {:?}",
            rule.required_columns, present
        )));
    }
    Ok(())
}
