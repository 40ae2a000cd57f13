//! Validation of uploaded tables against declarative rules.
//!
//! Stages run in a fixed order — schema, column types, per-cell date
//! checks, date windows, value constraints — and the first failure wins.
//! Data problems never surface as `Err`; they become a failed
//! [`ValidationOutcome`] carrying the user-facing message.

pub mod checks;

use polars::prelude::DataFrame;
use tracing::debug;
use wfp_model::{TableRule, ValidationOutcome};

use checks::CheckError;

/// Validates one table (or one sheet) against its rule. The `file_id` is
/// the caller's label for the upload and prefixes every message.
pub fn validate_table(frame: &DataFrame, rule: &TableRule, file_id: &str) -> ValidationOutcome {
    match run_stages(frame, rule, file_id) {
        Ok(None) => ValidationOutcome::pass(format!("{file_id}: Sheet is valid")),
        Ok(Some(warning)) => {
            ValidationOutcome::pass(format!("{file_id}: Sheet is valid (with warning)"))
                .with_warning(warning)
        }
        Err(err) => {
            debug!(%file_id, message = %err.message, "validation failed");
            ValidationOutcome::fail(err.message)
        }
    }
}

fn run_stages(
    frame: &DataFrame,
    rule: &TableRule,
    file_id: &str,
) -> Result<Option<String>, CheckError> {
    checks::schema::check(frame, rule, file_id)?;
    checks::datatype::check(frame, rule, file_id)?;
    checks::periodicity::check(frame, rule, file_id)?;
    let warning = checks::daterange::check(frame, rule, file_id)?;
    checks::values::check(frame, rule, file_id)?;
    Ok(warning)
}
