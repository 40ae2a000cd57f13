//! Date window reconciliation.
//!
//! For each declared window the upload's actual labels are compared with
//! the generated calendar. Missing labels are a hard failure naming every
//! absent label. Extra labels produce a warning only; validation keeps
//! going and the sheet can still pass.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tracing::warn;
use wfp_ingest::column_values;
use wfp_model::{DateRangeRule, TableRule, TransformConfig};
use wfp_transform::{compile_pattern, expected_labels, infer_date, iso};

use super::CheckError;

/// Runs every declared range in declaration order, then the rule-level
/// fallback window. Returns the combined extra-label warning, if any.
pub fn check(
    frame: &DataFrame,
    rule: &TableRule,
    file_id: &str,
) -> Result<Option<String>, CheckError> {
    if matches!(rule.transform, TransformConfig::None) {
        return Ok(None);
    }

    let mut warnings: Vec<String> = Vec::new();
    for spec in &rule.date_columns {
        let Some(range) = &spec.range else { continue };
        let actual = actual_labels(frame, rule, Some(&spec.column), file_id)?;
        reconcile(range, &actual, file_id, &mut warnings)?;
    }
    if let Some(range) = &rule.date_range {
        let inferred = rule.inferred_date_column().map(|spec| spec.column.as_str());
        let actual = actual_labels(frame, rule, inferred, file_id)?;
        reconcile(range, &actual, file_id, &mut warnings)?;
    }

    if warnings.is_empty() {
        Ok(None)
    } else {
        Ok(Some(warnings.join("; ")))
    }
}

fn reconcile(
    range: &DateRangeRule,
    actual: &BTreeSet<String>,
    file_id: &str,
    warnings: &mut Vec<String>,
) -> Result<(), CheckError> {
    let expected: BTreeSet<String> = expected_labels(range).into_iter().collect();
    let missing: Vec<&String> = expected.difference(actual).collect();
    if !missing.is_empty() {
        return Err(CheckError::new(format!(
            "{file_id}: Missing weeks {missing:?} from expected range {range}"
        )));
    }
    let extra: Vec<&String> = actual.difference(&expected).collect();
    if !extra.is_empty() {
        let warning =
            format!("{file_id}: Extra weeks {extra:?} beyond expected range {range}");
        warn!(%file_id, "{warning}");
        warnings.push(warning);
    }
    Ok(())
}

/// The upload's actual ISO labels: deduplicated parsed cells for long
/// layouts, parsed headers for wide layouts. Unparseable headers are kept
/// verbatim so they surface as extra labels.
fn actual_labels(
    frame: &DataFrame,
    rule: &TableRule,
    column: Option<&str>,
    file_id: &str,
) -> Result<BTreeSet<String>, CheckError> {
    let mut labels = BTreeSet::new();
    match &rule.transform {
        TransformConfig::SingleDateColumn | TransformConfig::MultiDateIdColumns { .. } => {
            let Some(column) = column else {
                return Ok(labels);
            };
            if frame.column(column).is_err() {
                return Ok(labels);
            }
            let pattern = rule
                .date_column(column)
                .and_then(|spec| spec.pattern.as_deref())
                .map(compile_pattern);
            let cells =
                column_values(frame, column).map_err(|err| CheckError::internal(file_id, &err))?;
            for cell in cells.iter().flatten() {
                let parsed = match &pattern {
                    Some(pattern) => pattern.parse(cell),
                    None => infer_date(cell),
                };
                if let Some(date) = parsed {
                    labels.insert(iso(date));
                }
            }
        }
        TransformConfig::DateColumnsAsHeaders { column_pattern, .. } => {
            let pattern = column
                .and_then(|name| rule.date_column(name))
                .and_then(|spec| spec.pattern.as_deref())
                .or(column_pattern.as_deref())
                .map(compile_pattern);
            for name in frame.get_column_names() {
                let header = name.as_str();
                if rule.required_columns.iter().any(|col| col.as_str() == header) {
                    continue;
                }
                let parsed = match &pattern {
                    Some(pattern) => pattern.parse(header),
                    None => infer_date(header),
                };
                match parsed {
                    Some(date) => labels.insert(iso(date)),
                    None => labels.insert(header.to_string()),
                };
            }
        }
        TransformConfig::None => {}
    }
    Ok(labels)
}
