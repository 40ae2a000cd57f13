//! Wide-to-long reshaping.
//!
//! A melted frame stacks one block per value column: with `n` input rows,
//! `m` value columns, and `k` identity columns, the output has `n × m`
//! rows and `k + 2` columns. The label column holds the original header
//! string untouched; date normalization happens later, just before export.

use polars::prelude::DataFrame;
use tracing::debug;
use wfp_model::{TableRule, TransformConfig};

use crate::cells::{build_frame, column_cells};
use crate::error::{Result, TransformError};

/// Reshapes a validated table per its transform configuration. Identity
/// for `None` and `SingleDateColumn`; a melt for the wide layouts. The
/// input frame is never mutated.
pub fn reshape(frame: &DataFrame, rule: &TableRule) -> Result<DataFrame> {
    match &rule.transform {
        TransformConfig::None | TransformConfig::SingleDateColumn => Ok(frame.clone()),
        TransformConfig::DateColumnsAsHeaders {
            label_name,
            value_name,
            ..
        } => melt(frame, &rule.required_columns, label_name, value_name),
        TransformConfig::MultiDateIdColumns {
            id_columns,
            label_name,
            value_name,
        } => melt(frame, id_columns, label_name, value_name),
    }
}

fn melt(
    frame: &DataFrame,
    id_columns: &[String],
    label_name: &str,
    value_name: &str,
) -> Result<DataFrame> {
    let all_names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    for id in id_columns {
        if !all_names.contains(id) {
            return Err(TransformError::MissingColumn(id.clone()));
        }
    }
    let value_columns: Vec<String> = all_names
        .iter()
        .filter(|name| !id_columns.contains(*name))
        .cloned()
        .collect();

    let height = frame.height();
    let blocks = value_columns.len();

    let mut ids: Vec<(String, Vec<Option<String>>)> = Vec::with_capacity(id_columns.len());
    for id in id_columns {
        let base = column_cells(frame, id)?;
        let mut stacked = Vec::with_capacity(height * blocks);
        for _ in 0..blocks {
            stacked.extend(base.iter().cloned());
        }
        ids.push((id.clone(), stacked));
    }

    let mut labels: Vec<Option<String>> = Vec::with_capacity(height * blocks);
    let mut values: Vec<Option<String>> = Vec::with_capacity(height * blocks);
    for header in &value_columns {
        labels.extend(std::iter::repeat_n(Some(header.clone()), height));
        values.extend(column_cells(frame, header)?);
    }

    let mut columns = ids;
    columns.push((label_name.to_string(), labels));
    columns.push((value_name.to_string(), values));

    let melted = build_frame(columns)?;
    debug!(
        input_rows = height,
        value_columns = blocks,
        output_rows = melted.height(),
        "melted wide frame"
    );
    Ok(melted)
}
