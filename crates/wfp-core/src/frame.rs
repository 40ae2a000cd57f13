//! Leading-row handling for uploads whose real header row is not first.

use polars::prelude::*;
use wfp_ingest::{is_missing, value_to_string};

/// Applies a rule's `skip_leading_rows` offset: with `n > 0`, the first
/// `n - 1` data rows are dropped, the next row becomes the header row,
/// and the remainder is the data. `n = 0` returns the frame as read.
pub fn apply_header_offset(frame: &DataFrame, skip_leading_rows: usize) -> PolarsResult<DataFrame> {
    if skip_leading_rows == 0 {
        return Ok(frame.clone());
    }
    let header_row = skip_leading_rows - 1;
    if frame.height() <= header_row {
        return DataFrame::new(Vec::new());
    }

    let old_names = frame.get_column_names_owned();
    let mut columns: Vec<(String, Vec<Option<String>>)> = Vec::with_capacity(old_names.len());
    for name in &old_names {
        let column = frame.column(name.as_str())?;
        let header_cell = column.get(header_row).unwrap_or(AnyValue::Null);
        let header = value_to_string(header_cell);

        let mut values = Vec::with_capacity(frame.height() - header_row - 1);
        for idx in (header_row + 1)..frame.height() {
            let cell = column.get(idx).unwrap_or(AnyValue::Null);
            if is_missing(&cell) {
                values.push(None);
            } else {
                values.push(Some(value_to_string(cell)));
            }
        }
        columns.push((header, values));
    }

    let series: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into())
        .collect();
    DataFrame::new(series)
}
