//! Cell-level frame helpers shared by the reshaping and normalization
//! passes. Upload frames are string-typed; these keep that invariant.

use polars::prelude::*;

pub fn cell_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

pub fn is_blank(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// One column as optional strings, blank cells mapped to None.
pub fn column_cells(frame: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = frame.column(name)?;
    let mut cells = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        if is_blank(&value) {
            cells.push(None);
        } else {
            cells.push(Some(cell_to_string(value)));
        }
    }
    Ok(cells)
}

pub fn build_frame(columns: Vec<(String, Vec<Option<String>>)>) -> PolarsResult<DataFrame> {
    let series: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into())
        .collect();
    DataFrame::new(series)
}
