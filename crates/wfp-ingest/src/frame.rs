//! Polars AnyValue and frame utility functions.
//!
//! Upload frames are string-typed end to end; these helpers convert cells
//! to strings, detect missing values, and build frames from column vectors.

use polars::prelude::*;

/// Converts a Polars AnyValue to its String representation.
/// Returns an empty string for Null.
pub fn value_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => f64::from(v).to_string(),
        AnyValue::Float64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// True when the cell is null or holds only whitespace.
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Extracts one column as optional strings, empty cells mapped to None.
pub fn column_values(frame: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = frame.column(name)?;
    let mut values = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        let cell = column.get(idx).unwrap_or(AnyValue::Null);
        if is_missing(&cell) {
            values.push(None);
        } else {
            values.push(Some(value_to_string(cell)));
        }
    }
    Ok(values)
}

/// Builds a string-typed frame from named column vectors.
pub fn frame_from_columns(
    columns: Vec<(String, Vec<Option<String>>)>,
) -> PolarsResult<DataFrame> {
    let series: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into())
        .collect();
    DataFrame::new(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_detects_null_and_blank() {
        assert!(is_missing(&AnyValue::Null));
        assert!(is_missing(&AnyValue::String("  ")));
        assert!(!is_missing(&AnyValue::String("0")));
    }

    #[test]
    fn numeric_parse_rejects_text() {
        assert_eq!(parse_numeric("12.5"), Some(12.5));
        assert_eq!(parse_numeric(" 7 "), Some(7.0));
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric(""), None);
    }
}
