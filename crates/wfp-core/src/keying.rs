//! Identity key and export metadata columns.

use chrono::Local;
use polars::prelude::*;
use std::path::Path;

/// Key for one upload: the filename stem plus an upload timestamp. All
/// sheets of a multi-sheet file share one key.
pub fn generate_key(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    format!("{stem}_{}", Local::now().format("%Y%m%d%H%M%S"))
}

/// Metadata stamped onto every exported row.
#[derive(Debug, Clone)]
pub struct Annotations {
    pub key: String,
    pub remarks: String,
    pub last_update: String,
}

impl Annotations {
    /// Captures the last-update timestamp once; reused across sheets so a
    /// multi-sheet export carries one consistent value.
    pub fn new(key: String, remarks: String) -> Self {
        Self {
            key,
            remarks,
            last_update: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Appends the `key`, `Remarks`, and `Last Update` columns.
pub fn annotate(frame: &DataFrame, annotations: &Annotations) -> PolarsResult<DataFrame> {
    let height = frame.height();
    let mut annotated = frame.clone();
    annotated.with_column(Series::new(
        "key".into(),
        vec![annotations.key.clone(); height],
    ))?;
    annotated.with_column(Series::new(
        "Remarks".into(),
        vec![annotations.remarks.clone(); height],
    ))?;
    annotated.with_column(Series::new(
        "Last Update".into(),
        vec![annotations.last_update.clone(); height],
    ))?;
    Ok(annotated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_uses_the_filename_stem() {
        let key = generate_key("uploads/fte_report.csv");
        assert!(key.starts_with("fte_report_"), "got: {key}");
        let suffix = key.trim_start_matches("fte_report_");
        assert_eq!(suffix.len(), 14);
        assert!(suffix.chars().all(|ch| ch.is_ascii_digit()));
    }

    #[test]
    fn annotation_columns_are_repeated_per_row() {
        let frame = DataFrame::new(vec![
            Series::new("week".into(), vec![Some("2025-01-06"), Some("2025-01-13")]).into(),
        ])
        .unwrap();
        let annotations = Annotations::new("fte_x".to_string(), "checked".to_string());
        let annotated = annotate(&frame, &annotations).unwrap();

        assert_eq!(annotated.width(), 4);
        let remarks = annotated.column("Remarks").unwrap();
        assert_eq!(remarks.get(1).unwrap(), AnyValue::String("checked"));
        let key = annotated.column("key").unwrap();
        assert_eq!(key.get(0).unwrap(), AnyValue::String("fte_x"));
    }
}
