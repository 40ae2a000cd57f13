//! CSV reading into string-typed polars frames.
//!
//! Uploads are read without type inference: every cell stays a string so
//! the validation stages can report the raw text the user typed. The first
//! non-empty row becomes the header row; rows that are entirely blank are
//! dropped.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use polars::prelude::DataFrame;
use tracing::debug;

use crate::frame::frame_from_columns;

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Frames need distinct column names; blank or repeated headers get
/// positional and counted fallbacks.
fn uniquify_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = if header.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                header
            };
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                base
            } else {
                format!("{base}_{count}")
            }
        })
        .collect()
}

/// Reads one CSV file into a string-typed frame.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }

    let Some(headers) = raw_rows.first().cloned() else {
        return frame_from_columns(Vec::new())
            .with_context(|| format!("build empty frame: {}", path.display()));
    };
    let headers = uniquify_headers(headers);

    let mut columns: Vec<(String, Vec<Option<String>>)> = headers
        .iter()
        .map(|name| (name.clone(), Vec::with_capacity(raw_rows.len() - 1)))
        .collect();
    for row in raw_rows.iter().skip(1) {
        for (idx, (_, values)) in columns.iter_mut().enumerate() {
            let cell = row.get(idx).map(String::as_str).unwrap_or("");
            if cell.is_empty() {
                values.push(None);
            } else {
                values.push(Some(cell.to_string()));
            }
        }
    }

    let frame = frame_from_columns(columns)
        .with_context(|| format!("build frame: {}", path.display()))?;
    debug!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "loaded csv upload"
    );
    Ok(frame)
}
