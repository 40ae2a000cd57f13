use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use polars::prelude::DataFrame;

use crate::csv_table::read_csv_frame;

/// One uploaded logical file: either a flat table or a set of named sheets.
#[derive(Debug, Clone)]
pub enum LogicalFile {
    Table(DataFrame),
    Sheets(BTreeMap<String, DataFrame>),
}

impl LogicalFile {
    /// Reads a flat upload from one CSV file.
    pub fn read_single(path: &Path) -> Result<Self> {
        Ok(Self::Table(read_csv_frame(path)?))
    }

    /// Reads a sheet set from named CSV files, one file per sheet.
    pub fn read_sheets<'a>(
        sheets: impl IntoIterator<Item = (&'a str, &'a Path)>,
    ) -> Result<Self> {
        let mut frames = BTreeMap::new();
        for (name, path) in sheets {
            frames.insert(name.to_string(), read_csv_frame(path)?);
        }
        Ok(Self::Sheets(frames))
    }
}
