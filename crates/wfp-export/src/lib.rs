//! Export boundary for validated uploads.
//!
//! Sinks are registered once at startup under a stable id and looked up
//! by the rule's `export.sink` field. The registry is immutable after
//! construction, so a rule can never reach an export target that was not
//! deliberately wired in.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use polars::prelude::{AnyValue, DataFrame};
use thiserror::Error;
use tracing::info;
use wfp_ingest::value_to_string;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Message(String),
}

/// One export destination kind. Implementations receive the fully
/// annotated and date-normalized frame.
pub trait ExportSink: Send + Sync {
    fn export(
        &self,
        frame: &DataFrame,
        destination: &Path,
        file_id: &str,
    ) -> Result<(), ExportError>;
}

/// Writes the frame as a CSV artifact, creating parent directories.
pub struct CsvSink;

impl ExportSink for CsvSink {
    fn export(
        &self,
        frame: &DataFrame,
        destination: &Path,
        file_id: &str,
    ) -> Result<(), ExportError> {
        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(destination)?;
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        writer.write_record(&names)?;
        for idx in 0..frame.height() {
            let mut record = Vec::with_capacity(names.len());
            for name in &names {
                let cell = frame
                    .column(name)
                    .map_err(|err| ExportError::Message(err.to_string()))?
                    .get(idx)
                    .unwrap_or(AnyValue::Null);
                record.push(value_to_string(cell));
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;
        info!(
            %file_id,
            destination = %destination.display(),
            rows = frame.height(),
            "exported csv artifact"
        );
        Ok(())
    }
}

/// Immutable sink catalogue, id to implementation.
#[derive(Clone, Default)]
pub struct ExportRegistry {
    sinks: BTreeMap<String, Arc<dyn ExportSink>>,
}

impl ExportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard catalogue: the CSV sink under the id `csv`.
    pub fn builtin() -> Self {
        Self::new().with_sink("csv", Arc::new(CsvSink))
    }

    #[must_use]
    pub fn with_sink(mut self, id: &str, sink: Arc<dyn ExportSink>) -> Self {
        self.sinks.insert(id.to_string(), sink);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn ExportSink>> {
        self.sinks.get(id)
    }

    pub fn sink_ids(&self) -> impl Iterator<Item = &str> {
        self.sinks.keys().map(String::as_str)
    }
}
