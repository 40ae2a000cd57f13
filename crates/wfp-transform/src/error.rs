use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("frame error: {0}")]
    Frame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
