//! Individual validation stages.
//!
//! Each stage takes the upload frame, the table rule, and the file
//! identifier, and fails with a fully formatted, identifier-prefixed
//! message. Stages run in a fixed order and the first failure wins.

pub mod datatype;
pub mod daterange;
pub mod periodicity;
pub mod schema;
pub mod values;

use polars::prelude::PolarsError;

/// A failed check. The message is complete and user-facing.
#[derive(Debug)]
pub struct CheckError {
    pub message: String,
}

impl CheckError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// An unexpected frame-level fault, reported as a failure rather than
    /// a panic.
    pub fn internal(file_id: &str, err: &PolarsError) -> Self {
        Self {
            message: format!("{file_id}: internal error while validating: {err}"),
        }
    }
}
