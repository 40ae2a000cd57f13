//! Rule model for tabular upload validation.
//!
//! This crate defines the declarative rule types, the validation outcome
//! reported to callers, and the immutable registry of logical file types.
//! It holds no polars dependency; frame handling lives downstream.

pub mod error;
pub mod outcome;
pub mod registry;
pub mod rule;

pub use error::{ModelError, Result};
pub use outcome::ValidationOutcome;
pub use registry::RuleRegistry;
pub use rule::{
    ColumnKind, ColumnTypeRule, DateColumnSpec, DateRangeRule, ExportSpec, FileSpec, Frequency,
    TableRule, TransformConfig, ValueCheckRule, ValueRule,
};
