//! Date pattern compilation, calendar generation, and wide-to-long
//! reshaping for upload frames.

pub mod calendar;
mod cells;
pub mod datefmt;
pub mod error;
pub mod melt;
pub mod normalize;

pub use calendar::{expected_dates, expected_labels};
pub use datefmt::{DatePattern, compile_pattern, infer_date, iso};
pub use error::{Result, TransformError};
pub use melt::reshape;
pub use normalize::normalize_dates_for_export;
