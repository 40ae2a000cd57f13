//! CLI library components for the upload validator.

pub mod logging;
pub mod samples;
