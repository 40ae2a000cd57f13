//! Pipeline orchestration: header offsets, validation, reshaping,
//! annotation, and export dispatch for uploaded logical files.

pub mod frame;
pub mod keying;
pub mod pipeline;

pub use frame::apply_header_offset;
pub use keying::{Annotations, annotate, generate_key};
pub use pipeline::{ValidateRequest, validate_file};
