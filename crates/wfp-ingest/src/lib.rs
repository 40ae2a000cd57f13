//! Upload ingestion: CSV files loaded into string-typed polars frames.

pub mod csv_table;
pub mod frame;
pub mod logical;

pub use csv_table::read_csv_frame;
pub use frame::{column_values, frame_from_columns, is_missing, parse_numeric, value_to_string};
pub use logical::LogicalFile;
