//! Conversion of raw API payloads into polars DataFrames.

mod error;
mod frame;

pub use error::NormalizeError;
pub use frame::{normalize, validate_table};
