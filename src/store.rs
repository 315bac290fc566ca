//! Persistence of normalized tables to local disk or S3.

mod error;
mod local;
mod s3;

pub use error::StoreError;
pub use local::LocalSink;
pub use s3::S3Sink;

use crate::types::DataKind;
use async_trait::async_trait;
use polars::frame::DataFrame;
use std::fmt;
use std::str::FromStr;

/// On-disk encoding for stored tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Csv,
    #[default]
    Parquet,
}

impl OutputFormat {
    /// File extension for this format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            _ => Err(StoreError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Destination for normalized weather tables.
///
/// `store` consumes the frame, writes it under a timestamped name derived
/// from `prefix`, and returns the address of what it wrote: a filesystem
/// path for [`LocalSink`], an `s3://` URL for [`S3Sink`]. `exists` takes a
/// sink-relative name (a file name, or an object key).
#[async_trait]
pub trait DataSink: Send + Sync {
    async fn store(
        &self,
        frame: DataFrame,
        kind: DataKind,
        prefix: &str,
        format: OutputFormat,
    ) -> Result<String, StoreError>;

    async fn exists(&self, name: &str) -> Result<bool, StoreError>;
}
