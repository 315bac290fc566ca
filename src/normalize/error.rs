use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    // Carries the payload's top-level keys so callers can see what the
    // server actually returned.
    #[error("Unexpected response structure (top-level keys: {keys:?})")]
    Structure { keys: Vec<String> },

    #[error("Failed to parse timestamp '{value}'")]
    TimestampParse {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrame(#[from] PolarsError),
}
