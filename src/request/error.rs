use crate::types::DataKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Unknown data type '{given}', expected 'historical' or 'forecast'")]
    UnknownDataKind { given: String },

    // Strict calendar-date syntax: ten characters, zero-padded, a real date.
    #[error("Dates must be in YYYY-MM-DD format")]
    InvalidDateFormat { given: String },

    #[error("Historical data can only be requested for past dates")]
    HistoricalDateInFuture,

    #[error("Forecast data can only be requested for future dates")]
    ForecastDateInPast,

    #[error("Invalid field names for {kind}: {}. Available fields: {}", invalid.join(", "), valid.join(", "))]
    InvalidFields {
        kind: DataKind,
        invalid: Vec<String>,
        valid: Vec<&'static str>,
    },

    #[error("Constructed an invalid request URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
