//! Defines which Weather Source dataset a request targets.
//!
//! The API exposes past observations and forward-looking forecasts on two
//! separate hosts with separate field catalogs; [`DataKind`] is the tag that
//! selects between them everywhere in the pipeline.

use crate::request::RequestError;
use std::fmt;
use std::str::FromStr;

/// The dataset a point request is aimed at.
///
/// The variant decides the API host, the key under which readings arrive in
/// the response body, the set of field names the request may ask for, and the
/// value written into the `data_type` column of the normalized table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Past observations. Only dates up to and including today can be requested.
    Historical,
    /// Forward-looking forecasts. Only dates from today onward can be requested.
    Forecast,
}

impl DataKind {
    /// Key under which the response body carries the hourly readings.
    pub(crate) fn payload_key(&self) -> &'static str {
        match self {
            DataKind::Historical => "history",
            DataKind::Forecast => "forecast",
        }
    }

    /// Label used for the `data_type` column, S3 folder names and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            DataKind::Historical => "historical",
            DataKind::Forecast => "forecast",
        }
    }
}

/// Formats a `DataKind` using its `label`.
///
/// # Examples
///
/// ```
/// use weathersource::DataKind;
///
/// assert_eq!(format!("{}", DataKind::Historical), "historical");
/// assert_eq!(DataKind::Forecast.to_string(), "forecast");
/// ```
impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parses `"historical"` or `"forecast"` (case-insensitive).
///
/// # Examples
///
/// ```
/// use weathersource::DataKind;
///
/// assert_eq!("historical".parse::<DataKind>().unwrap(), DataKind::Historical);
/// assert!("hourly".parse::<DataKind>().is_err());
/// ```
impl FromStr for DataKind {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "historical" => Ok(DataKind::Historical),
            "forecast" => Ok(DataKind::Forecast),
            _ => Err(RequestError::UnknownDataKind {
                given: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_payload_keys() {
        assert_eq!(DataKind::Historical.payload_key(), "history");
        assert_eq!(DataKind::Historical.label(), "historical");
        assert_eq!(DataKind::Forecast.payload_key(), "forecast");
        assert_eq!(DataKind::Forecast.label(), "forecast");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "Forecast".parse::<DataKind>().unwrap(),
            DataKind::Forecast
        );
        let err = "daily".parse::<DataKind>().unwrap_err();
        assert!(err.to_string().contains("daily"));
    }
}
