//! Calendar-date validation and the hourly UTC bounds the point endpoints
//! address.

use crate::request::error::RequestError;
use crate::types::DataKind;
use chrono::{DateTime, NaiveDate, Utc};

/// Returns true iff `s` is a strict `YYYY-MM-DD` calendar date: exactly ten
/// characters, zero-padded, naming a real date.
///
/// # Examples
///
/// ```
/// use weathersource::is_calendar_date;
///
/// assert!(is_calendar_date("2023-12-01"));
/// assert!(!is_calendar_date("2023-1-1"));
/// assert!(!is_calendar_date("2023-02-30"));
/// assert!(!is_calendar_date("01-12-2023"));
/// ```
pub fn is_calendar_date(s: &str) -> bool {
    parse_calendar_date(s).is_ok()
}

/// Parses a strict `YYYY-MM-DD` date. Chrono alone accepts unpadded months
/// and days, so the shape is checked first.
pub(crate) fn parse_calendar_date(s: &str) -> Result<NaiveDate, RequestError> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    if !shaped {
        return Err(RequestError::InvalidDateFormat {
            given: s.to_string(),
        });
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RequestError::InvalidDateFormat {
        given: s.to_string(),
    })
}

/// Enforces the direction rule for `kind`: historical ranges must not reach
/// past `today`, forecast ranges must not start before it. Today itself is
/// valid for both kinds. The caller supplies `today` so the clock stays
/// injectable.
pub(crate) fn check_date_direction(
    kind: DataKind,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<(), RequestError> {
    match kind {
        DataKind::Historical if start > today || end > today => {
            Err(RequestError::HistoricalDateInFuture)
        }
        DataKind::Forecast if start < today || end < today => {
            Err(RequestError::ForecastDateInPast)
        }
        _ => Ok(()),
    }
}

/// Expands a date pair to the hourly bounds the API expects: 00:00:00 UTC on
/// the start day through 23:00:00 UTC on the end day. The end bound is 23:00,
/// not midnight of the next day, because the endpoints address whole hours.
pub(crate) fn utc_day_bounds(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_at = start.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let end_at = end.and_hms_opt(23, 0, 0).unwrap().and_utc();
    (start_at, end_at)
}
