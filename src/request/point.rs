//! Assembles a validated point request into the URL the API is queried with.

use crate::client::LatLon;
use crate::request::dates::{check_date_direction, parse_calendar_date, utc_day_bounds};
use crate::request::error::RequestError;
use crate::request::fields::resolve_fields;
use crate::types::DataKind;
use chrono::NaiveDate;
use url::Url;

/// A single point-location request against one of the two endpoints.
#[derive(Debug, Clone)]
pub struct PointRequest {
    pub kind: DataKind,
    pub location: LatLon,
    /// Start date, strict `YYYY-MM-DD`.
    pub start_date: String,
    /// End date, strict `YYYY-MM-DD`.
    pub end_date: String,
    /// Comma-separated field selection; `None` resolves to `popular`.
    pub fields: Option<String>,
}

impl PointRequest {
    /// Validates the request and renders it against `base`.
    ///
    /// Validation order follows the endpoint contract: date syntax, then the
    /// per-kind direction rule against `today`, then the field selection.
    /// Coordinates are interpolated at full `f64` precision and the commas in
    /// the `fields` value stay literal; the finished string is run through
    /// [`Url::parse`] as a final validity gate. The API key never appears in
    /// the URL.
    pub fn build_url(&self, base: &str, today: NaiveDate) -> Result<Url, RequestError> {
        let start = parse_calendar_date(&self.start_date)?;
        let end = parse_calendar_date(&self.end_date)?;
        check_date_direction(self.kind, start, end, today)?;
        let (start_at, end_at) = utc_day_bounds(start, end);
        let fields = resolve_fields(self.kind, self.fields.as_deref())?;

        let rendered = format!(
            "{}/points/{},{}/hours/{},{}?fields={}",
            base,
            self.location.0,
            self.location.1,
            start_at.to_rfc3339(),
            end_at.to_rfc3339(),
            fields
        );
        Url::parse(&rendered).map_err(|source| RequestError::InvalidUrl {
            url: rendered,
            source,
        })
    }
}
