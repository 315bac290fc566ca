//! Field catalogs for the two Weather Source endpoints and the resolution of
//! a user-supplied field selection into the `fields` query parameter.

use crate::request::error::RequestError;
use crate::types::DataKind;

/// Field names accepted by the historical endpoint, sorted.
static HISTORICAL_FIELDS: &[&str] = &[
    "all",
    "allCldCvr",
    "allHum",
    "allPrecip",
    "allPres",
    "allRad",
    "allTemp",
    "allWind",
    "cldCvr",
    "dewPt",
    "feelsLike",
    "freezingRainFlag",
    "heatIndex",
    "icePelletsFlag",
    "mslPres",
    "popular",
    "precip",
    "presTend",
    "provisionalFlag",
    "radSolar",
    "rainFlag",
    "relHum",
    "sfcPres",
    "snowFlag",
    "snowfall",
    "spcHum",
    "temp",
    "vis",
    "wetBulb",
    "windChill",
    "windDir",
    "windDir100m",
    "windDir80m",
    "windSpd",
    "windSpd100m",
    "windSpd80m",
];

/// Field names accepted by the forecast endpoint, sorted. The forecast
/// catalog has no observation flags but adds probability fields and the
/// forecast initialization timestamp.
static FORECAST_FIELDS: &[&str] = &[
    "all",
    "allCldCvr",
    "allHum",
    "allPrecip",
    "allPres",
    "allRad",
    "allTemp",
    "allWind",
    "cldCvr",
    "dewPt",
    "feelsLike",
    "heatIndex",
    "mslPres",
    "popular",
    "precip",
    "precipProb",
    "radSolar",
    "relHum",
    "sfcPres",
    "snowfall",
    "snowfallProb",
    "spcHum",
    "temp",
    "timestampInit",
    "wetBulb",
    "windChill",
    "windDir",
    "windDir100m",
    "windDir80m",
    "windSpd",
    "windSpd100m",
    "windSpd80m",
];

impl DataKind {
    /// The sorted allow-list of field names for this endpoint.
    pub fn valid_fields(&self) -> &'static [&'static str] {
        match self {
            DataKind::Historical => HISTORICAL_FIELDS,
            DataKind::Forecast => FORECAST_FIELDS,
        }
    }
}

/// Resolves an optional comma-separated field selection against the catalog
/// for `kind`.
///
/// `None` or a blank string resolves to the server-side default `popular`.
/// Tokens are trimmed and kept in input order; any token outside the catalog
/// fails the whole selection, and the error names every offender along with
/// the full catalog.
pub(crate) fn resolve_fields(
    kind: DataKind,
    fields: Option<&str>,
) -> Result<String, RequestError> {
    let raw = match fields {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok("popular".to_string()),
    };

    let catalog = kind.valid_fields();
    let tokens: Vec<&str> = raw.split(',').map(str::trim).collect();
    let invalid: Vec<String> = tokens
        .iter()
        .copied()
        .filter(|token| !catalog.contains(token))
        .map(str::to_string)
        .collect();

    if !invalid.is_empty() {
        return Err(RequestError::InvalidFields {
            kind,
            invalid,
            valid: catalog.to_vec(),
        });
    }

    Ok(tokens.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_are_sorted_and_complete() {
        assert_eq!(HISTORICAL_FIELDS.len(), 36);
        assert_eq!(FORECAST_FIELDS.len(), 32);
        assert!(HISTORICAL_FIELDS.windows(2).all(|w| w[0] < w[1]));
        assert!(FORECAST_FIELDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn forecast_only_fields_stay_out_of_historical() {
        for field in ["precipProb", "snowfallProb", "timestampInit"] {
            assert!(DataKind::Forecast.valid_fields().contains(&field));
            assert!(!DataKind::Historical.valid_fields().contains(&field));
        }
        for field in ["vis", "provisionalFlag", "rainFlag"] {
            assert!(DataKind::Historical.valid_fields().contains(&field));
            assert!(!DataKind::Forecast.valid_fields().contains(&field));
        }
    }

    #[test]
    fn missing_selection_resolves_to_popular() {
        assert_eq!(
            resolve_fields(DataKind::Historical, None).unwrap(),
            "popular"
        );
        assert_eq!(
            resolve_fields(DataKind::Forecast, Some("   ")).unwrap(),
            "popular"
        );
    }

    #[test]
    fn valid_selection_keeps_order_and_trims() {
        let resolved =
            resolve_fields(DataKind::Historical, Some("temp, precip ,relHum")).unwrap();
        assert_eq!(resolved, "temp,precip,relHum");
    }

    #[test]
    fn unknown_tokens_are_all_reported() {
        let err = resolve_fields(DataKind::Forecast, Some("temp,bogus,precip,nonsense"))
            .unwrap_err();
        match &err {
            RequestError::InvalidFields { invalid, valid, .. } => {
                assert_eq!(invalid, &["bogus", "nonsense"]);
                assert_eq!(valid.as_slice(), FORECAST_FIELDS);
            }
            other => panic!("expected InvalidFields, got {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("bogus, nonsense"));
        assert!(message.contains("Available fields:"));
    }

    #[test]
    fn kind_specific_fields_are_rejected_cross_endpoint() {
        let err = resolve_fields(DataKind::Historical, Some("precipProb")).unwrap_err();
        assert!(matches!(err, RequestError::InvalidFields { .. }));
    }
}
