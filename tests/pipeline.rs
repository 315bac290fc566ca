//! End-to-end pulls against a mocked Weather Source API: request shape,
//! normalization, storage, and error mapping.

use polars::prelude::*;
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;
use weathersource::{
    DataKind, Endpoints, LatLon, OutputFormat, Settings, TransportError, WeatherSource,
    WeatherSourceError,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server_uri: &str, output_dir: &std::path::Path) -> WeatherSource {
    let settings = Settings::builder()
        .api_key("test-key")
        .output_dir(output_dir.to_path_buf())
        .endpoints(Endpoints {
            historical: server_uri.to_string(),
            forecast: server_uri.to_string(),
        })
        .build();
    WeatherSource::new(settings).unwrap()
}

fn history_payload() -> serde_json::Value {
    json!({
        "history": [
            {"timestamp": "2023-12-01T00:00:00Z", "temp": 20.5, "precip": 0.0, "relHum": 65},
            {"timestamp": "2023-12-01T01:00:00Z", "temp": 19.8, "precip": 0.0, "relHum": 67}
        ],
        "location": {
            "latitude": 40.7128,
            "longitude": -74.006,
            "timezone": "America/New_York",
            "elevation": 10,
            "countryCode": "US",
            "countryName": "United States"
        }
    })
}

fn forecast_payload() -> serde_json::Value {
    json!({
        "forecast": [
            {"timestamp": "2099-01-01T00:00:00Z", "temp": 8.4, "precipProb": 30},
            {"timestamp": "2099-01-01T01:00:00Z", "temp": 8.1, "precipProb": 35}
        ],
        "location": {
            "latitude": 51.5074,
            "longitude": -0.1278,
            "timezone": "Europe/London",
            "elevation": 11,
            "countryCode": "GB",
            "countryName": "United Kingdom"
        }
    })
}

#[tokio::test]
async fn historical_pull_stores_a_csv_named_after_the_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/points/40.7128,-74.006/hours/2023-12-01T00:00:00+00:00,2023-12-02T23:00:00+00:00",
        ))
        .and(query_param("fields", "popular"))
        .and(header("X-API-KEY", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = test_client(&server.uri(), dir.path());

    let address = client
        .pull()
        .kind(DataKind::Historical)
        .location(LatLon(40.7128, -74.006))
        .start_date("2023-12-01")
        .end_date("2023-12-02")
        .format(OutputFormat::Csv)
        .call()
        .await
        .unwrap();

    assert!(address.ends_with(".csv"));
    let name = std::path::Path::new(&address)
        .file_name()
        .unwrap()
        .to_str()
        .unwrap();
    assert!(name.starts_with("weather_40.7128_-74.006_"));

    // Read everything back as text; the cells are what the pipeline wrote.
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(PathBuf::from(&address)))
        .unwrap()
        .finish()
        .unwrap();
    assert_eq!(frame.height(), 2);

    let temp = frame.column("temp").unwrap().str().unwrap();
    assert_eq!(temp.get(0), Some("20.5"));
    assert_eq!(temp.get(1), Some("19.8"));
    let latitude = frame.column("latitude").unwrap().str().unwrap();
    assert_eq!(latitude.get(0), Some("40.7128"));
    assert_eq!(latitude.get(1), Some("40.7128"));
    assert_eq!(
        frame.column("data_type").unwrap().str().unwrap().get(0),
        Some("historical")
    );
}

#[tokio::test]
async fn forecast_pull_defaults_to_parquet_with_native_dtypes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/points/51.5074,-0.1278/hours/2099-01-01T00:00:00+00:00,2099-01-02T23:00:00+00:00",
        ))
        .and(query_param("fields", "temp,precipProb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = test_client(&server.uri(), dir.path());

    let address = client
        .pull()
        .kind(DataKind::Forecast)
        .location(LatLon(51.5074, -0.1278))
        .start_date("2099-01-01")
        .end_date("2099-01-02")
        .fields("temp,precipProb")
        .call()
        .await
        .unwrap();

    assert!(address.ends_with(".parquet"));
    let frame = LazyFrame::scan_parquet(PathBuf::from(&address), Default::default())
        .unwrap()
        .collect()
        .unwrap();
    assert_eq!(frame.height(), 2);
    assert_eq!(frame.column("temp").unwrap().dtype(), &DataType::Float64);
    assert_eq!(
        frame.column("precipProb").unwrap().dtype(),
        &DataType::Int64
    );
    assert!(matches!(
        frame.column("timestamp").unwrap().dtype(),
        DataType::Datetime(_, Some(_))
    ));
    assert_eq!(
        frame.column("data_type").unwrap().str().unwrap().get(0),
        Some("forecast")
    );
}

#[tokio::test]
async fn unauthorized_responses_surface_the_api_key_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = test_client(&server.uri(), dir.path());

    let err = client
        .pull()
        .kind(DataKind::Historical)
        .location(LatLon(40.7128, -74.006))
        .start_date("2023-12-01")
        .end_date("2023-12-02")
        .call()
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        WeatherSourceError::Transport(TransportError::Unauthorized)
    ));
    assert_eq!(err.to_string(), "Invalid API key or unauthorized access");
}

#[tokio::test]
async fn bad_request_responses_surface_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid coordinates"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = test_client(&server.uri(), dir.path());

    // Coordinate range checks are the server's job; the pipeline forwards
    // whatever complaint comes back.
    let err = client
        .pull()
        .kind(DataKind::Historical)
        .location(LatLon(200.0, 2.0))
        .start_date("2023-12-01")
        .end_date("2023-12-02")
        .call()
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        WeatherSourceError::Transport(TransportError::BadRequest { .. })
    ));
    assert_eq!(err.to_string(), "Invalid coordinates");
}

#[tokio::test]
async fn rate_limited_responses_surface_as_such() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = test_client(&server.uri(), dir.path());

    let err = client
        .pull()
        .kind(DataKind::Forecast)
        .location(LatLon(1.0, 2.0))
        .start_date("2099-01-01")
        .end_date("2099-01-01")
        .call()
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        WeatherSourceError::Transport(TransportError::RateLimited)
    ));
    assert_eq!(err.to_string(), "Rate limit exceeded");
}

#[tokio::test]
async fn dates_on_the_wrong_side_of_today_fail_before_any_request() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let client = test_client(&server.uri(), dir.path());

    let err = client
        .pull()
        .kind(DataKind::Historical)
        .location(LatLon(1.0, 2.0))
        .start_date("2099-01-01")
        .end_date("2099-01-02")
        .call()
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Historical data can only be requested for past dates"
    );

    let err = client
        .pull()
        .kind(DataKind::Forecast)
        .location(LatLon(1.0, 2.0))
        .start_date("2020-01-01")
        .end_date("2020-01-02")
        .call()
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Forecast data can only be requested for future dates"
    );

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_fields_are_rejected_with_the_valid_set() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let client = test_client(&server.uri(), dir.path());

    let err = client
        .pull()
        .kind(DataKind::Historical)
        .location(LatLon(1.0, 2.0))
        .start_date("2023-12-01")
        .end_date("2023-12-01")
        .fields("temp,bogus")
        .call()
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(
        message.starts_with("Invalid field names for historical: bogus"),
        "unexpected message: {message}"
    );
    assert!(message.contains("Available fields:"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_ranges_still_store_successfully() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"history": []})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = test_client(&server.uri(), dir.path());

    let address = client
        .pull()
        .kind(DataKind::Historical)
        .location(LatLon(1.0, 2.0))
        .start_date("2023-12-01")
        .end_date("2023-12-01")
        .format(OutputFormat::Csv)
        .call()
        .await
        .unwrap();

    assert!(std::fs::metadata(&address).unwrap().is_file());
}
