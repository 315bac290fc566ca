//! This module provides the main entry point for the weather pipeline.
//! It wires request building, the HTTP transport, normalization and the
//! configured sink into a single `pull` operation.

use crate::error::WeatherSourceError;
use crate::normalize::{normalize, validate_table};
use crate::request::PointRequest;
use crate::settings::{ConfigError, Settings};
use crate::store::{DataSink, LocalSink, OutputFormat, S3Sink};
use crate::transport::ApiTransport;
use crate::types::DataKind;
use bon::bon;
use chrono::Utc;
use log::{info, warn};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second
/// (index 1). Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use weathersource::LatLon;
///
/// let new_york = LatLon(40.7128, -74.0060);
/// assert_eq!(new_york.0, 40.7128); // Latitude
/// assert_eq!(new_york.1, -74.0060); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The main client for pulling Weather Source data.
///
/// A pull fetches hourly point data for a coordinate, normalizes the JSON
/// response into a polars `DataFrame`, and writes it to the configured sink
/// (local directory by default, S3 via [`WeatherSource::with_s3`]).
///
/// Create an instance using [`WeatherSource::new()`] to store output
/// locally, or [`WeatherSource::with_s3()`] to upload to the bucket named
/// in the settings.
///
/// # Examples
///
/// ```rust
/// # use weathersource::{Settings, WeatherSource};
/// # use weathersource::WeatherSourceError;
/// # async fn run() -> Result<(), WeatherSourceError> {
/// let settings = Settings::builder().api_key("my-key").build();
/// let client = WeatherSource::new(settings)?;
/// // Now you can use the client to pull weather data
/// # Ok(())
/// # }
/// ```
pub struct WeatherSource {
    settings: Settings,
    transport: ApiTransport,
    sink: Box<dyn DataSink>,
}

#[bon]
impl WeatherSource {
    /// Creates a client that stores output in the settings' output
    /// directory on the local filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherSourceError::Transport`] if the HTTP client cannot
    /// be initialized.
    pub fn new(settings: Settings) -> Result<Self, WeatherSourceError> {
        let sink = LocalSink::new(&settings.output_dir);
        Self::with_sink(settings, Box::new(sink))
    }

    /// Creates a client that uploads output to S3.
    ///
    /// The bucket and region come from the settings; credentials come from
    /// the ambient AWS credential chain.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherSourceError::Config`] if the settings carry no
    /// bucket or region, and [`WeatherSourceError::Transport`] if the HTTP
    /// client cannot be initialized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use weathersource::{Settings, WeatherSource};
    /// # use weathersource::WeatherSourceError;
    /// # async fn run() -> Result<(), WeatherSourceError> {
    /// let settings = Settings::builder()
    ///     .api_key("my-key")
    ///     .s3_bucket("weather-archive")
    ///     .aws_region("us-east-1")
    ///     .build();
    /// let client = WeatherSource::with_s3(settings).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_s3(settings: Settings) -> Result<Self, WeatherSourceError> {
        let bucket = settings
            .s3_bucket
            .clone()
            .ok_or(ConfigError::MissingVar("S3_BUCKET_NAME"))?;
        let region = settings
            .aws_region
            .clone()
            .ok_or(ConfigError::MissingVar("AWS_REGION"))?;
        let sink = S3Sink::new(bucket, region).await;
        Self::with_sink(settings, Box::new(sink))
    }

    /// Creates a client with a caller-provided sink.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherSourceError::Transport`] if the HTTP client cannot
    /// be initialized.
    pub fn with_sink(
        settings: Settings,
        sink: Box<dyn DataSink>,
    ) -> Result<Self, WeatherSourceError> {
        let transport = ApiTransport::new(settings.api_key.as_str())?;
        Ok(WeatherSource {
            settings,
            transport,
            sink,
        })
    }

    /// Fetches, normalizes and stores weather data for one coordinate and
    /// date range, returning the address of what was stored (a filesystem
    /// path, or an `s3://` URL).
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.kind(DataKind)`: **Required.** Historical or forecast data.
    /// * `.location(LatLon)`: **Required.** The coordinate to fetch.
    /// * `.start_date(&str)`: **Required.** First day of the range, `YYYY-MM-DD`.
    /// * `.end_date(&str)`: **Required.** Last day of the range, `YYYY-MM-DD`.
    /// * `.fields(Option<&str>)`: Optional. Comma-separated field names to
    ///   request. Defaults to the API's `popular` bundle.
    /// * `.format(Option<OutputFormat>)`: Optional. Output encoding.
    ///   Defaults to parquet.
    ///
    /// # Returns
    ///
    /// The storage address of the written table.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherSourceError::Request`] for malformed dates, dates on
    /// the wrong side of today, or unknown field names;
    /// [`WeatherSourceError::Transport`] for network and HTTP failures;
    /// [`WeatherSourceError::Normalize`] for structurally unexpected
    /// responses; and [`WeatherSourceError::Store`] when writing fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use weathersource::{DataKind, LatLon, Settings, WeatherSource};
    /// # use weathersource::WeatherSourceError;
    /// # async fn run() -> Result<(), WeatherSourceError> {
    /// let settings = Settings::builder().api_key("my-key").build();
    /// let client = WeatherSource::new(settings)?;
    ///
    /// let address = client
    ///     .pull()
    ///     .kind(DataKind::Historical)
    ///     .location(LatLon(40.7128, -74.0060))
    ///     .start_date("2023-12-01")
    ///     .end_date("2023-12-02")
    ///     .fields("temp,precip")
    ///     .call()
    ///     .await?;
    /// println!("stored at {address}");
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn pull(
        &self,
        kind: DataKind,
        location: LatLon,
        start_date: &str,
        end_date: &str,
        fields: Option<&str>,
        format: Option<OutputFormat>,
    ) -> Result<String, WeatherSourceError> {
        let request = PointRequest {
            kind,
            location,
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            fields: fields.map(String::from),
        };
        let url = request.build_url(
            self.settings.endpoints.base(kind),
            Utc::now().date_naive(),
        )?;

        info!(
            "Fetching {} weather for ({}, {}) from {} to {}",
            kind, location.0, location.1, start_date, end_date
        );
        let payload = self.transport.fetch(url).await?;
        let frame = normalize(kind, &payload)?;
        if !validate_table(&frame) {
            warn!("Normalized table failed validation checks, storing anyway");
        }

        let prefix = format!("weather_{}_{}", location.0, location.1);
        let address = self
            .sink
            .store(frame, kind, &prefix, format.unwrap_or_default())
            .await?;
        info!("Stored {} weather data at {}", kind, address);
        Ok(address)
    }
}
