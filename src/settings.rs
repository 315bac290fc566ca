//! Runtime configuration for the pipeline: API credentials, output
//! locations, and the Weather Source host pair.

use crate::types::DataKind;
use bon::bon;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable holding the Weather Source API key.
pub const API_KEY_VAR: &str = "WEATHER_SOURCE_API_KEY";
const OUTPUT_DIR_VAR: &str = "DATA_OUTPUT_PATH";
const S3_BUCKET_VAR: &str = "S3_BUCKET_NAME";
const AWS_REGION_VAR: &str = "AWS_REGION";
const DEFAULT_OUTPUT_DIR: &str = "data";

const HISTORICAL_BASE: &str = "https://history.weathersourceapis.com/v2";
const FORECAST_BASE: &str = "https://forecast.weathersourceapis.com/v2";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable '{0}'")]
    MissingVar(&'static str),
}

/// Base URLs of the two Weather Source hosts. Historical and forecast data
/// live on separate hosts that share one path scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub historical: String,
    pub forecast: String,
}

impl Endpoints {
    /// The base URL serving the given data kind.
    pub fn base(&self, kind: DataKind) -> &str {
        match kind {
            DataKind::Historical => &self.historical,
            DataKind::Forecast => &self.forecast,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            historical: HISTORICAL_BASE.to_string(),
            forecast: FORECAST_BASE.to_string(),
        }
    }
}

/// Everything the pipeline needs to run: the API key, where output lands,
/// and optionally an S3 destination.
///
/// Build one explicitly, or read it from the environment:
///
/// ```
/// use weathersource::Settings;
///
/// let settings = Settings::builder().api_key("demo-key").build();
/// assert_eq!(settings.output_dir.to_str(), Some("data"));
/// assert!(settings.s3_bucket.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub output_dir: PathBuf,
    pub s3_bucket: Option<String>,
    pub aws_region: Option<String>,
    pub endpoints: Endpoints,
}

#[bon]
impl Settings {
    /// Creates settings explicitly. Only `.api_key()` is required; the
    /// output directory defaults to `data` and the endpoints to the public
    /// Weather Source hosts.
    #[builder]
    pub fn new(
        api_key: &str,
        output_dir: Option<PathBuf>,
        s3_bucket: Option<&str>,
        aws_region: Option<&str>,
        endpoints: Option<Endpoints>,
    ) -> Settings {
        Settings {
            api_key: api_key.to_string(),
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            s3_bucket: s3_bucket.map(String::from),
            aws_region: aws_region.map(String::from),
            endpoints: endpoints.unwrap_or_default(),
        }
    }

    /// Reads settings from the environment.
    ///
    /// `WEATHER_SOURCE_API_KEY` is required. `DATA_OUTPUT_PATH` (default
    /// `data`), `S3_BUCKET_NAME` and `AWS_REGION` are optional.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when the API key variable is
    /// unset.
    pub fn from_env() -> Result<Settings, ConfigError> {
        let api_key = env::var(API_KEY_VAR).map_err(|_| ConfigError::MissingVar(API_KEY_VAR))?;
        let output_dir =
            env::var(OUTPUT_DIR_VAR).unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string());
        Ok(Settings {
            api_key,
            output_dir: PathBuf::from(output_dir),
            s3_bucket: env::var(S3_BUCKET_VAR).ok(),
            aws_region: env::var(AWS_REGION_VAR).ok(),
            endpoints: Endpoints::default(),
        })
    }
}
