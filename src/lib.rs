mod client;
mod error;
mod normalize;
mod request;
mod settings;
mod store;
mod transport;
mod types;

pub use client::*;
pub use error::WeatherSourceError;

pub use normalize::{normalize, validate_table, NormalizeError};
pub use request::{is_calendar_date, PointRequest, RequestError};
pub use settings::{ConfigError, Endpoints, Settings};
pub use store::{DataSink, LocalSink, OutputFormat, S3Sink, StoreError};
pub use transport::{ApiTransport, TransportError};
pub use types::DataKind;
