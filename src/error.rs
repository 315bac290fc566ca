use crate::normalize::NormalizeError;
use crate::request::RequestError;
use crate::settings::ConfigError;
use crate::store::StoreError;
use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherSourceError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
