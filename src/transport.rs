//! HTTP transport for the Weather Source API.

mod api;
mod error;

pub use api::ApiTransport;
pub use error::TransportError;
