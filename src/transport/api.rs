//! HTTP access to the Weather Source hosts.

use crate::transport::error::TransportError;
use log::{debug, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body shape the hosts attach to rejected requests.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Thin client over the Weather Source endpoints.
///
/// One GET per fetch, no retries. The API key travels in the `X-API-KEY`
/// header and never appears in a URL or a log line.
pub struct ApiTransport {
    client: Client,
    api_key: String,
}

impl ApiTransport {
    /// Builds the shared HTTP client with an explicit request timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TransportError::ClientBuild)?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    /// Performs the GET and maps the response onto the endpoint's status
    /// contract, returning the parsed JSON body on success.
    ///
    /// The contract, checked in order: 401 is an authorization failure, 400
    /// carries the server's `message` when its body is JSON, 429 is a rate
    /// limit, any other non-success status is surfaced with its body, and a
    /// success body that is not JSON is its own failure.
    pub async fn fetch(&self, url: Url) -> Result<Value, TransportError> {
        let url_str = url.to_string();
        debug!("Requesting {}", url_str);

        let response = self
            .client
            .get(url)
            .header("X-API-KEY", &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| TransportError::Network(url_str.clone(), e))?;

        let status = response.status();
        debug!("Response status {} for {}", status, url_str);
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(url_str.clone(), e))?;

        match status {
            StatusCode::UNAUTHORIZED => Err(TransportError::Unauthorized),
            StatusCode::BAD_REQUEST => {
                let message = serde_json::from_str::<ErrorBody>(&body)
                    .ok()
                    .and_then(|parsed| parsed.message)
                    .unwrap_or_else(|| "Bad request".to_string());
                Err(TransportError::BadRequest { message })
            }
            StatusCode::TOO_MANY_REQUESTS => Err(TransportError::RateLimited),
            other if !other.is_success() => {
                warn!("HTTP error {} for {}", other, url_str);
                Err(TransportError::HttpStatus {
                    url: url_str,
                    status: other,
                    body,
                })
            }
            _ => serde_json::from_str(&body).map_err(|source| TransportError::InvalidJson {
                url: url_str,
                source,
            }),
        }
    }
}
