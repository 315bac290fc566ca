use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to initialize HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    Network(String, #[source] reqwest::Error),

    #[error("Invalid API key or unauthorized access")]
    Unauthorized,

    // `message` is the body's `message` key when the 400 body is JSON,
    // otherwise the literal "Bad request".
    #[error("{message}")]
    BadRequest { message: String },

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("HTTP request failed for {url} with status {status}: {body}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Response from {url} was not valid JSON")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
