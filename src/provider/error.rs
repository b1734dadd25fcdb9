use thiserror::Error;

/// Failures talking to the air-quality provider.
///
/// Variants name the endpoint path only. The API token travels as a query
/// parameter and never appears in these messages.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String, #[source] url::ParseError),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {endpoint} with status {status}")]
    HttpStatus {
        endpoint: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON response from {endpoint}")]
    JsonParse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    // The request went through but the envelope status was not "ok"
    #[error("Provider returned an error for {endpoint}: {message}")]
    Api { endpoint: String, message: String },
}
