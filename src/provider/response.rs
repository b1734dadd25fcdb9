//! The `{status, data}` envelope every provider endpoint wraps its payload in.

use crate::provider::error::ProviderError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    message: Option<String>,
}

/// A decoded provider response.
///
/// The wire format carries a free-form `status` string next to a loosely typed `data`
/// field. Decoding collapses that into exactly two cases so callers branch exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// `status == "ok"` and `data` decoded as `T`.
    Ok(T),
    /// Any other status, with the provider's explanation.
    Error(String),
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decodes a response body.
    ///
    /// Fails only when the body is not an envelope at all, or when an `"ok"` payload does
    /// not match `T`. A well-formed error envelope is `Ok(ApiResponse::Error(..))`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope: Envelope = serde_json::from_slice(bytes)?;
        if envelope.status == "ok" {
            return serde_json::from_value(envelope.data).map(ApiResponse::Ok);
        }
        let message = match envelope.data {
            Value::String(s) if !s.is_empty() => s,
            Value::Null | Value::String(_) => envelope.message.unwrap_or(envelope.status),
            other => other.to_string(),
        };
        Ok(ApiResponse::Error(message))
    }
}

impl<T> ApiResponse<T> {
    pub fn into_result(self, endpoint: &str) -> Result<T, ProviderError> {
        match self {
            ApiResponse::Ok(data) => Ok(data),
            ApiResponse::Error(message) => Err(ProviderError::Api {
                endpoint: endpoint.to_string(),
                message,
            }),
        }
    }
}
