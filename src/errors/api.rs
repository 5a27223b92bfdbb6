use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error object returned in-band by the API.
///
/// Servers emit this in two envelope shapes: nested under a top-level
/// `error` key, or as a bare object. Both are accepted during
/// classification; `message` is the only required field so that ordinary
/// payload chunks never decode as an error by accident.
#[derive(Error, Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub param: Option<String>,
    pub code: Option<String>,
}

/// The nested envelope shape: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiError,
}

impl ApiError {
    /// Attempts to decode `data` as an API error, trying the nested
    /// envelope first and then the bare object shape.
    pub fn from_json(data: &str) -> Option<ApiError> {
        if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(data) {
            return Some(envelope.error);
        }
        serde_json::from_str::<ApiError>(data).ok()
    }
}
