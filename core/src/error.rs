//! Error types for the remote machines API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a lookup by IP address for an
//! unknown machine is the common failure. All other non-2xx responses land in
//! `HttpError`. Both keep the raw body next to the extracted `detail` field.
//! `Transport` covers requests that never produced a response.

use crate::http::HttpResponse;
use crate::types::ErrorBody;

/// Errors produced while executing or parsing a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound { detail: Option<String>, body: String },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError {
        status: u16,
        detail: Option<String>,
        body: String,
    },

    /// No response was received (connection refused, bad URL, reset).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A 2xx body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// Build the error for a non-2xx response.
    pub fn from_response(response: &HttpResponse) -> Self {
        let detail = extract_detail(&response.body);
        let body = response.body.clone();
        match response.status {
            404 => ApiError::NotFound { detail, body },
            status => ApiError::HttpError {
                status,
                detail,
                body,
            },
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::DeserializationError(_) => None,
        }
    }

    /// Server-provided `detail` field, if the failure body carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { detail, .. } | ApiError::HttpError { detail, .. } => {
                detail.as_deref()
            }
            ApiError::Transport(_) | ApiError::DeserializationError(_) => None,
        }
    }
}

/// Pull `detail` out of a JSON failure body.
///
/// String details are returned verbatim. Structured details (validation error
/// lists) are returned as compact JSON.
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
