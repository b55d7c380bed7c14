use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// A failed backend request.
///
/// Callers treat every variant the same way; the split only exists so the
/// log line says what went wrong.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed with status code {}", status.as_u16())]
    Status {
        url: String,
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// The backend's own explanation, if the error response carried a
    /// non-blank one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => {
                detail.as_deref().filter(|detail| !detail.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Text shown to the user: the backend detail when present, otherwise
    /// the error itself.
    pub fn user_message(&self) -> String {
        match self.detail() {
            Some(detail) => detail.to_string(),
            None => self.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Pull `{"detail": ...}` out of an error response body.
pub(crate) fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let detail = match parsed.detail? {
        serde_json::Value::String(detail) => detail,
        serde_json::Value::Null => return None,
        other => other.to_string(),
    };
    Some(detail).filter(|detail| !detail.trim().is_empty())
}
