//! Error types for the Siray client.

use serde_json::Value;
use std::time::Duration;

/// Machine-readable code carried by [`SirayError::TaskTimeout`].
pub const TASK_TIMEOUT_CODE: &str = "TASK_TIMEOUT";

/// Errors that can occur while talking to the Siray API.
#[derive(Debug, thiserror::Error)]
pub enum SirayError {
    /// API key missing.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned a non-success HTTP response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code from the response body, if any.
        code: Option<String>,
        /// Human-readable message.
        message: String,
        /// Parsed response body, if it was JSON.
        response: Option<Value>,
    },

    /// A single HTTP request exceeded the client timeout.
    #[error("request timed out after {0:?}")]
    RequestTimeout(Duration),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The task did not reach a terminal state before the wait deadline.
    #[error("task run timed out after {timeout:?} while waiting for completion")]
    TaskTimeout {
        /// The configured wait timeout.
        timeout: Duration,
        /// Raw payload of the last observed status.
        response: Option<Value>,
    },

    /// The API answered with a payload we cannot use.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Local file has an extension we cannot map to a MIME type.
    #[error("unsupported or unknown file type: {0}")]
    UnsupportedFileType(String),

    /// I/O error (e.g., reading a local file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SirayError {
    /// HTTP (or HTTP-like) status associated with this error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::TaskTimeout { .. } => Some(408),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Machine-readable error code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            Self::TaskTimeout { .. } => Some(TASK_TIMEOUT_CODE),
            _ => None,
        }
    }

    /// Raw payload attached to the error for diagnostics.
    pub fn response(&self) -> Option<&Value> {
        match self {
            Self::Api { response, .. } | Self::TaskTimeout { response, .. } => response.as_ref(),
            _ => None,
        }
    }
}

/// Result type alias for Siray operations.
pub type Result<T> = std::result::Result<T, SirayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_timeout_accessors() {
        let err = SirayError::TaskTimeout {
            timeout: Duration::from_secs(300),
            response: Some(json!({"data": {"status": "IN_PROGRESS"}})),
        };
        assert_eq!(err.status(), Some(408));
        assert_eq!(err.code(), Some("TASK_TIMEOUT"));
        assert_eq!(err.response().unwrap()["data"]["status"], "IN_PROGRESS");
    }

    #[test]
    fn test_api_accessors() {
        let err = SirayError::Api {
            status: 402,
            code: Some("insufficient_balance".into()),
            message: "Insufficient balance".into(),
            response: None,
        };
        assert_eq!(err.status(), Some(402));
        assert_eq!(err.code(), Some("insufficient_balance"));
        assert!(err.response().is_none());
    }

    #[test]
    fn test_accessors_absent_for_local_errors() {
        let err = SirayError::InvalidRequest("empty path".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.code(), None);
        assert!(err.response().is_none());
    }

    #[test]
    fn test_error_display() {
        let err = SirayError::Api {
            status: 404,
            code: None,
            message: "Not found".into(),
            response: None,
        };
        assert_eq!(err.to_string(), "API error: 404 - Not found");

        let err = SirayError::UnsupportedFileType("txt".into());
        assert_eq!(err.to_string(), "unsupported or unknown file type: txt");

        let err = SirayError::TaskTimeout {
            timeout: Duration::from_millis(100),
            response: None,
        };
        assert_eq!(
            err.to_string(),
            "task run timed out after 100ms while waiting for completion"
        );
    }
}
