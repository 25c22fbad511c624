use thiserror::Error;
use tracing::debug;

/// Result alias used by every `ApiClient` operation.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: could not refresh token")]
    Unauthorized,

    #[error("API request failed ({status}): {message}")]
    RequestFailed {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Maximum length for error response bodies carried in the debug log
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid carrying excessive data.
    /// Backs off to the previous char boundary so Cyrillic bodies stay valid.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..end],
            body.len()
        )
    }

    /// Pull the human-readable message out of a DRF error body.
    /// The backend uses `detail` for most errors and `message` for a few
    /// custom views.
    fn extract_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get("detail")
            .and_then(|v| v.as_str())
            .or_else(|| value.get("message").and_then(|v| v.as_str()))
            .map(|s| s.to_string())
    }

    /// Build the failure for a non-success response from its status and body.
    /// Bodies without a recognized message field (HTML error pages, DRF
    /// field-error maps) fall back to the status text; the raw body only
    /// reaches the debug log.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = match Self::extract_message(body) {
            Some(message) => message,
            None => {
                if !body.trim().is_empty() {
                    debug!(
                        status = %status,
                        body = %Self::truncate_body(body),
                        "Error response body had no detail or message field"
                    );
                }
                status
                    .canonical_reason()
                    .unwrap_or("API request failed")
                    .to_string()
            }
        };
        ApiError::RequestFailed { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_prefers_detail() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Invalid direction", "message": "ignored"}"#,
        );
        match err {
            ApiError::RequestFailed { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid direction");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_status_falls_back_to_message_field() {
        let err = ApiError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"message": "Driver not found"}"#,
        );
        match err {
            ApiError::RequestFailed { message, .. } => assert_eq!(message, "Driver not found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_status_empty_body_uses_status_text() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        match err {
            ApiError::RequestFailed { message, .. } => {
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_status_non_json_body_falls_back_to_status_text() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        match err {
            ApiError::RequestFailed { message, .. } => {
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_status_field_error_map_falls_back_to_status_text() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"username": ["This field is required."]}"#,
        );
        match err {
            ApiError::RequestFailed { message, .. } => {
                assert_eq!(message, "Bad Request");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncate_body_limits_length() {
        let long = "x".repeat(2000);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(500)));
        assert!(truncated.ends_with("(truncated, 2000 total bytes)"));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // 2-byte chars so the 500-byte cut lands mid-character
        let long = "ж".repeat(600);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.contains("truncated"));
    }

    #[test]
    fn test_unauthorized_display() {
        assert_eq!(
            ApiError::Unauthorized.to_string(),
            "Unauthorized: could not refresh token"
        );
    }
}
