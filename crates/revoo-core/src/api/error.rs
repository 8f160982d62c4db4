use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::StorageError;
use crate::models::ValidationError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Token storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// `body` is the response body as received; only `Display` shortens it
    #[error("HTTP {status}: {}", truncate_body(.body))]
    Http { status: StatusCode, body: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Login response did not contain a token")]
    MissingToken,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Client configuration error: {0}")]
    Config(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Truncate a response body to avoid printing excessive data
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}

impl ApiError {
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        ApiError::Http {
            status,
            body: body.to_string(),
        }
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_keeps_status() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "{\"error\":\"expired\"}");
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "HTTP 401 Unauthorized: {\"error\":\"expired\"}");

        let err = ApiError::from_status(StatusCode::NOT_FOUND, "");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_long_body_kept_whole_but_shortened_for_display() {
        let body = "é".repeat(400);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        match &err {
            ApiError::Http { body: kept, .. } => assert_eq!(kept, &body),
            other => panic!("unexpected error {:?}", other),
        }

        let shown = err.to_string();
        assert!(shown.contains("truncated, 800 total bytes"));
        assert!(shown.len() < body.len());
    }

    #[test]
    fn test_non_http_errors_have_no_status() {
        assert_eq!(ApiError::MissingToken.status(), None);
        let err: ApiError = StorageError::Corrupt("bad".to_string()).into();
        assert!(matches!(err, ApiError::Storage(_)));
        assert!(!err.is_unauthorized());
    }
}
