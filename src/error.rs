//! Error types and the wire error-code taxonomy

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Error code reported in the `error_code` field of a failed envelope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    SearchError,
    MissingDependency,
    AuthError,
    UnknownError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SearchError => "SEARCH_ERROR",
            Self::MissingDependency => "MISSING_DEPENDENCY",
            Self::AuthError => "AUTH_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that can go wrong during a single search invocation
#[derive(Debug, Error)]
pub enum SearchError {
    /// Rejected before any network activity
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("Sougou credentials are not configured: set SOUGOU_APPID and SOUGOU_SECRET")]
    MissingCredentials,

    #[error("Sougou search timed out ({}s)", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Sougou search HTTP error: {0}")]
    HttpStatus(u16),

    #[error("Sougou search request failed: {0}")]
    Transport(String),

    /// The upstream answered with a non-zero business code
    #[error("Sougou search API error: code={code}, msg={msg}")]
    Upstream { code: i64, msg: String },

    #[error("malformed upstream response: {0}")]
    Malformed(String),

    /// The HTTP client could not be initialised in this environment
    #[error("HTTP client unavailable: {0}")]
    ClientUnavailable(String),

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl SearchError {
    /// Map this error onto the fixed wire taxonomy
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingCredentials => ErrorCode::AuthError,
            Self::Validation(_)
            | Self::Timeout(_)
            | Self::HttpStatus(_)
            | Self::Transport(_)
            | Self::Upstream { .. } => ErrorCode::SearchError,
            Self::ClientUnavailable(_) => ErrorCode::MissingDependency,
            Self::Malformed(_) | Self::Unknown(_) => ErrorCode::UnknownError,
        }
    }

    /// Whether a retry decorator may try the call again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(SearchError::MissingCredentials.code(), ErrorCode::AuthError);
        assert_eq!(SearchError::HttpStatus(502).code(), ErrorCode::SearchError);
        assert_eq!(
            SearchError::Timeout(Duration::from_secs(20)).code(),
            ErrorCode::SearchError
        );
        assert_eq!(
            SearchError::Malformed("eof".into()).code(),
            ErrorCode::UnknownError
        );
        assert_eq!(
            SearchError::ClientUnavailable("tls".into()).code(),
            ErrorCode::MissingDependency
        );
    }

    #[test]
    fn test_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::AuthError).unwrap();
        assert_eq!(json, "\"AUTH_ERROR\"");
        let code: ErrorCode = serde_json::from_str("\"MISSING_DEPENDENCY\"").unwrap();
        assert_eq!(code, ErrorCode::MissingDependency);
    }

    #[test]
    fn test_timeout_message() {
        let err = SearchError::Timeout(Duration::from_secs(20));
        assert_eq!(err.to_string(), "Sougou search timed out (20s)");
    }
}
