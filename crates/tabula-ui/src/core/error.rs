//! Failure taxonomy for authenticated requests.
//!
//! # Design
//! - Classify HTTP failures in exactly one place; features never inspect
//!   status codes themselves.
//! - Keep classification pure so it is testable off-wasm.
//! - Separate the stable `Display` text from the message shown to users,
//!   which may carry server-supplied detail.

use thiserror::Error;

/// Unified error surfaced by the request gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No token is held locally; the caller routes to login without a
    /// network call.
    #[error("no authentication token held")]
    MissingToken,
    /// The server rejected the token. The session has already been
    /// invalidated and navigation to login triggered by the gateway.
    #[error("session expired")]
    SessionExpired,
    /// Non-success response with an optional server-supplied detail.
    #[error("server rejected the request")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Best detail extracted from the failure body, when present.
        detail: Option<String>,
    },
    /// No response was received at all.
    #[error("server unreachable")]
    Unreachable,
    /// Transport succeeded but the payload violated the API contract.
    #[error("unexpected response shape")]
    UnexpectedResponse,
}

impl ApiError {
    /// Human-readable message for the presentation layer.
    ///
    /// Server detail is surfaced verbatim when provided; every other
    /// variant maps to a fixed phrasing.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingToken => "No authentication token found".to_string(),
            Self::SessionExpired => "Session expired. Please login again.".to_string(),
            Self::Server { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| "Request failed. Please try again.".to_string()),
            Self::Unreachable => "Server is not responding. Please try again later.".to_string(),
            Self::UnexpectedResponse => "Unexpected response from server".to_string(),
        }
    }
}

/// Convenience alias for gateway results.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP status the server uses to signal an invalid or expired session.
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Map a non-success HTTP status and extracted body detail to an error.
///
/// A 401 is session expiry regardless of body content; anything else keeps
/// the status and whatever detail the body carried.
#[must_use]
pub fn classify_status(status: u16, detail: Option<String>) -> ApiError {
    if status == STATUS_UNAUTHORIZED {
        ApiError::SessionExpired
    } else {
        ApiError::Server { status, detail }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, classify_status};

    #[test]
    fn unauthorized_classifies_as_session_expiry() {
        assert_eq!(classify_status(401, None), ApiError::SessionExpired);
        assert_eq!(
            classify_status(401, Some("token invalid".to_string())),
            ApiError::SessionExpired
        );
    }

    #[test]
    fn other_statuses_keep_server_detail() {
        assert_eq!(
            classify_status(500, Some("boom".to_string())),
            ApiError::Server {
                status: 500,
                detail: Some("boom".to_string()),
            }
        );
        assert_eq!(
            classify_status(400, None),
            ApiError::Server {
                status: 400,
                detail: None,
            }
        );
    }

    #[test]
    fn user_messages_prefer_server_detail() {
        let with_detail = ApiError::Server {
            status: 422,
            detail: Some("column 'revenue' missing".to_string()),
        };
        assert_eq!(with_detail.user_message(), "column 'revenue' missing");

        let without_detail = ApiError::Server {
            status: 502,
            detail: None,
        };
        assert_eq!(
            without_detail.user_message(),
            "Request failed. Please try again."
        );
        assert_eq!(
            ApiError::Unreachable.user_message(),
            "Server is not responding. Please try again later."
        );
    }
}
