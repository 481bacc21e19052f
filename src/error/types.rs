/**
 * Backend Error Types
 *
 * This module defines the single error type returned to clients by the
 * authentication flows, together with the classification rules that map
 * low-level persistence and validation failures onto it.
 *
 * # Classification Precedence
 *
 * 1. Malformed entity reference -> "Resource Not Found", 404
 * 2. Storage uniqueness violation -> "Duplicate field value entered", 400
 * 3. Field validation failure -> per-field messages joined with ", ", 400
 * 4. Application-raised error -> its own (message, status), unchanged
 * 5. Anything else -> "Server Error", 500
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::auth::password::PasswordError;

/// Client-facing error for the authentication flows
///
/// Every variant carries exactly what the client is allowed to see. The
/// `Internal` variant keeps the underlying detail for logging but always
/// presents as "Server Error".
#[derive(Debug, Error)]
pub enum ApiError {
    /// A reference to an entity could not be parsed (e.g. a malformed
    /// user id inside a token)
    #[error("Resource Not Found")]
    NotFound,

    /// The storage layer rejected a write because a unique field already
    /// holds this value
    #[error("Duplicate field value entered")]
    Duplicate,

    /// One or more fields failed validation; messages are reported joined
    /// with ", " in the order they were collected
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// An error raised explicitly by application logic, carrying its own
    /// message and status
    #[error("{message}")]
    App {
        /// Human-readable error message
        message: String,
        /// HTTP status code for this error
        status: StatusCode,
    },

    /// Any unclassified failure; the inner string is logged, never sent
    #[error("Server Error")]
    Internal(String),
}

impl ApiError {
    /// Create an application-raised error with an explicit status code
    pub fn app(message: impl Into<String>, status: StatusCode) -> Self {
        Self::App {
            message: message.into(),
            status,
        }
    }

    /// Create a 400 Bad Request application error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::app(message, StatusCode::BAD_REQUEST)
    }

    /// The uniform bad-credentials failure
    ///
    /// Used identically for "no such user" and "wrong password" so the
    /// response never reveals which of the two occurred.
    pub fn unauthorized() -> Self {
        Self::app("Invalid Credentials", StatusCode::UNAUTHORIZED)
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Duplicate | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::App { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<sqlx::Error> for ApiError {
    /// Classify a persistence failure
    ///
    /// Unique-constraint violations become `Duplicate`; a missing row on a
    /// lookup by reference becomes `NotFound`; everything else is
    /// unclassified and presents as "Server Error".
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Duplicate,
            _ => Self::Internal(err.to_string()),
        }
    }
}

impl From<uuid::Error> for ApiError {
    /// A malformed entity id is a bad reference, not a server fault
    fn from(_: uuid::Error) -> Self {
        Self::NotFound
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error() {
        let error = ApiError::app("Email is already registered", StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Email is already registered");
    }

    #[test]
    fn test_unauthorized_is_uniform() {
        let a = ApiError::unauthorized();
        let b = ApiError::unauthorized();
        assert_eq!(a.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(a.message(), b.message());
    }

    #[test]
    fn test_validation_messages_joined() {
        let error = ApiError::Validation(vec![
            "Username is Required".to_string(),
            "Email is Required".to_string(),
        ]);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Username is Required, Email is Required");
    }

    #[test]
    fn test_row_not_found_classification() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.message(), "Resource Not Found");
    }

    #[test]
    fn test_unclassified_sqlx_error_is_server_error() {
        let error: ApiError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Server Error");
    }

    #[test]
    fn test_malformed_id_classification() {
        let parse_failure = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
        let error: ApiError = parse_failure.into();
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.message(), "Resource Not Found");
    }

    #[test]
    fn test_internal_detail_never_in_message() {
        let error = ApiError::Internal("connection refused to db host".to_string());
        assert_eq!(error.message(), "Server Error");
    }
}
