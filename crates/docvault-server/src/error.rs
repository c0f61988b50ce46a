//! Error types for the server crate.
//!
//! All handler and middleware failures funnel through [`ApiError`], which
//! owns the single kind-to-status table for the whole HTTP surface. Client
//! bodies stay terse (status plus short text), never structured objects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docvault_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the request layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token in the Authorization header.
    #[error("access denied")]
    MissingCredential,

    /// The presented credential failed verification. Invalid-signature and
    /// expired are deliberately collapsed here; the resolver logs which.
    #[error("invalid token")]
    RejectedCredential,

    /// The request body is missing a required field or malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A verified subject has no backing user record. This is a
    /// resolver/store inconsistency, not a client error.
    #[error("no user record for verified subject {0}")]
    UserMissing(String),

    /// Any persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingCredential => (StatusCode::UNAUTHORIZED, "Access denied"),
            ApiError::RejectedCredential => (StatusCode::BAD_REQUEST, "Invalid token"),
            ApiError::InvalidRequest(reason) => {
                return (StatusCode::BAD_REQUEST, reason.clone()).into_response();
            }
            ApiError::UserMissing(_) | ApiError::Store(_) | ApiError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        };

        (status, body).into_response()
    }
}
