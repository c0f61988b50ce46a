//! Error types for the token crate.

use thiserror::Error;

/// Errors that can occur while verifying (or issuing) a credential.
///
/// The three verification failures are deliberately distinguishable so the
/// request boundary can decide how much to collapse when reporting them.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token could not be parsed or decoded at all.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The signature does not verify under the configured secret.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// The token was well-formed and correctly signed, but past its expiry.
    #[error("token has expired")]
    Expired,

    /// Signing a new token failed.
    #[error("failed to sign token: {0}")]
    SigningFailed(String),
}

impl TokenError {
    /// Classify a `jsonwebtoken` verification error.
    pub(crate) fn from_verification(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}
