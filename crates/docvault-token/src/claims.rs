//! Claims carried by an issued credential.

use serde::{Deserialize, Serialize};

/// The claim set signed into every credential.
///
/// `sub` is the Docvault user id (not the external provider id); `iat` and
/// `exp` are unix timestamps in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the user id the credential was issued for.
    pub sub: String,
    /// Issuance time (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds); `iat` plus the configured TTL.
    pub exp: i64,
}

impl Claims {
    /// Number of seconds this credential was issued to live.
    pub fn lifetime_secs(&self) -> i64 {
        self.exp - self.iat
    }
}
