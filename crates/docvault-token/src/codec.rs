//! Credential issuance and verification.

use crate::claims::Claims;
use crate::error::TokenError;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// Issues and verifies signed, expiring credentials.
///
/// Holds only the configured signing secret (as derived HS256 keys) and the
/// fixed TTL; issuing is a pure function of subject + secret + clock.
#[derive(Clone)]
pub struct CredentialCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl CredentialCodec {
    /// Create a codec from the server's signing secret and credential TTL.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; the default 60s leeway would let expired tokens
        // through the boundary tests.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            validation,
        }
    }

    /// The configured credential lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed credential for the given subject.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + self.ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a credential and return its subject id.
    ///
    /// Checks structural validity, signature authenticity, and expiry,
    /// failing with the matching [`TokenError`] variant.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        Ok(self.decode(token)?.sub)
    }

    /// Verify a credential and return the full claim set.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from_verification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(secret: &str) -> CredentialCodec {
        CredentialCodec::new(secret, Duration::hours(1))
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let codec = codec("test-secret");
        let token = codec.issue("user-42").unwrap();
        assert!(!token.is_empty());

        let subject = codec.verify(&token).unwrap();
        assert_eq!(subject, "user-42");
    }

    #[test]
    fn test_claims_carry_configured_ttl() {
        let codec = codec("test-secret");
        let token = codec.issue("user-42").unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.sub, "user-42");
        assert_eq!(claims.lifetime_secs(), 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Correctly signed, already past expiry.
        let expired = CredentialCodec::new("test-secret", Duration::seconds(-30));
        let token = expired.issue("user-42").unwrap();

        let err = codec("test-secret").verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::Expired), "got {err:?}");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = codec("secret-a").issue("user-42").unwrap();

        let err = codec("secret-b").verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::InvalidSignature), "got {err:?}");
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let err = codec("test-secret").verify("not-a-token").unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)), "got {err:?}");
    }
}
