//! # docvault-token
//!
//! Bearer credential handling for Docvault.
//!
//! This crate provides functionality for:
//! - Issuing signed, expiring identity tokens (HS256 JWTs)
//! - Verifying tokens against the server's signing secret
//! - Classifying verification failures (malformed / bad signature / expired)
//!
//! A credential is a self-contained, stateless capability: it carries the
//! subject's user id, an issuance time, and an expiry a fixed TTL later.
//! Nothing is persisted server-side, and there is no revocation — a token
//! stays valid for its full TTL.

pub mod claims;
pub mod codec;
pub mod error;

pub use claims::Claims;
pub use codec::CredentialCodec;
pub use error::TokenError;
