//! # docvault-server
//!
//! The Docvault HTTP surface: Google OAuth handshake, bearer-credential
//! identity resolution, and the per-user document API.
//!
//! Request flow: `/auth/google` hands the browser to the external provider;
//! the callback resolves (or creates) the user record and issues a signed
//! one-hour credential. `/api/*` requests pass through the identity
//! resolver middleware, which verifies the credential and binds the subject
//! to the request; handlers then operate only on that subject's documents.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
