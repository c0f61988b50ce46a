//! # docvault-store
//!
//! Persistence for Docvault users and their documents.
//!
//! A user record owns an ordered collection of named JSON documents. The
//! [`DocumentStore`] trait is the storage contract consumed by the HTTP
//! layer; [`SqliteStore`] is the sqlx-backed implementation. Every store
//! call is scoped by a user id that the caller resolved from a verified
//! credential — nothing here trusts a client-supplied id.

pub mod error;
pub mod model;
pub mod sqlite;
pub mod store;

pub use error::StoreError;
pub use model::{Document, User};
pub use sqlite::SqliteStore;
pub use store::DocumentStore;
