//! The storage contract consumed by the HTTP layer.

use crate::error::StoreError;
use crate::model::{Document, User};
use async_trait::async_trait;

/// Persistence operations over users and their owned documents.
///
/// Mutations are atomic with respect to the owning user's record: an
/// append or remove either fully lands or leaves the collection untouched.
/// Concurrent mutations from the same user resolve last-writer-wins; there
/// is no optimistic locking.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Look up a user by Docvault id.
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, StoreError>;

    /// Resolve the user for an external identity, creating the record on
    /// first contact. The display name is captured at creation and not
    /// updated on later handshakes.
    async fn find_or_create_user(
        &self,
        provider_id: &str,
        display_name: &str,
    ) -> Result<User, StoreError>;

    /// The user's documents in insertion order.
    async fn list_documents(&self, user_id: &str) -> Result<Vec<Document>, StoreError>;

    /// Append a new document with a freshly assigned id, returning the
    /// updated collection.
    async fn append_document(
        &self,
        user_id: &str,
        name: &str,
        content: serde_json::Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Remove the document with the given id, returning the updated
    /// collection. Removing an id that is absent (or owned by someone
    /// else) is a no-op, not an error.
    async fn remove_document(
        &self,
        user_id: &str,
        document_id: &str,
    ) -> Result<Vec<Document>, StoreError>;
}
