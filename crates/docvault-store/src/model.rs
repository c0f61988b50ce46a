//! Domain model: users and their documents.

use serde::{Deserialize, Serialize};

/// A registered user.
///
/// Created once, at the first successful external handshake; immutable
/// afterwards. `provider_id` is the opaque subject reference issued by the
/// external identity provider, `id` is Docvault's own key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub provider_id: String,
    pub display_name: String,
}

/// A named JSON document owned by exactly one user.
///
/// The id is system-assigned at creation; the name is caller-supplied and
/// not required to be unique. Content is any well-formed JSON value — no
/// schema is enforced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub content: serde_json::Value,
}
