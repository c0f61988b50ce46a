//! Request handlers for the document API.
//!
//! Every handler runs behind the identity resolver; the verified subject in
//! request extensions is the only source of "whose documents". No endpoint
//! accepts a client-supplied user id.

use crate::error::ApiError;
use crate::middleware::Identity;
use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use docvault_store::{Document, User};
use serde_json::Value;

/// Handler for `GET /api/files`: the caller's documents in insertion order.
pub async fn list_files(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let user = require_user(&state, &identity).await?;
    let documents = state.store().list_documents(&user.id).await?;
    Ok(Json(documents))
}

/// Handler for `POST /api/files`: append a named JSON document and return
/// the updated collection.
///
/// The body must carry `name` (non-empty string) and `content` (any JSON
/// value, `null` included); it is validated by hand so malformed bodies go
/// through the centralized 400 path rather than an extractor rejection.
pub async fn create_file(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Vec<Document>>), ApiError> {
    let (name, content) = parse_create_body(body)?;
    let user = require_user(&state, &identity).await?;

    let documents = state.store().append_document(&user.id, &name, content).await?;
    tracing::info!(user_id = %user.id, name = %name, "document created");

    Ok((StatusCode::CREATED, Json(documents)))
}

/// Handler for `DELETE /api/files/{id}`: remove the caller's document with
/// the given id and return the updated collection.
///
/// Removal is idempotent: an unknown id (including one owned by another
/// user) leaves the collection unchanged and still succeeds.
pub async fn delete_file(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let user = require_user(&state, &identity).await?;

    let documents = state.store().remove_document(&user.id, &id).await?;
    tracing::info!(user_id = %user.id, document_id = %id, "document delete handled");

    Ok(Json(documents))
}

/// Load the user record behind a verified subject. A missing record after
/// successful verification is an integrity fault, reported as 500.
async fn require_user(state: &AppState, identity: &Identity) -> Result<User, ApiError> {
    state
        .store()
        .find_user(&identity.user_id)
        .await?
        .ok_or_else(|| ApiError::UserMissing(identity.user_id.clone()))
}

fn parse_create_body(body: Value) -> Result<(String, Value), ApiError> {
    let Value::Object(mut fields) = body else {
        return Err(ApiError::InvalidRequest(
            "body must be a JSON object".to_string(),
        ));
    };

    let name = match fields.get("name") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        _ => {
            return Err(ApiError::InvalidRequest(
                "name must be a non-empty string".to_string(),
            ));
        }
    };

    let content = fields
        .remove("content")
        .ok_or_else(|| ApiError::InvalidRequest("content is required".to_string()))?;

    Ok((name, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_body_accepts_any_content() {
        for content in [json!(null), json!(42), json!({"nested": [1, 2]})] {
            let (name, parsed) =
                parse_create_body(json!({"name": "a.json", "content": content})).unwrap();
            assert_eq!(name, "a.json");
            assert_eq!(parsed, content);
        }
    }

    #[test]
    fn test_create_body_requires_name() {
        assert!(parse_create_body(json!({"content": {}})).is_err());
        assert!(parse_create_body(json!({"name": "", "content": {}})).is_err());
        assert!(parse_create_body(json!({"name": 7, "content": {}})).is_err());
    }

    #[test]
    fn test_create_body_requires_content_key() {
        assert!(parse_create_body(json!({"name": "a.json"})).is_err());
    }

    #[test]
    fn test_create_body_rejects_non_object() {
        assert!(parse_create_body(json!(["name", "content"])).is_err());
    }
}
