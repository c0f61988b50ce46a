//! SQLite-backed implementation of the store contract.

use crate::error::StoreError;
use crate::model::{Document, User};
use crate::store::DocumentStore;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use uuid::Uuid;

/// User and document persistence over a local SQLite file.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `path` and run migrations.
    pub async fn connect(path: &str) -> Result<Self, StoreError> {
        ensure_parent_dir(path)?;

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!(path, "document store ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, provider_id, display_name FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_or_create_user(
        &self,
        provider_id: &str,
        display_name: &str,
    ) -> Result<User, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO users (id, provider_id, display_name) VALUES (?, ?, ?) \
             ON CONFLICT(provider_id) DO NOTHING",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(provider_id)
        .bind(display_name)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, provider_id, display_name FROM users WHERE provider_id = ?",
        )
        .bind(provider_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into_user())
    }

    async fn list_documents(&self, user_id: &str) -> Result<Vec<Document>, StoreError> {
        fetch_documents(&self.pool, user_id).await
    }

    async fn append_document(
        &self,
        user_id: &str,
        name: &str,
        content: serde_json::Value,
    ) -> Result<Vec<Document>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let position: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM documents WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO documents (id, user_id, name, content, position) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(name)
        .bind(serde_json::to_string(&content)?)
        .bind(position)
        .execute(&mut *tx)
        .await?;

        let documents = fetch_documents(&mut *tx, user_id).await?;
        tx.commit().await?;

        tracing::debug!(user_id, document_id = %id, "document appended");
        Ok(documents)
    }

    async fn remove_document(
        &self,
        user_id: &str,
        document_id: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Scoping by user id makes a forged id owned by someone else a no-op.
        let result = sqlx::query("DELETE FROM documents WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(document_id)
            .execute(&mut *tx)
            .await?;

        let documents = fetch_documents(&mut *tx, user_id).await?;
        tx.commit().await?;

        tracing::debug!(
            user_id,
            document_id,
            removed = result.rows_affected(),
            "document removal"
        );
        Ok(documents)
    }
}

async fn fetch_documents<'e, E>(executor: E, user_id: &str) -> Result<Vec<Document>, StoreError>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let rows = sqlx::query_as::<_, DocumentRow>(
        "SELECT id, name, content FROM documents WHERE user_id = ? ORDER BY position",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    rows.into_iter().map(DocumentRow::into_document).collect()
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    provider_id: String,
    display_name: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            provider_id: self.provider_id,
            display_name: self.display_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: String,
    name: String,
    content: String,
}

impl DocumentRow {
    fn into_document(self) -> Result<Document, StoreError> {
        Ok(Document {
            id: self.id,
            name: self.name,
            content: serde_json::from_str(&self.content)?,
        })
    }
}

fn ensure_parent_dir(file_path: &str) -> Result<(), StoreError> {
    let p = Path::new(file_path);
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn open_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sqlite");
        let store = SqliteStore::connect(path.to_str().unwrap()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_find_or_create_user_is_stable() {
        let (_dir, store) = open_store().await;

        let first = store.find_or_create_user("g-123", "Ada").await.unwrap();
        let second = store.find_or_create_user("g-123", "Renamed").await.unwrap();

        assert_eq!(first.id, second.id);
        // Display name is captured at first handshake only.
        assert_eq!(second.display_name, "Ada");

        let looked_up = store.find_user(&first.id).await.unwrap().unwrap();
        assert_eq!(looked_up, first);
    }

    #[tokio::test]
    async fn test_find_user_missing() {
        let (_dir, store) = open_store().await;
        assert!(store.find_user("no-such-user").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_grows_collection_with_fresh_id() {
        let (_dir, store) = open_store().await;
        let user = store.find_or_create_user("g-1", "Ada").await.unwrap();

        let before = store.list_documents(&user.id).await.unwrap();
        let after = store
            .append_document(&user.id, "a.json", json!({"x": 1}))
            .await
            .unwrap();

        assert_eq!(after.len(), before.len() + 1);
        let created = after.last().unwrap();
        assert_eq!(created.name, "a.json");
        assert_eq!(created.content, json!({"x": 1}));
        assert!(before.iter().all(|d| d.id != created.id));
    }

    #[tokio::test]
    async fn test_documents_keep_insertion_order() {
        let (_dir, store) = open_store().await;
        let user = store.find_or_create_user("g-1", "Ada").await.unwrap();

        for name in ["one", "two", "three"] {
            store
                .append_document(&user.id, name, json!(null))
                .await
                .unwrap();
        }

        let docs = store.list_documents(&user.id).await.unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["one", "two", "three"]);

        // Removing from the middle keeps the rest in order.
        let middle = docs[1].id.clone();
        let docs = store.remove_document(&user.id, &middle).await.unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["one", "three"]);
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_noop() {
        let (_dir, store) = open_store().await;
        let user = store.find_or_create_user("g-1", "Ada").await.unwrap();
        store
            .append_document(&user.id, "keep.json", json!(true))
            .await
            .unwrap();

        let docs = store
            .remove_document(&user.id, "does-not-exist")
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "keep.json");
    }

    #[tokio::test]
    async fn test_cross_user_isolation() {
        let (_dir, store) = open_store().await;
        let alice = store.find_or_create_user("g-a", "Alice").await.unwrap();
        let bob = store.find_or_create_user("g-b", "Bob").await.unwrap();

        store
            .append_document(&alice.id, "alice.json", json!(1))
            .await
            .unwrap();
        let bobs = store
            .append_document(&bob.id, "bob.json", json!(2))
            .await
            .unwrap();
        let bobs_doc = bobs[0].id.clone();

        // Alice cannot see Bob's documents.
        let alice_docs = store.list_documents(&alice.id).await.unwrap();
        assert_eq!(alice_docs.len(), 1);
        assert_eq!(alice_docs[0].name, "alice.json");

        // A forged id pointing at Bob's document is a no-op for Alice.
        let alice_docs = store.remove_document(&alice.id, &bobs_doc).await.unwrap();
        assert_eq!(alice_docs.len(), 1);
        assert_eq!(store.list_documents(&bob.id).await.unwrap().len(), 1);
    }
}
