//! Document store — schemaless JSON documents grouped into named collections.
//!
//! The only operation the service needs is `add`. There is no uniqueness
//! check and no idempotency key: adding the same document twice stores it twice.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Carried in `AppState` as `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts `document` into `collection` and returns the new document id.
    async fn add(&self, collection: &str, document: Value) -> Result<String>;
}

/// Postgres-backed store: every collection shares the `documents` JSONB table.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn add(&self, collection: &str, document: Value) -> Result<String> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, data)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(collection)
        .bind(&document)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to add document to collection '{collection}'"))?;

        Ok(id.to_string())
    }
}
