use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::errors::AppError;
use crate::repositories::record_store::{Collection, ListOrder, RecordStore, StoredDocument};

/// Document store backed by PostgreSQL. All collections share one
/// `documents` table keyed by `(collection, id)` with the payload in a
/// `jsonb` column; timestamps are server-assigned.
#[derive(Clone)]
pub struct RemoteStore {
    pool: PgPool,
}

impl RemoteStore {
    pub fn new(pool: PgPool) -> Self {
        RemoteStore { pool }
    }

    fn row_to_document(row: &sqlx::postgres::PgRow) -> Result<StoredDocument, AppError> {
        Ok(StoredDocument {
            id: row.try_get("id")?,
            data: row.try_get("data")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl RecordStore for RemoteStore {
    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, AppError> {
        let order = match collection.list_order() {
            ListOrder::NewestFirst => "DESC",
            ListOrder::InsertionOrder => "ASC",
        };
        let sql = format!(
            "SELECT id, data, created_at, updated_at FROM documents \
             WHERE collection = $1 ORDER BY created_at {order}, id {order}"
        );

        let rows = sqlx::query(&sql)
            .bind(collection.name())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_document).collect()
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<StoredDocument, AppError> {
        let row = sqlx::query(
            "SELECT id, data, created_at, updated_at FROM documents \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection.name())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_document(&row),
            None => Err(AppError::NotFound(format!(
                "No {} record with id {}",
                collection.name(),
                id
            ))),
        }
    }

    async fn insert(&self, collection: Collection, data: Value) -> Result<StoredDocument, AppError> {
        let id = Uuid::new_v4().to_string();

        let row = sqlx::query(
            "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
             RETURNING created_at, updated_at",
        )
        .bind(collection.name())
        .bind(&id)
        .bind(&data)
        .fetch_one(&self.pool)
        .await?;

        Ok(StoredDocument {
            id,
            data,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    async fn patch(&self, collection: Collection, id: &str, patch: Value) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3, updated_at = now() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection.name())
        .bind(id)
        .bind(&patch)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No {} record with id {}",
                collection.name(),
                id
            )));
        }
        Ok(())
    }

    async fn merge_set(&self, collection: Collection, id: &str, patch: Value) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) DO UPDATE \
             SET data = documents.data || EXCLUDED.data, updated_at = now()",
        )
        .bind(collection.name())
        .bind(id)
        .bind(&patch)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), AppError> {
        // Deleting an absent id is a success, matching the local store.
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
