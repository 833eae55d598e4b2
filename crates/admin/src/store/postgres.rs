//! `PostgreSQL`-backed order store.
//!
//! Orders live in a single `orders` table as one JSONB document per row,
//! keyed by a text id. Field mutations go through `jsonb_set` in a single
//! `UPDATE`, so each write touches exactly one field of one document.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::migrate::Migrator;

use orderdesk_core::{Order, OrderDocument, OrderId, OrderStatus};

use super::{OrderStore, StoreError};

/// Embedded migrations for the order collection table.
///
/// Run via: `cargo run -p orderdesk-cli -- migrate`
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Order store backed by a `PostgreSQL` JSONB collection.
#[derive(Debug, Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace one document. Used by the seeding CLI; the
    /// dashboard itself never creates orders.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document does not encode or the insert
    /// fails.
    pub async fn insert(&self, id: &OrderId, doc: &OrderDocument) -> Result<(), StoreError> {
        let doc =
            serde_json::to_value(doc).map_err(|e| StoreError::DataCorruption(e.to_string()))?;
        sqlx::query(
            "INSERT INTO orders (id, doc) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
        )
        .bind(id.as_str())
        .bind(doc)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn decode(id: String, doc: serde_json::Value) -> Result<Order, StoreError> {
        let doc: OrderDocument = serde_json::from_value(doc)
            .map_err(|e| StoreError::DataCorruption(format!("order {id}: {e}")))?;
        Ok(Order::from_document(OrderId::new(id), doc))
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let rows: Vec<(String, serde_json::Value)> =
            sqlx::query_as("SELECT id, doc FROM orders ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|(id, doc)| Self::decode(id, doc))
            .collect()
    }

    async fn get(&self, id: &OrderId) -> Result<Order, StoreError> {
        let row: Option<(String, serde_json::Value)> =
            sqlx::query_as("SELECT id, doc FROM orders WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        let (id, doc) = row.ok_or(StoreError::NotFound)?;
        Self::decode(id, doc)
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE orders
             SET doc = jsonb_set(doc, '{status}', to_jsonb($2::text))
             WHERE id = $1",
        )
        .bind(id.as_str())
        .bind(status.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn mark_request_complete(&self, id: &OrderId) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE orders
             SET doc = jsonb_set(doc, '{requestComplete}', 'true'::jsonb)
             WHERE id = $1",
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
