//! Order document store.
//!
//! The dashboard reads and writes a single document collection. Handlers
//! depend on the [`OrderStore`] trait and receive a concrete store through
//! [`crate::state::AppState`], so tests substitute [`MemoryOrderStore`] for
//! the `PostgreSQL`-backed store.
//!
//! Raw documents are normalized into [`Order`] here at the boundary; nothing
//! past the store observes a missing field or an out-of-set status.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use orderdesk_core::{Order, OrderId, OrderStatus};

pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A persisted document does not decode as an order.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested order was not found.
    #[error("not found")]
    NotFound,
}

/// Read/write operations on the order collection.
///
/// Mutations are single-field updates, atomic per document; serializing
/// concurrent writers on the same document is the backend's job.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fetch every order in the collection, normalized.
    ///
    /// No filtering and no pagination - the query engine does all
    /// filtering, sorting, and bucketing after retrieval.
    async fn list_all(&self) -> Result<Vec<Order>, StoreError>;

    /// Fetch one order by id.
    async fn get(&self, id: &OrderId) -> Result<Order, StoreError>;

    /// Overwrite the status field of one order.
    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), StoreError>;

    /// Set the `requestComplete` flag of one order.
    async fn mark_request_complete(&self, id: &OrderId) -> Result<(), StoreError>;

    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
