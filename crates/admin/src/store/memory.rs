//! In-memory order store.
//!
//! Backs tests and local development; no persistence. Implements the same
//! trait as the `PostgreSQL` store so handler tests exercise real routing,
//! extraction, and error mapping.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use orderdesk_core::{Order, OrderDocument, OrderId, OrderStatus};

use super::{OrderStore, StoreError};

/// Order store holding raw documents in memory.
///
/// A `BTreeMap` keeps iteration deterministic for tests.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    documents: RwLock<BTreeMap<String, OrderDocument>>,
}

impl MemoryOrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with raw documents.
    #[must_use]
    pub fn with_documents(documents: impl IntoIterator<Item = (OrderId, OrderDocument)>) -> Self {
        Self {
            documents: RwLock::new(
                documents
                    .into_iter()
                    .map(|(id, doc)| (String::from(id), doc))
                    .collect(),
            ),
        }
    }

    /// Insert or replace one document.
    pub fn insert(&self, id: OrderId, doc: OrderDocument) {
        self.write().insert(String::from(id), doc);
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, OrderDocument>> {
        self.documents.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, OrderDocument>> {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .read()
            .iter()
            .map(|(id, doc)| Order::from_document(OrderId::new(id.clone()), doc.clone()))
            .collect())
    }

    async fn get(&self, id: &OrderId) -> Result<Order, StoreError> {
        self.read()
            .get(id.as_str())
            .cloned()
            .map(|doc| Order::from_document(id.clone(), doc))
            .ok_or(StoreError::NotFound)
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), StoreError> {
        let mut documents = self.write();
        let doc = documents.get_mut(id.as_str()).ok_or(StoreError::NotFound)?;
        doc.status = Some(status.to_string());
        Ok(())
    }

    async fn mark_request_complete(&self, id: &OrderId) -> Result<(), StoreError> {
        let mut documents = self.write();
        let doc = documents.get_mut(id.as_str()).ok_or(StoreError::NotFound)?;
        doc.request_complete = Some(true);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn doc(status: &str) -> OrderDocument {
        OrderDocument {
            status: Some(status.to_string()),
            ..OrderDocument::default()
        }
    }

    #[tokio::test]
    async fn test_get_normalizes_documents() {
        let store =
            MemoryOrderStore::with_documents([(OrderId::new("ord-1"), doc("payment_done"))]);

        let order = store.get(&OrderId::new("ord-1")).await.unwrap();
        assert_eq!(order.status, OrderStatus::PaymentDone);
        assert_eq!(order.name, "");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let store = MemoryOrderStore::new();
        let err = store.get(&OrderId::new("missing")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_update_status_round_trips() {
        let store = MemoryOrderStore::with_documents([(OrderId::new("ord-1"), doc("inquiry"))]);

        store
            .update_status(&OrderId::new("ord-1"), OrderStatus::OnTrack)
            .await
            .unwrap();

        let order = store.get(&OrderId::new("ord-1")).await.unwrap();
        assert_eq!(order.status, OrderStatus::OnTrack);
    }

    #[tokio::test]
    async fn test_mark_request_complete_sets_flag() {
        let store = MemoryOrderStore::with_documents([(OrderId::new("ord-1"), doc("completed"))]);

        store
            .mark_request_complete(&OrderId::new("ord-1"))
            .await
            .unwrap();

        let order = store.get(&OrderId::new("ord-1")).await.unwrap();
        assert!(order.request_complete);
    }

    #[tokio::test]
    async fn test_mutations_on_unknown_ids_are_not_found() {
        let store = MemoryOrderStore::new();
        let id = OrderId::new("missing");

        assert!(matches!(
            store.update_status(&id, OrderStatus::OnTrack).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.mark_request_complete(&id).await,
            Err(StoreError::NotFound)
        ));
    }
}
