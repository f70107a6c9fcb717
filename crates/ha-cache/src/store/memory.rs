//! In-process backend store
//!
//! A `DashMap`-backed [`BackendStore`] for deterministic unit testing and
//! single-node deployments. It replicates nothing, but implements the full
//! adapter contract including listener registration, a no-op transaction
//! coordinator, and an availability switch for simulating store outages.

use std::sync::atomic::{AtomicBool, Ordering};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::errors::{BackendError, BackendResult};
use crate::topology::{TopologyEvent, TopologyListener};

use super::backend::{BackendLocator, BackendStore, StoreField, TransactionCoordinator};

/// In-process tree store: node path → field → value
#[derive(Default)]
pub struct MemoryStore {
    nodes: DashMap<String, HashMap<StoreField, Bytes>>,
    listeners: RwLock<Vec<Arc<dyn TopologyListener>>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the store becoming unreachable (or reachable again)
    ///
    /// While unavailable every get/put/remove fails with
    /// [`BackendError::Unreachable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of dialog nodes currently stored
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deliver a topology event to every registered listener
    ///
    /// Test hook standing in for the notification task a real cluster
    /// store runs.
    pub async fn emit(&self, event: TopologyEvent) {
        let listeners: Vec<_> = self.listeners.read().iter().cloned().collect();
        for listener in listeners {
            listener.on_topology_event(event.clone()).await;
        }
    }

    fn check_available(&self) -> BackendResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(BackendError::unreachable("simulated store outage"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BackendStore for MemoryStore {
    async fn get(&self, path: &str, field: StoreField) -> BackendResult<Option<Bytes>> {
        self.check_available()?;
        Ok(self
            .nodes
            .get(path)
            .and_then(|fields| fields.get(&field).cloned()))
    }

    async fn put(&self, path: &str, field: StoreField, value: Bytes) -> BackendResult<()> {
        self.check_available()?;
        self.nodes
            .entry(path.to_string())
            .or_default()
            .insert(field, value);
        Ok(())
    }

    async fn remove(&self, path: &str) -> BackendResult<()> {
        self.check_available()?;
        self.nodes.remove(path);
        Ok(())
    }

    async fn subscribe(&self, listener: Arc<dyn TopologyListener>) -> BackendResult<()> {
        self.check_available()?;
        self.listeners.write().push(listener);
        Ok(())
    }

    fn transaction_coordinator(&self) -> Option<Arc<dyn TransactionCoordinator>> {
        Some(Arc::new(NoopTransactionCoordinator))
    }
}

/// Transaction coordinator for the in-process store
///
/// Single-process writes are already atomic per field, so begin/commit/
/// rollback have nothing to do.
struct NoopTransactionCoordinator;

#[async_trait]
impl TransactionCoordinator for NoopTransactionCoordinator {
    async fn begin(&self) -> BackendResult<()> {
        Ok(())
    }

    async fn commit(&self) -> BackendResult<()> {
        Ok(())
    }

    async fn rollback(&self) -> BackendResult<()> {
        Ok(())
    }
}

/// Locator that resolves to a fixed store handle, or fails every lookup
///
/// The test/embedded counterpart of platform service discovery.
pub struct StaticLocator {
    store: Option<Arc<dyn BackendStore>>,
}

impl StaticLocator {
    /// Locator that always resolves to the given store
    pub fn new(store: Arc<dyn BackendStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Locator that fails every lookup, simulating absent clustering
    /// infrastructure
    pub fn unavailable() -> Self {
        Self { store: None }
    }
}

#[async_trait]
impl BackendLocator for StaticLocator {
    async fn locate(&self, service: &str) -> BackendResult<Arc<dyn BackendStore>> {
        match &self.store {
            Some(store) => Ok(store.clone()),
            None => Err(BackendError::lookup_failed(
                service,
                "no store registered under this service key",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fields_are_independent() {
        let store = MemoryStore::new();
        store
            .put("/sip/dialogs/a", StoreField::Metadata, Bytes::from("m"))
            .await
            .unwrap();

        let metadata = store.get("/sip/dialogs/a", StoreField::Metadata).await.unwrap();
        let app_data = store.get("/sip/dialogs/a", StoreField::AppData).await.unwrap();
        assert_eq!(metadata, Some(Bytes::from("m")));
        assert_eq!(app_data, None);
    }

    #[tokio::test]
    async fn test_remove_drops_all_fields() {
        let store = MemoryStore::new();
        store
            .put("/sip/dialogs/a", StoreField::Metadata, Bytes::from("m"))
            .await
            .unwrap();
        store
            .put("/sip/dialogs/a", StoreField::AppData, Bytes::from("d"))
            .await
            .unwrap();

        store.remove("/sip/dialogs/a").await.unwrap();
        assert_eq!(store.get("/sip/dialogs/a", StoreField::Metadata).await.unwrap(), None);
        assert_eq!(store.get("/sip/dialogs/a", StoreField::AppData).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_missing_path_is_not_an_error() {
        let store = MemoryStore::new();
        store.remove("/sip/dialogs/never-written").await.unwrap();
    }

    #[tokio::test]
    async fn test_outage_fails_every_operation() {
        let store = MemoryStore::new();
        store.set_unavailable(true);

        assert!(store.get("/x", StoreField::Metadata).await.is_err());
        assert!(store
            .put("/x", StoreField::Metadata, Bytes::from("m"))
            .await
            .is_err());
        assert!(store.remove("/x").await.is_err());

        store.set_unavailable(false);
        assert!(store.get("/x", StoreField::Metadata).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unavailable_locator_fails_lookup() {
        let locator = StaticLocator::unavailable();
        assert!(locator.locate("cluster/sip-dialog-cache").await.is_err());
    }
}
