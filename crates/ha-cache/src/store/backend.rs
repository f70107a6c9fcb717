//! Backend store capability interface
//!
//! A backend store is a tree-structured key/value service: values live under
//! a node path, addressed by a field name. The cache stores each dialog
//! under one path with two fields, so a single `remove(path)` drops the
//! whole record.
//!
//! The store guarantees atomicity per individual field write only. Nothing
//! here coordinates across fields; concurrent writers to the same field
//! race and the last writer wins.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::BackendResult;
use crate::topology::TopologyListener;

/// The two fields stored per dialog node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreField {
    /// Structured, replicable dialog fields
    Metadata,
    /// Opaque payload owned by the layer above the cache
    AppData,
}

impl StoreField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "METADATA",
            Self::AppData => "APPDATA",
        }
    }
}

/// Coordinator for wrapping multiple store calls in one transaction
///
/// Exposed by stores that support it, retrieved by the cache at `start()`.
/// Current cache operations are single-key and do not open transactions;
/// the handle exists so a future atomic put of both fields can use it.
#[async_trait]
pub trait TransactionCoordinator: Send + Sync {
    /// Open a transaction on the calling task
    async fn begin(&self) -> BackendResult<()>;
    /// Commit the open transaction
    async fn commit(&self) -> BackendResult<()>;
    /// Roll the open transaction back
    async fn rollback(&self) -> BackendResult<()>;
}

/// Capability interface over a cluster-wide tree-structured key/value store
#[async_trait]
pub trait BackendStore: Send + Sync {
    /// Fetch one field under a path; `None` if path or field is absent
    async fn get(&self, path: &str, field: StoreField) -> BackendResult<Option<Bytes>>;

    /// Write one field under a path, creating the path if needed
    async fn put(&self, path: &str, field: StoreField, value: Bytes) -> BackendResult<()>;

    /// Remove a path and every field under it; missing paths are not an error
    async fn remove(&self, path: &str) -> BackendResult<()>;

    /// Register a listener for cluster topology changes
    async fn subscribe(&self, listener: Arc<dyn TopologyListener>) -> BackendResult<()>;

    /// Transaction coordinator, if this store supports transactions
    fn transaction_coordinator(&self) -> Option<Arc<dyn TransactionCoordinator>>;
}

/// Service-lookup seam for binding a store handle at initialization
///
/// Production deployments resolve the handle through whatever discovery
/// mechanism the platform provides; tests hand the cache a
/// [`StaticLocator`](super::StaticLocator) instead.
#[async_trait]
pub trait BackendLocator: Send + Sync {
    /// Resolve the store registered under the given service key
    async fn locate(&self, service: &str) -> BackendResult<Arc<dyn BackendStore>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Wire names are shared with every other implementation reading the
    // same store; they must never drift.
    #[test]
    fn test_field_wire_names() {
        assert_eq!(StoreField::Metadata.as_str(), "METADATA");
        assert_eq!(StoreField::AppData.as_str(), "APPDATA");
    }
}
