//! Clustered dialog cache implementation
//!
//! Composes the record codec with a backend store bound through service
//! lookup. If the lookup fails at `init()`, the cache flips to local-only
//! mode and every operation degrades gracefully instead of failing each
//! session.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::CacheConfig;
use crate::dialog::record::{decode_app_data, decode_metadata, encode_app_data, encode_metadata};
use crate::dialog::{ClusterMembership, HaDialog, StaticMembership, LAST_RESPONSE};
use crate::errors::{BackendError, CacheError, CacheResult};
use crate::message::SipResponse;
use crate::store::{BackendLocator, BackendStore, StaticLocator, StoreField, TransactionCoordinator};
use crate::topology::{LoggingTopologyListener, TopologyListener};

use super::dialog_cache::DialogCache;
use super::lifecycle::{CacheMode, LifecycleState, ModeController};

/// Dialog cache backed by a cluster-wide tree store
pub struct ClusteredDialogCache {
    config: CacheConfig,
    locator: Arc<dyn BackendLocator>,
    membership: Arc<dyn ClusterMembership>,
    listener: Arc<dyn TopologyListener>,
    /// Lazily bound at `init()`; absent in local-only mode
    backend: RwLock<Option<Arc<dyn BackendStore>>>,
    /// Captured at `start()` for future transactional use; current
    /// operations are single-key and never open a transaction
    coordinator: RwLock<Option<Arc<dyn TransactionCoordinator>>>,
    controller: ModeController,
}

impl ClusteredDialogCache {
    /// Create a cache that will bind its backend at `init()`
    pub fn new(
        config: CacheConfig,
        locator: Arc<dyn BackendLocator>,
        membership: Arc<dyn ClusterMembership>,
    ) -> Self {
        Self {
            config,
            locator,
            membership,
            listener: Arc::new(LoggingTopologyListener),
            backend: RwLock::new(None),
            coordinator: RwLock::new(None),
            controller: ModeController::new(),
        }
    }

    /// Create a cache already running against the given store
    ///
    /// Skips service lookup and listener registration; intended for tests
    /// and embeddings that manage the store handle themselves.
    pub fn clustered(
        config: CacheConfig,
        store: Arc<dyn BackendStore>,
        membership: Arc<dyn ClusterMembership>,
    ) -> Self {
        let cache = Self::new(config, Arc::new(StaticLocator::new(store.clone())), membership);
        *cache.backend.write() = Some(store);
        cache.controller.set_running(CacheMode::Clustered);
        cache
    }

    /// Create a cache already running in local-only mode
    pub fn local_only(config: CacheConfig) -> Self {
        let cache = Self::new(
            config,
            Arc::new(StaticLocator::unavailable()),
            Arc::new(StaticMembership::default()),
        );
        cache.controller.set_running(CacheMode::LocalOnly);
        cache
    }

    /// Replace the default logging topology listener before `init()`
    pub fn with_topology_listener(mut self, listener: Arc<dyn TopologyListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Bind the backend store and decide the operating mode
    ///
    /// Any failure here, from service lookup to listener registration, is
    /// logged and absorbed into local-only mode. A signaling node must
    /// keep functioning, unreplicated, when clustering is down.
    pub async fn init(&self) {
        match self.bind_backend().await {
            Ok(store) => {
                *self.backend.write() = Some(store);
                self.controller.set_running(CacheMode::Clustered);
                debug!(
                    service = %self.config.backend_service,
                    "bound cluster dialog store"
                );
            }
            Err(e) => {
                warn!(
                    service = %self.config.backend_service,
                    error = %e,
                    "could not initialize the cluster dialog store, defaulting to local mode"
                );
                self.controller.set_running(CacheMode::LocalOnly);
            }
        }
    }

    async fn bind_backend(&self) -> Result<Arc<dyn BackendStore>, BackendError> {
        let store = self.locator.locate(&self.config.backend_service).await?;
        store.subscribe(self.listener.clone()).await?;
        Ok(store)
    }

    /// Capture the transaction coordinator and report the running mode
    ///
    /// No-op in local-only mode.
    pub async fn start(&self) {
        if self.controller.in_local_mode() {
            return;
        }
        let Some(backend) = self.backend.read().clone() else {
            return;
        };
        if let Some(coordinator) = backend.transaction_coordinator() {
            *self.coordinator.write() = Some(coordinator);
        }
        info!(
            mode = ?self.controller.mode(),
            state = ?self.controller.state(),
            "replicated dialog cache started"
        );
    }

    /// Mark the cache stopped
    ///
    /// Does not disconnect the backend; the surrounding deployment owns
    /// the store's lifecycle.
    pub async fn stop(&self) {
        let was_local = self.controller.in_local_mode();
        self.controller.set_stopped();
        if !was_local {
            info!(
                mode = ?self.controller.mode(),
                state = ?self.controller.state(),
                "replicated dialog cache stopped"
            );
        }
    }

    /// Lifecycle position, for embedders that drive init/start/stop
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.controller.state()
    }

    /// Transaction coordinator captured at `start()`, if the store has one
    pub fn transaction_coordinator(&self) -> Option<Arc<dyn TransactionCoordinator>> {
        self.coordinator.read().clone()
    }

    fn bound_backend(&self, dialog_id: &str) -> CacheResult<Arc<dyn BackendStore>> {
        self.backend.read().clone().ok_or_else(|| {
            CacheError::unavailable(
                dialog_id,
                BackendError::unreachable("dialog cache backend not bound"),
            )
        })
    }

    /// Parse the stored last-response text back into a structured message
    fn rebuild_last_response(
        dialog_id: &str,
        stored: Option<&Value>,
    ) -> CacheResult<Option<SipResponse>> {
        match stored {
            None => Ok(None),
            Some(Value::String(text)) => text
                .parse::<SipResponse>()
                .map(Some)
                .map_err(|e| CacheError::deserialization(dialog_id, e.to_string())),
            Some(other) => Err(CacheError::deserialization(
                dialog_id,
                format!("{} field holds {:?}, expected a string", LAST_RESPONSE, other),
            )),
        }
    }
}

#[async_trait]
impl DialogCache for ClusteredDialogCache {
    async fn get_dialog(&self, dialog_id: &str) -> CacheResult<Option<HaDialog>> {
        if self.controller.in_local_mode() {
            return Ok(None);
        }
        let backend = self.bound_backend(dialog_id)?;
        let path = self.config.dialog_path(dialog_id);

        // Metadata is the authoritative existence signal
        let Some(raw_metadata) = backend
            .get(&path, StoreField::Metadata)
            .await
            .map_err(|e| CacheError::unavailable(dialog_id, e))?
        else {
            return Ok(None);
        };

        let metadata = decode_metadata(&raw_metadata)
            .map_err(|e| CacheError::deserialization(dialog_id, e.to_string()))?;
        let last_response = Self::rebuild_last_response(dialog_id, metadata.get(LAST_RESPONSE))?;

        let mut dialog = HaDialog::rebuilt(
            dialog_id,
            last_response,
            self.config.replication_strategy,
            self.membership.members(),
        );
        dialog.apply_replicated_metadata(metadata);

        let raw_app_data = backend
            .get(&path, StoreField::AppData)
            .await
            .map_err(|e| CacheError::unavailable(dialog_id, e))?;
        if let Some(raw) = raw_app_data {
            let app_data = decode_app_data(&raw)
                .map_err(|e| CacheError::deserialization(dialog_id, e.to_string()))?;
            dialog.set_application_data(Some(app_data));
        }

        debug!(dialog_id = %dialog_id, "rebuilt dialog from replicated state");
        Ok(Some(dialog))
    }

    async fn put_dialog(&self, dialog: &HaDialog) -> CacheResult<()> {
        if self.controller.in_local_mode() {
            return Ok(());
        }
        let dialog_id = dialog.dialog_id();
        let backend = self.bound_backend(dialog_id)?;
        let path = self.config.dialog_path(dialog_id);

        // Two independent writes; the backend is atomic per field only, so
        // a crash between them leaves a partial record until the next put.
        let metadata = dialog.metadata_to_replicate();
        if !metadata.is_empty() {
            let encoded = encode_metadata(metadata)
                .map_err(|e| CacheError::deserialization(dialog_id, e.to_string()))?;
            backend
                .put(&path, StoreField::Metadata, encoded)
                .await
                .map_err(|e| CacheError::unavailable(dialog_id, e))?;
        }
        if let Some(app_data) = dialog.application_data() {
            let encoded = encode_app_data(app_data)
                .map_err(|e| CacheError::deserialization(dialog_id, e.to_string()))?;
            backend
                .put(&path, StoreField::AppData, encoded)
                .await
                .map_err(|e| CacheError::unavailable(dialog_id, e))?;
        }

        debug!(dialog_id = %dialog_id, "replicated dialog state");
        Ok(())
    }

    async fn remove_dialog(&self, dialog_id: &str) -> CacheResult<()> {
        if self.controller.in_local_mode() {
            return Ok(());
        }
        let backend = self.bound_backend(dialog_id)?;
        let path = self.config.dialog_path(dialog_id);
        backend
            .remove(&path)
            .await
            .map_err(|e| CacheError::unavailable(dialog_id, e))?;

        debug!(dialog_id = %dialog_id, "removed replicated dialog state");
        Ok(())
    }

    fn in_local_mode(&self) -> bool {
        self.controller.in_local_mode()
    }
}
