//! # sip-ha-cache
//!
//! Replicated dialog state cache for clustered SIP signaling stacks.
//!
//! A long-lived dialog must survive the failure of the node that created
//! it. This crate persists a dialog's mutable state into a cluster-wide
//! tree store so any node can resume or terminate the call, and degrades
//! to an unreplicated local-only mode when the clustering infrastructure
//! is unreachable rather than refusing to start.
//!
//! ## Architecture
//!
//! ```text
//! protocol stack
//!      │ get_dialog / put_dialog / remove_dialog
//!      ▼
//! DialogCache (ClusteredDialogCache)
//!      │ metadata + app data, split by the record codec
//!      ▼
//! BackendStore (capability interface)          TopologyListener
//!      │ get/put/remove (path, field)               ▲ membership events
//!      ▼                                            │
//! cluster-wide tree store  ──────────────────────────
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sip_ha_cache::{
//!     CacheConfig, ClusteredDialogCache, DialogCache, HaDialog, MemoryStore, SipResponse,
//!     StaticLocator, StaticMembership,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let cache = ClusteredDialogCache::new(
//!         CacheConfig::default(),
//!         Arc::new(StaticLocator::new(store)),
//!         Arc::new(StaticMembership::default()),
//!     );
//!     cache.init().await;
//!     cache.start().await;
//!
//!     let mut dialog = HaDialog::new("call-42");
//!     dialog.set_last_response("SIP/2.0 200 OK\r\nCall-ID: call-42\r\n\r\n".parse::<SipResponse>()?);
//!     cache.put_dialog(&dialog).await?;
//!
//!     let rebuilt = cache.get_dialog("call-42").await?.expect("dialog was replicated");
//!     assert_eq!(rebuilt.last_response().unwrap().status_code(), 200);
//!
//!     cache.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Failure semantics
//!
//! - Backend lookup failure at `init()` is absorbed: the cache logs a
//!   warning, answers `in_local_mode() == true`, and every operation
//!   becomes a successful no-op.
//! - Steady-state backend failures surface as
//!   [`CacheError::Unavailable`]; unparseable stored state surfaces as
//!   [`CacheError::Deserialization`]. The caller decides whether to
//!   retry, fall back to local state, or end the call; the cache never
//!   retries on its own.
//! - The metadata and application-data writes of one `put_dialog` are not
//!   atomic. The backend gives per-field atomicity only.

pub mod cache;
pub mod config;
pub mod dialog;
pub mod errors;
pub mod message;
pub mod store;
pub mod topology;

// Re-export the public surface
pub use cache::{CacheMode, ClusteredDialogCache, DialogCache, LifecycleState};
pub use config::{CacheConfig, ReplicationStrategy};
pub use dialog::{ClusterMembership, HaDialog, MetadataMap, SessionRecord, StaticMembership, LAST_RESPONSE};
pub use errors::{BackendError, CacheError, CacheResult};
pub use message::SipResponse;
pub use store::{
    BackendLocator, BackendStore, MemoryStore, StaticLocator, StoreField, TransactionCoordinator,
};
pub use topology::{LoggingTopologyListener, TopologyEvent, TopologyListener};
