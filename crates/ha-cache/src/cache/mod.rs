//! The dialog cache contract and its clustered implementation
//!
//! This is the public surface the protocol stack calls:
//!
//! - [`DialogCache`]: get/put/remove plus the local-mode accessor
//! - [`ClusteredDialogCache`]: composes the record codec, the backend
//!   store adapter, and the mode controller
//! - [`CacheMode`] / [`LifecycleState`]: the `init()`/`start()`/`stop()`
//!   lifecycle and the degraded local-only operating mode
//!
//! The overriding design goal: a signaling node keeps functioning,
//! unreplicated, when the clustering infrastructure is down. Backend
//! lookup failure at `init()` is absorbed into local-only mode, never
//! propagated.

pub mod clustered;
pub mod dialog_cache;
pub mod lifecycle;

// Re-export the main cache types
pub use clustered::ClusteredDialogCache;
pub use dialog_cache::DialogCache;
pub use lifecycle::{CacheMode, LifecycleState};
