//! Local-only mode and lifecycle tests
//!
//! When the cluster store cannot be bound at init, the cache must keep the
//! signaling node functioning unreplicated: every operation succeeds
//! trivially and the backend is never contacted.

use std::sync::Arc;

use serde_json::json;

use sip_ha_cache::{
    CacheConfig, CacheError, ClusteredDialogCache, DialogCache, HaDialog, LifecycleState,
    MemoryStore, StaticLocator, StaticMembership,
};

/// Simulated backend outage during init: cache falls back to local mode
/// and all operations succeed without persisting anything
#[tokio::test]
async fn test_init_failure_falls_back_to_local_mode() {
    let cache = ClusteredDialogCache::new(
        CacheConfig::default(),
        Arc::new(StaticLocator::unavailable()),
        Arc::new(StaticMembership::default()),
    );
    assert!(!cache.in_local_mode());

    cache.init().await;
    assert!(cache.in_local_mode());
    assert_eq!(cache.lifecycle_state(), LifecycleState::Running);

    // start/stop are no-ops but must not fail
    cache.start().await;
    assert!(cache.transaction_coordinator().is_none());

    let mut dialog = HaDialog::new("call-99");
    dialog.set_replicated_field("tag", json!("abc"));
    dialog.set_application_data(Some(json!({"counter": 1})));
    cache.put_dialog(&dialog).await.unwrap();

    // Nothing was ever persisted
    assert!(cache.get_dialog("call-99").await.unwrap().is_none());
    cache.remove_dialog("call-99").await.unwrap();

    cache.stop().await;
    assert_eq!(cache.lifecycle_state(), LifecycleState::Stopped);
    assert!(cache.in_local_mode());
}

/// The direct local-only constructor behaves identically to the fallback
#[tokio::test]
async fn test_local_only_constructor() {
    let cache = ClusteredDialogCache::local_only(CacheConfig::default());
    assert!(cache.in_local_mode());

    cache.put_dialog(&HaDialog::new("call-1")).await.unwrap();
    assert!(cache.get_dialog("call-1").await.unwrap().is_none());
    cache.remove_dialog("call-1").await.unwrap();
}

/// Successful init binds the store, registers the listener, and start
/// captures the transaction coordinator
#[tokio::test]
async fn test_clustered_lifecycle() {
    let store = Arc::new(MemoryStore::new());
    let cache = ClusteredDialogCache::new(
        CacheConfig::default(),
        Arc::new(StaticLocator::new(store)),
        Arc::new(StaticMembership::default()),
    );
    assert_eq!(cache.lifecycle_state(), LifecycleState::Uninitialized);

    cache.init().await;
    assert!(!cache.in_local_mode());
    assert_eq!(cache.lifecycle_state(), LifecycleState::Running);
    assert!(cache.transaction_coordinator().is_none());

    cache.start().await;
    assert!(cache.transaction_coordinator().is_some());

    cache.stop().await;
    assert_eq!(cache.lifecycle_state(), LifecycleState::Stopped);
}

/// A store that dies after init surfaces Unavailable on every operation,
/// carrying the dialog id the caller was working on
#[tokio::test]
async fn test_steady_state_outage_surfaces_unavailable() {
    let store = Arc::new(MemoryStore::new());
    let cache = ClusteredDialogCache::clustered(
        CacheConfig::default(),
        store.clone(),
        Arc::new(StaticMembership::default()),
    );

    let mut dialog = HaDialog::new("call-42");
    dialog.set_replicated_field("tag", json!("abc"));
    cache.put_dialog(&dialog).await.unwrap();

    store.set_unavailable(true);

    let err = cache.get_dialog("call-42").await.unwrap_err();
    assert!(matches!(err, CacheError::Unavailable { .. }));
    assert_eq!(err.dialog_id(), "call-42");

    assert!(cache.put_dialog(&dialog).await.is_err());
    assert!(cache.remove_dialog("call-42").await.is_err());

    // Outage does not flip the mode; that only happens at init
    assert!(!cache.in_local_mode());

    // Recovery: the same handle works again once the store is back
    store.set_unavailable(false);
    assert!(cache.get_dialog("call-42").await.unwrap().is_some());
}

/// Operations before init (clustered path) fail rather than panic
#[tokio::test]
async fn test_operations_before_init_are_unavailable() {
    let cache = ClusteredDialogCache::new(
        CacheConfig::default(),
        Arc::new(StaticLocator::new(Arc::new(MemoryStore::new()))),
        Arc::new(StaticMembership::default()),
    );

    let err = cache.get_dialog("call-42").await.unwrap_err();
    assert!(matches!(err, CacheError::Unavailable { .. }));
}
