//! Topology listener registration tests
//!
//! The cache registers its listener with the backend during init; the
//! in-process store's emit hook stands in for the notification task a
//! real cluster store runs.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use sip_ha_cache::{
    CacheConfig, ClusteredDialogCache, DialogCache, MemoryStore, StaticLocator, StaticMembership,
    TopologyEvent, TopologyListener,
};

/// Listener that records every event it receives
#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<TopologyEvent>>,
}

#[async_trait]
impl TopologyListener for RecordingListener {
    async fn on_topology_event(&self, event: TopologyEvent) {
        self.events.lock().push(event);
    }
}

#[tokio::test]
async fn test_listener_registered_at_init_receives_events() {
    let store = Arc::new(MemoryStore::new());
    let listener = Arc::new(RecordingListener::default());

    let cache = ClusteredDialogCache::new(
        CacheConfig::default(),
        Arc::new(StaticLocator::new(store.clone())),
        Arc::new(StaticMembership::default()),
    )
    .with_topology_listener(listener.clone());
    cache.init().await;
    assert!(!cache.in_local_mode());

    store
        .emit(TopologyEvent::NodeJoined {
            node: "10.0.0.3:5060".to_string(),
        })
        .await;
    store
        .emit(TopologyEvent::ViewChanged {
            members: vec!["10.0.0.1:5060".to_string(), "10.0.0.3:5060".to_string()],
        })
        .await;

    let events = listener.events.lock();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        TopologyEvent::NodeJoined {
            node: "10.0.0.3:5060".to_string()
        }
    );
}

#[tokio::test]
async fn test_no_listener_registered_in_local_mode() {
    let listener = Arc::new(RecordingListener::default());
    let cache = ClusteredDialogCache::new(
        CacheConfig::default(),
        Arc::new(StaticLocator::unavailable()),
        Arc::new(StaticMembership::default()),
    )
    .with_topology_listener(listener.clone());
    cache.init().await;

    assert!(cache.in_local_mode());
    assert!(listener.events.lock().is_empty());
}
