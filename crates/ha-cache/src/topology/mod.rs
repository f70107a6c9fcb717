//! Cluster topology change notifications
//!
//! The backend store delivers membership and data-ownership changes
//! asynchronously. The cache registers one listener during `init()`; the
//! default implementation only logs, and serves as the extension point for
//! eviction or rebalancing reactions.
//!
//! Listener contract: implementations must not block the backend's
//! notification task for unbounded time. Hand anything slow off to a
//! spawned task instead of doing it inline.

use async_trait::async_trait;
use tracing::info;

/// A cluster membership or data-ownership change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyEvent {
    /// A node joined the cluster
    NodeJoined {
        /// Endpoint of the joining node
        node: String,
    },

    /// A node left the cluster, gracefully or by failure detection
    NodeLeft {
        /// Endpoint of the departed node
        node: String,
    },

    /// The full membership view changed
    ViewChanged {
        /// Current set of member endpoints
        members: Vec<String>,
    },

    /// Ownership of a subtree moved to another node
    OwnershipChanged {
        /// Subtree whose ownership moved
        path: String,
        /// Endpoint of the new owner
        new_owner: String,
    },
}

/// Receiver for topology change notifications
#[async_trait]
pub trait TopologyListener: Send + Sync {
    /// Called by the backend for every topology change
    async fn on_topology_event(&self, event: TopologyEvent);
}

/// Default listener: logs every event and takes no further action
#[derive(Debug, Default)]
pub struct LoggingTopologyListener;

#[async_trait]
impl TopologyListener for LoggingTopologyListener {
    async fn on_topology_event(&self, event: TopologyEvent) {
        match event {
            TopologyEvent::NodeJoined { node } => {
                info!(node = %node, "cluster node joined");
            }
            TopologyEvent::NodeLeft { node } => {
                info!(node = %node, "cluster node left");
            }
            TopologyEvent::ViewChanged { members } => {
                info!(members = ?members, "cluster view changed");
            }
            TopologyEvent::OwnershipChanged { path, new_owner } => {
                info!(path = %path, new_owner = %new_owner, "data ownership changed");
            }
        }
    }
}
