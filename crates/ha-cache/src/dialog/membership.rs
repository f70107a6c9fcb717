//! Cluster membership seam
//!
//! Rebuilding a dialog on a resuming node requires attaching it to a live
//! processing context, which needs the current set of active node
//! endpoints. Production wires in whatever membership view the cluster
//! runtime exposes; tests and single-node deployments use
//! [`StaticMembership`].

use std::net::SocketAddr;

/// Provides the set of currently active cluster node endpoints
pub trait ClusterMembership: Send + Sync {
    /// Endpoints of the nodes currently in the cluster view
    fn members(&self) -> Vec<SocketAddr>;
}

/// Fixed membership view
#[derive(Debug, Default)]
pub struct StaticMembership {
    members: Vec<SocketAddr>,
}

impl StaticMembership {
    /// Membership view with a fixed set of endpoints
    pub fn new(members: Vec<SocketAddr>) -> Self {
        Self { members }
    }
}

impl ClusterMembership for StaticMembership {
    fn members(&self) -> Vec<SocketAddr> {
        self.members.clone()
    }
}
