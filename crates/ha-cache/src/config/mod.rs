//! Configuration for the replicated dialog cache
//!
//! A [`CacheConfig`] is injected at construction time; there is no ambient
//! global configuration. Defaults match a single-cluster deployment with
//! one dialog namespace.

use crate::dialog::DIALOG_ROOT;

/// Which dialogs the surrounding stack replicates through this cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplicationStrategy {
    /// Replicate dialogs once confirmed (2xx established); the common choice
    #[default]
    ConfirmedDialog,
    /// Replicate early dialogs too, trading write volume for failover of
    /// calls still being set up
    EarlyDialog,
}

/// Configuration for a [`ClusteredDialogCache`](crate::cache::ClusteredDialogCache)
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Namespace prefix every dialog node path is derived under
    pub dialog_root: String,
    /// Service key the backend store is looked up by at `init()`
    pub backend_service: String,
    /// Replication strategy carried on rebuilt dialogs
    pub replication_strategy: ReplicationStrategy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dialog_root: DIALOG_ROOT.to_string(),
            backend_service: "cluster/sip-dialog-cache".to_string(),
            replication_strategy: ReplicationStrategy::default(),
        }
    }
}

impl CacheConfig {
    /// Override the dialog namespace prefix
    pub fn with_dialog_root(mut self, dialog_root: impl Into<String>) -> Self {
        self.dialog_root = dialog_root.into();
        self
    }

    /// Override the backend service lookup key
    pub fn with_backend_service(mut self, backend_service: impl Into<String>) -> Self {
        self.backend_service = backend_service.into();
        self
    }

    /// Override the replication strategy
    pub fn with_replication_strategy(mut self, strategy: ReplicationStrategy) -> Self {
        self.replication_strategy = strategy;
        self
    }

    /// Node path a dialog's record lives under
    ///
    /// Derivation is deterministic: every node in the cluster computes the
    /// same path for the same dialog id.
    pub fn dialog_path(&self, dialog_id: &str) -> String {
        format!("{}{}", self.dialog_root, dialog_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialog_path() {
        let config = CacheConfig::default();
        assert_eq!(config.dialog_path("call-42"), "/sip/dialogs/call-42");
    }

    #[test]
    fn test_custom_dialog_root() {
        let config = CacheConfig::default().with_dialog_root("/ha/d/");
        assert_eq!(config.dialog_path("abc"), "/ha/d/abc");
    }
}
