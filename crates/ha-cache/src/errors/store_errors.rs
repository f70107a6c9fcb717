//! Backend store error types
//!
//! Every concrete backend store has its own native error taxonomy. The
//! adapter layer collapses all of it into [`BackendError`] so the dialog
//! cache never has to know which store it is sitting on.

use thiserror::Error;

/// Result type for backend store operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error surfaced by a backend store adapter
///
/// Concrete stores map their native failures onto these variants; the
/// dialog cache treats them all as "the backend call failed".
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// Service lookup could not bind a handle to the cluster store
    #[error("could not bind cluster store service '{service}': {message}")]
    LookupFailed {
        /// Lookup key the locator was asked to resolve
        service: String,
        /// Underlying lookup failure
        message: String,
    },

    /// The store was bound once but is currently unreachable
    #[error("cluster store unreachable: {message}")]
    Unreachable {
        /// Underlying transport/connectivity failure
        message: String,
    },

    /// The store rejected or failed an individual get/put/remove call
    #[error("cluster store operation failed: {message}")]
    OperationFailed {
        /// Underlying store failure
        message: String,
    },
}

impl BackendError {
    /// Lookup failure for the given service key
    pub fn lookup_failed(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LookupFailed {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Connectivity failure
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Per-call operation failure
    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed {
            message: message.into(),
        }
    }
}
