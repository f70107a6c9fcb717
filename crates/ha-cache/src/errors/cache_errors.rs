//! Dialog cache error types
//!
//! Errors surfaced to the protocol stack by `get_dialog`/`put_dialog`/
//! `remove_dialog`. A dialog that is simply absent is *not* an error; those
//! operations return `Ok(None)` instead. Initialization failures are never
//! surfaced at all: the cache falls back to local-only mode and keeps going.
//!
//! Every error carries the dialog id it relates to so the caller can decide
//! per-dialog whether to retry, fall back to local state, or tear the call
//! down. The cache itself performs no retries.

use thiserror::Error;

use super::store_errors::BackendError;

/// Result type for dialog cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Error surfaced by the dialog cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backend store call failed or timed out
    #[error("cache operation failed for dialog {dialog_id}: {source}")]
    Unavailable {
        /// Dialog the failed operation was addressing
        dialog_id: String,
        /// Backend failure that caused this
        #[source]
        source: BackendError,
    },

    /// Replicated state was fetched but could not be turned back into a dialog
    #[error("could not rebuild dialog {dialog_id} from replicated state: {message}")]
    Deserialization {
        /// Dialog whose stored state is unusable
        dialog_id: String,
        /// What failed to decode or parse
        message: String,
    },
}

impl CacheError {
    /// Backend failure while operating on the given dialog
    pub fn unavailable(dialog_id: impl Into<String>, source: BackendError) -> Self {
        Self::Unavailable {
            dialog_id: dialog_id.into(),
            source,
        }
    }

    /// Stored state for the given dialog could not be decoded
    pub fn deserialization(dialog_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Deserialization {
            dialog_id: dialog_id.into(),
            message: message.into(),
        }
    }

    /// Dialog id this error relates to
    pub fn dialog_id(&self) -> &str {
        match self {
            Self::Unavailable { dialog_id, .. } => dialog_id,
            Self::Deserialization { dialog_id, .. } => dialog_id,
        }
    }
}
