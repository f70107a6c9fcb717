//! The dialog cache contract
//!
//! Called concurrently by many worker tasks, one per in-flight protocol
//! transaction. The cache holds no lock of its own across an operation;
//! per-key atomicity comes from the backend store, and it covers one
//! field write at a time. Concurrent `put_dialog` calls for the same
//! dialog id race at the field level and the last writer per field wins;
//! the cache provides no conflict resolution or versioning above that.

use async_trait::async_trait;

use crate::dialog::HaDialog;
use crate::errors::CacheResult;

/// Store, fetch, and drop replicated dialog state
#[async_trait]
pub trait DialogCache: Send + Sync {
    /// Fetch and rebuild the dialog stored under `dialog_id`
    ///
    /// Returns `Ok(None)` when no record exists; an absent dialog is a
    /// valid outcome, not an error. In local-only mode this never touches
    /// the backend and always returns `Ok(None)` — process-local dialogs
    /// are the caller's own storage, not this cache's.
    ///
    /// # Errors
    /// [`CacheError::Unavailable`](crate::errors::CacheError) if the
    /// backend read fails; [`CacheError::Deserialization`](crate::errors::CacheError)
    /// if the stored last-response text cannot be parsed back into a
    /// message. A half-built dialog is never returned.
    async fn get_dialog(&self, dialog_id: &str) -> CacheResult<Option<HaDialog>>;

    /// Persist the dialog's replicable state, overwriting any prior record
    ///
    /// Metadata is written only when non-empty, application data only when
    /// present. The two writes are independent: a crash between them can
    /// leave one part updated without the other, and callers must tolerate
    /// that until both writes have landed. No-op in local-only mode.
    async fn put_dialog(&self, dialog: &HaDialog) -> CacheResult<()>;

    /// Drop the entire record, both parts, in one backend operation
    ///
    /// Removing an id that was never written is not an error. No-op in
    /// local-only mode.
    async fn remove_dialog(&self, dialog_id: &str) -> CacheResult<()>;

    /// True when the cache is operating without a cluster store
    fn in_local_mode(&self) -> bool;
}
