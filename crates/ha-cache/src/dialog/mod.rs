//! Replicable dialog state
//!
//! This module contains the session-record side of the cache:
//!
//! - [`HaDialog`]: a dialog's replicable state, split into structured
//!   metadata and an opaque application payload
//! - [`record`]: the codec between those two parts and the bytes handed to
//!   the backend store
//! - [`ClusterMembership`]: supplies live node endpoints when a dialog is
//!   rebuilt on a resuming node
//!
//! Once a dialog has been written through the cache, everything needed to
//! rebuild it lives in the record; no dialog state may exist only in the
//! memory of the node that wrote it.

pub mod ha_dialog;
pub mod membership;
pub mod record;

// Re-export main types
pub use ha_dialog::{HaDialog, DIALOG_ROOT, LAST_RESPONSE};
pub use membership::{ClusterMembership, StaticMembership};
pub use record::{MetadataMap, SessionRecord};
