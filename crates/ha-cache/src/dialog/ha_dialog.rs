//! The replicable dialog object
//!
//! [`HaDialog`] carries exactly the state a dialog must externalize to
//! survive the failure of the node running it: a metadata map of fields
//! the dialog implementation marks for replication (always including the
//! serialized last outgoing response when one exists) and an opaque
//! application payload the cache never interprets.

use std::net::SocketAddr;

use serde_json::Value;

use crate::config::ReplicationStrategy;
use crate::message::SipResponse;

use super::record::{MetadataMap, SessionRecord};

/// Namespace prefix dialog records are stored under
pub const DIALOG_ROOT: &str = "/sip/dialogs/";

/// Metadata key holding the serialized last outgoing response
pub const LAST_RESPONSE: &str = "lastResponse";

/// A dialog's replicable state
#[derive(Debug, Clone)]
pub struct HaDialog {
    /// Globally unique dialog identifier (call-id plus tags, in practice)
    dialog_id: String,
    /// Fields marked for replication
    metadata: MetadataMap,
    /// Opaque payload owned by the layer above the cache
    app_data: Option<Value>,
    /// Last outgoing response, reconstructed on rebuild
    last_response: Option<SipResponse>,
    /// Live cluster endpoints attached when the dialog was rebuilt
    peers: Vec<SocketAddr>,
    /// Strategy the dialog was replicated under
    strategy: ReplicationStrategy,
}

impl HaDialog {
    /// Create a fresh dialog with no replicated state yet
    pub fn new(dialog_id: impl Into<String>) -> Self {
        Self {
            dialog_id: dialog_id.into(),
            metadata: MetadataMap::new(),
            app_data: None,
            last_response: None,
            peers: Vec::new(),
            strategy: ReplicationStrategy::default(),
        }
    }

    /// Rebuild a dialog from fetched state, attaching live cluster peers
    ///
    /// Used by the cache on the resuming node; the metadata map is applied
    /// separately once both parts have been fetched.
    pub(crate) fn rebuilt(
        dialog_id: impl Into<String>,
        last_response: Option<SipResponse>,
        strategy: ReplicationStrategy,
        peers: Vec<SocketAddr>,
    ) -> Self {
        Self {
            dialog_id: dialog_id.into(),
            metadata: MetadataMap::new(),
            app_data: None,
            last_response,
            peers,
            strategy,
        }
    }

    /// Dialog identifier
    pub fn dialog_id(&self) -> &str {
        &self.dialog_id
    }

    /// Record the last outgoing response
    ///
    /// Stores the structured form locally and its serialized text in the
    /// metadata map, so the response travels with the record.
    pub fn set_last_response(&mut self, response: SipResponse) {
        self.metadata
            .insert(LAST_RESPONSE.to_string(), Value::String(response.to_string()));
        self.last_response = Some(response);
    }

    /// Last outgoing response, if any
    pub fn last_response(&self) -> Option<&SipResponse> {
        self.last_response.as_ref()
    }

    /// Mark a field for replication
    pub fn set_replicated_field(&mut self, name: impl Into<String>, value: Value) {
        self.metadata.insert(name.into(), value);
    }

    /// Value of a replicated field
    pub fn replicated_field(&self, name: &str) -> Option<&Value> {
        self.metadata.get(name)
    }

    /// The full metadata map as it will be replicated
    pub fn metadata_to_replicate(&self) -> &MetadataMap {
        &self.metadata
    }

    /// Replace the metadata map wholesale with fetched state
    pub fn apply_replicated_metadata(&mut self, metadata: MetadataMap) {
        self.metadata = metadata;
    }

    /// Attach the opaque application payload
    pub fn set_application_data(&mut self, app_data: Option<Value>) {
        self.app_data = app_data;
    }

    /// Opaque application payload, if any
    pub fn application_data(&self) -> Option<&Value> {
        self.app_data.as_ref()
    }

    /// Cluster endpoints this dialog was attached to at rebuild time
    ///
    /// Empty for dialogs created locally rather than rebuilt from the store.
    pub fn peers(&self) -> &[SocketAddr] {
        &self.peers
    }

    /// Strategy this dialog is replicated under
    pub fn replication_strategy(&self) -> ReplicationStrategy {
        self.strategy
    }

    /// Snapshot of the two persisted parts
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            metadata: self.metadata.clone(),
            app_data: self.app_data.clone(),
        }
    }
}
