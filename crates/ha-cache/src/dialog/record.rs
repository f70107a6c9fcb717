//! Codec between replicable dialog state and stored bytes
//!
//! Each persisted dialog is two independently stored parts: the metadata
//! map and the opaque application payload. Both are serialized as JSON.
//! Decoding the metadata is the authoritative existence check for a
//! record; application data without metadata is unreachable garbage.

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::Value;

/// Replicated metadata: field name → value
pub type MetadataMap = HashMap<String, Value>;

/// The persisted form of one dialog
///
/// Useful when a caller wants to inspect what was (or would be) stored
/// without going through a full dialog rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    /// Structured, replicable fields, including the serialized last response
    pub metadata: MetadataMap,
    /// Opaque payload owned by the layer above the cache
    pub app_data: Option<Value>,
}

/// Serialize the metadata map for storage
pub fn encode_metadata(metadata: &MetadataMap) -> Result<Bytes, serde_json::Error> {
    serde_json::to_vec(metadata).map(Bytes::from)
}

/// Decode a stored metadata map
pub fn decode_metadata(raw: &[u8]) -> Result<MetadataMap, serde_json::Error> {
    serde_json::from_slice(raw)
}

/// Serialize the application payload for storage
pub fn encode_app_data(app_data: &Value) -> Result<Bytes, serde_json::Error> {
    serde_json::to_vec(app_data).map(Bytes::from)
}

/// Decode a stored application payload
pub fn decode_app_data(raw: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_codec_round_trip() {
        let mut metadata = MetadataMap::new();
        metadata.insert("tag".to_string(), json!("abc"));
        metadata.insert("localCSeq".to_string(), json!(314159));

        let decoded = decode_metadata(&encode_metadata(&metadata).unwrap()).unwrap();
        assert_eq!(decoded, metadata);
    }

    #[test]
    fn test_app_data_codec_round_trip() {
        let app_data = json!({"counter": 1});
        let decoded = decode_app_data(&encode_app_data(&app_data).unwrap()).unwrap();
        assert_eq!(decoded, app_data);
    }

    #[test]
    fn test_decode_rejects_non_map_metadata() {
        assert!(decode_metadata(b"[1, 2, 3]").is_err());
        assert!(decode_metadata(b"not json at all").is_err());
    }
}
