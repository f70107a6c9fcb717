//! Error types for sip-ha-cache
//!
//! This module defines all error types used throughout the crate: the
//! caller-facing cache errors and the backend store errors they wrap.

pub mod cache_errors;
pub mod store_errors;

// Re-export main error types
pub use cache_errors::{CacheError, CacheResult};
pub use store_errors::{BackendError, BackendResult};
