//! Backend store adapter layer
//!
//! The dialog cache never talks to a concrete cluster store directly; it
//! goes through the [`BackendStore`] capability interface so the same cache
//! runs against an in-process map in tests and a real distributed store in
//! production. [`BackendLocator`] is the service-lookup seam used once at
//! initialization to bind a store handle.

pub mod backend;
pub mod memory;

// Re-export main types
pub use backend::{BackendLocator, BackendStore, StoreField, TransactionCoordinator};
pub use memory::{MemoryStore, StaticLocator};
