//! Minimal SIP response model and reconstruction parser
//!
//! A replicated dialog carries its last outgoing response in serialized
//! textual form. When a dialog is rebuilt on another node, that text must be
//! parsed back into a structured message before the dialog can be reattached
//! to a live processing context. This module provides:
//!
//! - [`SipResponse`]: the structured form (status line, headers, body) with a
//!   round-trippable `Display`/`FromStr` pair
//! - [`parser`]: the nom-based status-line and header parsers
//!
//! Parse failure here is a deserialization condition, never a backend store
//! error; the two are kept distinct in the cache error contract.

pub mod parser;
pub mod response;

// Re-export main types
pub use response::SipResponse;
