//! Structured SIP response
//!
//! Holds exactly what the cache needs to rebuild a dialog: the status line,
//! the headers, and the body. `Display` produces the serialized form stored
//! in the replicated metadata; `FromStr` reconstructs it on the resuming
//! node.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parser::{parse_header_line, parse_status_line};

/// A SIP response in its structured form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipResponse {
    /// SIP protocol version, `(major, minor)`; always `(2, 0)` in practice
    version: (u8, u8),
    /// Status code, 100-699
    status_code: u16,
    /// Reason phrase from the status line
    reason: String,
    /// Headers in original order; names keep their original casing
    headers: Vec<(String, String)>,
    /// Message body, empty for most signaling responses
    body: String,
}

/// Why a serialized response could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParseError {
    message: String,
}

impl fmt::Display for ResponseParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid SIP response: {}", self.message)
    }
}

impl std::error::Error for ResponseParseError {}

impl SipResponse {
    /// Build a response from its parts
    pub fn new(status_code: u16, reason: impl Into<String>) -> Self {
        Self {
            version: (2, 0),
            status_code,
            reason: reason.into(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Append a header, preserving insertion order
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the message body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Status code from the status line
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Reason phrase from the status line
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// True for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// First header with the given name, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Call-ID header value, if present
    pub fn call_id(&self) -> Option<&str> {
        self.header("Call-ID")
    }

    /// Tag parameter of the To header, if present
    pub fn to_tag(&self) -> Option<&str> {
        self.header("To").and_then(extract_tag)
    }

    /// Tag parameter of the From header, if present
    pub fn from_tag(&self) -> Option<&str> {
        self.header("From").and_then(extract_tag)
    }

    /// Message body
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Pull the `tag=` parameter out of a To/From header value
fn extract_tag(value: &str) -> Option<&str> {
    value.split(';').skip(1).find_map(|param| {
        let param = param.trim();
        param
            .strip_prefix("tag=")
            .or_else(|| param.strip_prefix("TAG="))
    })
}

impl fmt::Display for SipResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SIP/{}.{} {} {}\r\n",
            self.version.0, self.version.1, self.status_code, self.reason
        )?;
        for (name, value) in &self.headers {
            write!(f, "{}: {}\r\n", name, value)?;
        }
        write!(f, "\r\n{}", self.body)
    }
}

impl FromStr for SipResponse {
    type Err = ResponseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mut rest, (version, status_code, reason)) =
            parse_status_line(s).map_err(|e| ResponseParseError {
                message: format!("bad status line: {}", e),
            })?;

        let mut headers = Vec::new();
        while !rest.is_empty() {
            let (next, header) = parse_header_line(rest).map_err(|e| ResponseParseError {
                message: format!("bad header line: {}", e),
            })?;
            rest = next;
            match header {
                Some(h) => headers.push(h),
                // Blank line: the remainder is the body
                None => break,
            }
        }

        Ok(Self {
            version,
            status_code,
            reason,
            headers,
            body: rest.to_string(),
        })
    }
}
