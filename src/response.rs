//! The module response object and its JSON rendering.
//!
//! Ansible consumes exactly one JSON line on standard output. Everything the
//! module has to say, success payloads and failures alike, travels through
//! this one object.

use serde::{Deserialize, Serialize};

/// Rendered when the response itself cannot be serialized. Field order and
/// names match [`Response`] so the consumer sees the same schema either way.
const FALLBACK_RESPONSE: &str =
    r#"{"msg":"Internal error: invalid response object","data":"","changed":false,"failed":true}"#;

/// Response object printed to stdout as a single JSON line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    pub msg: String,
    pub data: String,
    pub changed: bool,
    pub failed: bool,
}

impl Response {
    /// Successful fetch. `data` carries the secret payload as text; invalid
    /// UTF-8 sequences are replaced rather than failing the whole run.
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            msg: "Success".to_string(),
            data: String::from_utf8_lossy(&payload).into_owned(),
            changed: false,
            failed: false,
        }
    }

    /// Terminal failure with a diagnostic message. `data` stays empty.
    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            data: String::new(),
            changed: false,
            failed: true,
        }
    }

    /// Failure reported when a termination signal won the race against the
    /// in-flight fetch.
    pub fn cancelled(signal_name: &str) -> Self {
        Self::failure(format!("received signal {signal_name}, cancelled"))
    }

    /// Serialize to the single-line JSON wire form.
    pub fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| FALLBACK_RESPONSE.to_string())
    }
}
