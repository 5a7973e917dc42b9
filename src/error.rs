//! Error types for binding copy buttons and writing to the clipboard

use thiserror::Error;
use wasm_bindgen::JsValue;

/// A clipboard write that did not complete
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    /// No `window` object (e.g. running inside a worker)
    #[error("no browser window available")]
    NoWindow,
    /// The `writeText` promise rejected (permission denied, insecure context, ...)
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// Failure while attaching listeners or loading configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("no document available")]
    NoDocument,
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("failed to register click listener: {0}")]
    Listener(String),
    #[error("invalid binder config: {0}")]
    Config(String),
}

/// Render a thrown/rejected JS value as a message
///
/// DOMException and Error objects are not strings, so fall back to their
/// debug form which includes the message.
pub fn js_error_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
