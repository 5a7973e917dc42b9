//! Clipboard utilities for copying text
//!
//! Provides a cross-platform way to copy text to the clipboard using
//! the Web Clipboard API, behind a small trait so the binder can be driven
//! by other writers.

use async_trait::async_trait;

use crate::error::{js_error_message, CopyError};

/// Anything that can replace the system clipboard contents with a string
#[async_trait(?Send)]
pub trait ClipboardWriter {
    async fn write_text(&self, text: &str) -> Result<(), CopyError>;
}

/// `navigator.clipboard` of the current window
#[derive(Debug, Clone, Copy, Default)]
pub struct WebClipboard;

#[async_trait(?Send)]
impl ClipboardWriter for WebClipboard {
    async fn write_text(&self, text: &str) -> Result<(), CopyError> {
        copy_to_clipboard(text).await
    }
}

/// Copy text to the system clipboard
///
/// Uses the Web Clipboard API to copy the provided text.
///
/// # Returns
/// * `Ok(())` if the text was successfully copied
/// * `Err(CopyError)` if there is no window or the browser rejected the write
pub async fn copy_to_clipboard(text: &str) -> Result<(), CopyError> {
    let window = web_sys::window().ok_or(CopyError::NoWindow)?;
    let navigator = window.navigator();
    let clipboard = navigator.clipboard();
    wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(|e| CopyError::Rejected(js_error_message(&e)))
}
