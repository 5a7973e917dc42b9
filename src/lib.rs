//! Copy-on-click buttons for web pages
//!
//! Elements matching a configured selector copy the value of one of their
//! attributes to the clipboard when clicked. The default binding is the admin
//! site's `#copy-link` buttons, which carry an invitation's RSVP link in
//! `data-clipboard-text`.

pub mod binder;
pub mod clipboard;
pub mod config;
pub mod dom;
pub mod error;
pub mod feedback;
pub mod ready;

pub use binder::{bind_copy_buttons, BindSummary, Binder, CopyOutcome, CopyPayload};
pub use clipboard::{ClipboardWriter, WebClipboard};
pub use config::{BinderConfig, CopyBinding, FeedbackConfig};
pub use error::{BindError, CopyError};
pub use ready::install;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    // Initialize panic hook for better error messages in browser console
    console_error_panic_hook::set_once();

    let document = match dom::WebDocument::current() {
        Ok(document) => document,
        Err(e) => {
            wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
            log::error!("copy-binder not started: {}", e);
            return;
        }
    };

    let (config, config_error) = match document.load_config() {
        Ok(config) => (config, None),
        Err(e) => (BinderConfig::default(), Some(e)),
    };
    // validate() has already checked the level
    let level = config.level().unwrap_or(log::Level::Info);
    wasm_logger::init(wasm_logger::Config::new(level));

    if let Some(e) = config_error {
        log::error!("Ignoring copy-binder config: {}", e);
    }

    if let Err(e) = install(document, config) {
        log::error!("Failed to install copy buttons: {}", e);
    }
}
