//! Page lifecycle: bind once the document has been parsed

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::binder::{Binder, BindSummary, ButtonSource};
use crate::clipboard::{ClipboardWriter, WebClipboard};
use crate::config::BinderConfig;
use crate::dom::WebDocument;
use crate::error::{js_error_message, BindError};

/// Lets a binding pass run at most once
#[derive(Debug, Default)]
pub struct BindOnce {
    done: Cell<bool>,
}

impl BindOnce {
    pub const fn new() -> Self {
        Self { done: Cell::new(false) }
    }

    /// Run `f` unless an earlier call already did; `None` when skipped
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        if self.done.replace(true) {
            log::debug!("Copy buttons already bound, skipping");
            return None;
        }
        Some(f())
    }
}

thread_local! {
    static PAGE_BINDING: BindOnce = const { BindOnce::new() };
}

/// Bind every configured button on `source`, logging the result
///
/// Bindings that fail are logged and left out; the rest still bind.
pub fn bind_page<S, C>(source: &S, clipboard: Rc<C>, config: &BinderConfig) -> Vec<BindSummary>
where
    S: ButtonSource,
    C: ClipboardWriter + ?Sized + 'static,
{
    let binder = Binder::new(clipboard, config.feedback.clone());
    let summaries: Vec<BindSummary> = binder
        .bind_all(source, &config.bindings)
        .into_iter()
        .filter_map(|result| match result {
            Ok(summary) => Some(summary),
            Err(e) => {
                log::error!("Failed to bind copy buttons: {}", e);
                None
            }
        })
        .collect();
    let total: usize = summaries.iter().map(|s| s.bound).sum();
    log::info!("Bound {} copy button(s)", total);
    summaries
}

/// Run `f` once the DOM is parsed
///
/// Scripts loaded with `defer` or after the body may start after
/// `DOMContentLoaded` has already fired, so check `readyState` first. An
/// unreadable state is treated as still loading.
pub fn on_document_ready(document: &web_sys::Document, f: impl FnOnce() + 'static) -> Result<(), BindError> {
    let state = js_sys::Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|v| v.as_string());

    if !is_still_loading(state.as_deref()) {
        f();
        return Ok(());
    }

    let callback = Closure::once_into_js(f);
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(|e| BindError::Listener(js_error_message(&e)))
}

fn is_still_loading(ready_state: Option<&str>) -> bool {
    !matches!(ready_state, Some("interactive") | Some("complete"))
}

/// Bind the page's copy buttons when the document is ready
///
/// Safe to call repeatedly: the page is bound once per load.
pub fn install(document: WebDocument, config: BinderConfig) -> Result<(), BindError> {
    let target = document.clone();
    on_document_ready(document.document(), move || {
        PAGE_BINDING.with(|once| {
            once.run(|| bind_page(&target, Rc::new(WebClipboard), &config));
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::tests::{FakeButton, FakeClipboard, FakePage};
    use crate::config::CopyBinding;

    #[test]
    fn test_bind_once_runs_first_call_only() {
        let once = BindOnce::new();
        let mut runs = 0;
        assert_eq!(once.run(|| { runs += 1; "bound" }), Some("bound"));
        assert_eq!(once.run(|| { runs += 1; "bound" }), None);
        assert_eq!(once.run(|| { runs += 1; "bound" }), None);
        assert_eq!(runs, 1);
    }

    #[tokio::test]
    async fn test_repeated_ready_events_bind_once() {
        let clipboard = Rc::new(FakeClipboard::default());
        let button = FakeButton::new("copy-link").with_attr("data-clipboard-text", "ABC123");
        let page = FakePage { buttons: vec![button.clone()] };
        let config = BinderConfig {
            bindings: vec![CopyBinding::new(".copy-link", "data-clipboard-text")],
            ..Default::default()
        };

        let once = BindOnce::new();
        for _ in 0..3 {
            once.run(|| bind_page(&page, Rc::clone(&clipboard), &config));
        }
        assert_eq!(button.listener_count(), 1);

        button.click().await;
        assert_eq!(*clipboard.writes.borrow(), vec!["ABC123"]);
    }

    #[tokio::test]
    async fn test_bad_binding_does_not_block_the_others() {
        let clipboard = Rc::new(FakeClipboard::default());
        let code = FakeButton::new("copy-code").with_attr("data-code", "ABC123");
        let page = FakePage { buttons: vec![code.clone()] };
        let config = BinderConfig {
            bindings: vec![
                CopyBinding::new("#bad[", "data-clipboard-text"),
                CopyBinding::new(".copy-code", "data-code"),
            ],
            ..Default::default()
        };
        // Selector syntax is only checked by the document
        assert!(config.validate().is_ok());

        let summaries = bind_page(&page, Rc::clone(&clipboard), &config);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].selector, ".copy-code");
        assert_eq!(code.listener_count(), 1);

        code.click().await;
        assert_eq!(*clipboard.writes.borrow(), vec!["ABC123"]);
    }

    #[test]
    fn test_unknown_ready_state_waits_for_load() {
        assert!(is_still_loading(None));
        assert!(is_still_loading(Some("loading")));
        assert!(!is_still_loading(Some("interactive")));
        assert!(!is_still_loading(Some("complete")));
    }
}
