//! Browser DOM host for the binder
//!
//! Listener closures are stored in a thread_local for the lifetime of the
//! page instead of being leaked with `Closure::forget()`.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::binder::{ButtonSource, ClickHandler, CopyButton};
use crate::config::{BinderConfig, CONFIG_ELEMENT_ID};
use crate::error::{js_error_message, BindError};
use crate::feedback::{FeedbackPlan, TitleFeedback};

/// Holds an element's own text while a feedback label is shown
const ORIGINAL_LABEL_ATTRIBUTE: &str = "data-copy-label";

/// Holds an element's own title while an error message is shown
const ORIGINAL_TITLE_ATTRIBUTE: &str = "data-copy-title";

/// Marks an element that had no title before an error message was shown
const NO_TITLE_ATTRIBUTE: &str = "data-copy-untitled";

thread_local! {
    static CLICK_LISTENERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = RefCell::new(Vec::new());
}

/// The current page's document
#[derive(Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn current() -> Result<Self, BindError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or(BindError::NoDocument)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Read the JSON config element, if the page has one
    ///
    /// A missing element yields the defaults; a broken one is an error the
    /// caller can log before falling back.
    pub fn load_config(&self) -> Result<BinderConfig, BindError> {
        match self
            .document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => BinderConfig::from_json(&json),
            _ => Ok(BinderConfig::default()),
        }
    }
}

impl ButtonSource for WebDocument {
    type Button = WebButton;

    fn query_all(&self, selector: &str) -> Result<Vec<WebButton>, BindError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|e| BindError::InvalidSelector {
                selector: selector.to_string(),
                reason: js_error_message(&e),
            })?;

        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(WebButton::new)
            .collect())
    }
}

/// A matched element (Element is a JS handle, cloning is cheap)
#[derive(Clone)]
pub struct WebButton {
    element: Element,
}

impl WebButton {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    fn show_label(&self, text: &str, reset_after_ms: u32) {
        // Overlapping clicks must restore the text from before the first one
        let original = match self.element.get_attribute(ORIGINAL_LABEL_ATTRIBUTE) {
            Some(original) => original,
            None => {
                let original = self.element.text_content().unwrap_or_default();
                let _ = self.element.set_attribute(ORIGINAL_LABEL_ATTRIBUTE, &original);
                original
            }
        };
        self.element.set_text_content(Some(text));

        let element = self.element.clone();
        let shown = text.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(reset_after_ms).await;
            if element.text_content().as_deref() == Some(shown.as_str()) {
                element.set_text_content(Some(&original));
                let _ = element.remove_attribute(ORIGINAL_LABEL_ATTRIBUTE);
            }
        });
    }

    fn show_title(&self, message: &str) {
        // Keep the element's own title once, across repeated failures
        let saved = self.element.has_attribute(ORIGINAL_TITLE_ATTRIBUTE)
            || self.element.has_attribute(NO_TITLE_ATTRIBUTE);
        if !saved {
            let _ = match self.element.get_attribute("title") {
                Some(original) => self.element.set_attribute(ORIGINAL_TITLE_ATTRIBUTE, &original),
                None => self.element.set_attribute(NO_TITLE_ATTRIBUTE, ""),
            };
        }
        if let Err(e) = self.element.set_attribute("title", message) {
            log::error!("Failed to set title: {:?}", e);
        }
    }

    fn restore_title(&self) {
        let restored = if let Some(original) = self.element.get_attribute(ORIGINAL_TITLE_ATTRIBUTE) {
            self.element.set_attribute("title", &original)
        } else if self.element.has_attribute(NO_TITLE_ATTRIBUTE) {
            self.element.remove_attribute("title")
        } else {
            // No error message was ever shown
            return;
        };
        if let Err(e) = restored {
            log::error!("Failed to restore title: {:?}", e);
        }
        let _ = self.element.remove_attribute(ORIGINAL_TITLE_ATTRIBUTE);
        let _ = self.element.remove_attribute(NO_TITLE_ATTRIBUTE);
    }
}

impl CopyButton for WebButton {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn on_click(&self, handler: ClickHandler) -> Result<(), BindError> {
        let listener = Closure::wrap(Box::new(move |_: web_sys::Event| {
            wasm_bindgen_futures::spawn_local(handler());
        }) as Box<dyn FnMut(web_sys::Event)>);

        self.element
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(|e| BindError::Listener(js_error_message(&e)))?;

        CLICK_LISTENERS.with(|listeners| listeners.borrow_mut().push(listener));
        Ok(())
    }

    fn show_feedback(&self, plan: &FeedbackPlan) {
        if let Some((attr, value)) = &plan.status {
            if let Err(e) = self.element.set_attribute(attr, value) {
                log::error!("Failed to set {}: {:?}", attr, e);
            }
        }

        match &plan.title {
            TitleFeedback::Show(message) => self.show_title(message),
            TitleFeedback::Restore => self.restore_title(),
        }

        if let Some((text, reset_after_ms)) = &plan.label {
            self.show_label(text, *reset_after_ms);
        }
    }
}
