//! Copy-on-click binding
//!
//! For every element matching a selector, the value of one attribute is read
//! once and captured by a click listener. Each click starts one independent
//! clipboard write with that value; the outcome is logged and shown on the
//! element instead of being dropped.
//!
//! The DOM is reached through [`ButtonSource`] / [`CopyButton`] so the same
//! binding logic drives the browser (see `dom`) and in-memory pages.

use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::clipboard::ClipboardWriter;
use crate::config::{CopyBinding, FeedbackConfig};
use crate::error::{BindError, CopyError};
use crate::feedback::{log_outcome, FeedbackPlan};

/// Work started by one click
pub type ClickFuture = LocalBoxFuture<'static, ()>;

/// Called once per click; the host decides how the returned future is driven
pub type ClickHandler = Rc<dyn Fn() -> ClickFuture>;

/// A clickable element that can carry copy text
pub trait CopyButton {
    fn attribute(&self, name: &str) -> Option<String>;
    fn on_click(&self, handler: ClickHandler) -> Result<(), BindError>;
    fn show_feedback(&self, plan: &FeedbackPlan);
}

/// Something that can look up elements by selector (a document)
pub trait ButtonSource {
    type Button: CopyButton + Clone + 'static;

    fn query_all(&self, selector: &str) -> Result<Vec<Self::Button>, BindError>;
}

/// Text captured from the copy attribute at bind time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPayload(Option<String>);

impl CopyPayload {
    pub fn new(value: Option<String>) -> Self {
        Self(value)
    }

    /// Text to write; an absent attribute copies the empty string
    pub fn text(&self) -> &str {
        self.0.as_deref().unwrap_or_default()
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }
}

/// Result of one click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    pub payload: CopyPayload,
    pub result: Result<(), CopyError>,
}

/// What one binding pass attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindSummary {
    pub selector: String,
    pub attribute: String,
    /// Elements that received a listener
    pub bound: usize,
    /// Of those, how many lacked the copy attribute
    pub missing_attribute: usize,
    /// Elements whose listener could not be registered
    pub failed: usize,
}

/// Write one payload to the clipboard
pub async fn copy_on_click<C>(clipboard: &C, payload: &CopyPayload) -> CopyOutcome
where
    C: ClipboardWriter + ?Sized,
{
    CopyOutcome {
        payload: payload.clone(),
        result: clipboard.write_text(payload.text()).await,
    }
}

/// Bind one `(selector, attribute)` pair with the default feedback
pub fn bind_copy_buttons<S, C>(
    source: &S,
    clipboard: Rc<C>,
    binding: &CopyBinding,
) -> Result<BindSummary, BindError>
where
    S: ButtonSource,
    C: ClipboardWriter + ?Sized + 'static,
{
    Binder::new(clipboard, FeedbackConfig::default()).bind_copy_buttons(source, binding)
}

/// Attaches copy listeners using one clipboard and one feedback style
pub struct Binder<C: ?Sized> {
    clipboard: Rc<C>,
    feedback: Rc<FeedbackConfig>,
}

impl<C: ?Sized> Clone for Binder<C> {
    fn clone(&self) -> Self {
        Self {
            clipboard: Rc::clone(&self.clipboard),
            feedback: Rc::clone(&self.feedback),
        }
    }
}

impl<C> Binder<C>
where
    C: ClipboardWriter + ?Sized + 'static,
{
    pub fn new(clipboard: Rc<C>, feedback: FeedbackConfig) -> Self {
        Self {
            clipboard,
            feedback: Rc::new(feedback),
        }
    }

    /// Bind every element matching `binding.selector`
    ///
    /// Each element gets exactly one listener, independent of the others.
    pub fn bind_copy_buttons<S>(
        &self,
        source: &S,
        binding: &CopyBinding,
    ) -> Result<BindSummary, BindError>
    where
        S: ButtonSource,
    {
        let buttons = source.query_all(&binding.selector)?;
        let mut summary = BindSummary {
            selector: binding.selector.clone(),
            attribute: binding.attribute.clone(),
            bound: 0,
            missing_attribute: 0,
            failed: 0,
        };

        for button in buttons {
            let payload = CopyPayload::new(button.attribute(&binding.attribute));
            let missing = payload.is_missing();
            match button.on_click(self.click_handler(button.clone(), payload)) {
                Ok(()) => {
                    summary.bound += 1;
                    if missing {
                        summary.missing_attribute += 1;
                    }
                }
                Err(e) => {
                    log::error!("Skipping a `{}` element: {}", summary.selector, e);
                    summary.failed += 1;
                }
            }
        }

        if summary.missing_attribute > 0 {
            log::warn!(
                "{} of {} `{}` elements have no `{}` attribute",
                summary.missing_attribute,
                summary.bound,
                summary.selector,
                summary.attribute
            );
        }
        log::debug!("Bound {} copy button(s) for `{}`", summary.bound, summary.selector);

        Ok(summary)
    }

    /// Run [`Self::bind_copy_buttons`] for each binding in order
    ///
    /// A failing binding does not stop the ones after it; each gets its own
    /// result, in the order given.
    pub fn bind_all<S>(
        &self,
        source: &S,
        bindings: &[CopyBinding],
    ) -> Vec<Result<BindSummary, BindError>>
    where
        S: ButtonSource,
    {
        bindings
            .iter()
            .map(|binding| self.bind_copy_buttons(source, binding))
            .collect()
    }

    fn click_handler<B>(&self, button: B, payload: CopyPayload) -> ClickHandler
    where
        B: CopyButton + Clone + 'static,
    {
        let binder = self.clone();
        Rc::new(move || {
            let binder = binder.clone();
            let button = button.clone();
            let payload = payload.clone();
            async move {
                let outcome = copy_on_click(&*binder.clipboard, &payload).await;
                log_outcome(&outcome);
                button.show_feedback(&binder.feedback.plan(&outcome));
            }
            .boxed_local()
        })
    }
}
