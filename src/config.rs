//! Binder configuration
//!
//! Pages may embed a JSON document in
//! `<script type="application/json" id="copy-binder-config">` to choose which
//! elements get copy-on-click behavior and how outcomes are shown. Anything
//! missing falls back to the defaults below.

use std::collections::HashSet;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::BindError;

/// Selector of the admin "Copy link" buttons
pub const DEFAULT_SELECTOR: &str = "#copy-link";

/// Attribute holding the text those buttons copy
pub const DEFAULT_ATTRIBUTE: &str = "data-clipboard-text";

/// Attribute set to `copied` / `failed` after a click
pub const DEFAULT_STATUS_ATTRIBUTE: &str = "data-copy-status";

/// Id of the optional JSON config element
pub const CONFIG_ELEMENT_ID: &str = "copy-binder-config";

pub const DEFAULT_RESET_AFTER_MS: u32 = 2000;

/// One `(selector, attribute)` pair to bind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CopyBinding {
    pub selector: String,
    pub attribute: String,
}

impl CopyBinding {
    pub fn new(selector: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attribute: attribute.into(),
        }
    }
}

impl Default for CopyBinding {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTOR, DEFAULT_ATTRIBUTE)
    }
}

/// How a click's outcome is shown on the element
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Attribute receiving `copied` / `failed`; `None` leaves the element untouched
    pub status_attribute: Option<String>,
    /// Text shown on the element after a successful copy
    pub copied_label: Option<String>,
    /// Text shown on the element after a failed copy
    pub failed_label: Option<String>,
    /// Delay before a temporary label is reverted
    pub reset_after_ms: u32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            status_attribute: Some(DEFAULT_STATUS_ATTRIBUTE.to_string()),
            copied_label: None,
            failed_label: None,
            reset_after_ms: DEFAULT_RESET_AFTER_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BinderConfig {
    #[serde(default = "default_bindings")]
    pub bindings: Vec<CopyBinding>,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    /// Console log level (`error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bindings() -> Vec<CopyBinding> {
    vec![CopyBinding::default()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            bindings: default_bindings(),
            feedback: FeedbackConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl BinderConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self, BindError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BindError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that would bind nothing useful or bind an element twice
    pub fn validate(&self) -> Result<(), BindError> {
        let mut seen = HashSet::new();
        for binding in &self.bindings {
            if binding.selector.trim().is_empty() {
                return Err(BindError::Config("binding selector is empty".to_string()));
            }
            if !is_attribute_name(&binding.attribute) {
                return Err(BindError::Config(format!(
                    "`{}` is not a valid attribute name",
                    binding.attribute
                )));
            }
            if !seen.insert((binding.selector.trim(), binding.attribute.as_str())) {
                return Err(BindError::Config(format!(
                    "duplicate binding for `{}` / `{}`",
                    binding.selector, binding.attribute
                )));
            }
        }

        if let Some(attr) = &self.feedback.status_attribute {
            if !is_attribute_name(attr) {
                return Err(BindError::Config(format!(
                    "`{}` is not a valid status attribute name",
                    attr
                )));
            }
        }

        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<log::Level, BindError> {
        log::Level::from_str(&self.log_level)
            .map_err(|_| BindError::Config(format!("unknown log level `{}`", self.log_level)))
    }
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '>' | '/' | '='))
}
