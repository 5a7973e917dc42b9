//! What a clicked element shows after its copy finished

use crate::binder::CopyOutcome;
use crate::config::FeedbackConfig;

pub const STATUS_COPIED: &str = "copied";
pub const STATUS_FAILED: &str = "failed";

/// What happens to the element's `title` tooltip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleFeedback {
    /// Replace it with this message, keeping the element's own title aside
    Show(String),
    /// Put back the element's own title if a message replaced it
    Restore,
}

/// Element changes for one outcome, computed up front so hosts only apply them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackPlan {
    /// `(attribute, value)` to set, if a status attribute is configured
    pub status: Option<(String, &'static str)>,
    /// Temporary text and how long to keep it
    pub label: Option<(String, u32)>,
    pub title: TitleFeedback,
}

impl FeedbackConfig {
    pub fn plan(&self, outcome: &CopyOutcome) -> FeedbackPlan {
        let (value, label) = match &outcome.result {
            Ok(()) => (STATUS_COPIED, self.copied_label.as_ref()),
            Err(_) => (STATUS_FAILED, self.failed_label.as_ref()),
        };

        FeedbackPlan {
            status: self
                .status_attribute
                .as_ref()
                .map(|attr| (attr.clone(), value)),
            label: label.map(|text| (text.clone(), self.reset_after_ms)),
            title: match &outcome.result {
                Ok(()) => TitleFeedback::Restore,
                Err(e) => TitleFeedback::Show(e.to_string()),
            },
        }
    }
}

/// Log a click's outcome to the console
pub fn log_outcome(outcome: &CopyOutcome) {
    match &outcome.result {
        Ok(()) if outcome.payload.is_missing() => {
            log::warn!("Copied empty text: button has no copy attribute");
        }
        Ok(()) => log::info!("Copied to clipboard: {}", outcome.payload.text()),
        Err(e) => log::error!("Failed to copy to clipboard: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::CopyPayload;
    use crate::error::CopyError;

    fn outcome(result: Result<(), CopyError>) -> CopyOutcome {
        CopyOutcome {
            payload: CopyPayload::new(Some("ABC123".to_string())),
            result,
        }
    }

    #[test]
    fn test_default_plan_only_sets_status() {
        let plan = FeedbackConfig::default().plan(&outcome(Ok(())));
        assert_eq!(plan.status, Some(("data-copy-status".to_string(), STATUS_COPIED)));
        assert_eq!(plan.label, None);
        assert_eq!(plan.title, TitleFeedback::Restore);
    }

    #[test]
    fn test_failure_plan_carries_message() {
        let config = FeedbackConfig {
            copied_label: Some("Copied!".to_string()),
            failed_label: Some("Copy failed".to_string()),
            reset_after_ms: 1500,
            ..Default::default()
        };
        let plan = config.plan(&outcome(Err(CopyError::Rejected("NotAllowedError".to_string()))));
        assert_eq!(plan.status, Some(("data-copy-status".to_string(), STATUS_FAILED)));
        assert_eq!(plan.label, Some(("Copy failed".to_string(), 1500)));
        assert_eq!(
            plan.title,
            TitleFeedback::Show("clipboard write rejected: NotAllowedError".to_string())
        );
    }

    #[test]
    fn test_success_after_failure_restores_title() {
        let config = FeedbackConfig::default();
        let failed = config.plan(&outcome(Err(CopyError::Rejected("NotAllowedError".to_string()))));
        let copied = config.plan(&outcome(Ok(())));

        assert!(matches!(failed.title, TitleFeedback::Show(_)));
        assert_eq!(copied.status, Some(("data-copy-status".to_string(), STATUS_COPIED)));
        assert_eq!(copied.title, TitleFeedback::Restore);
    }

    #[test]
    fn test_silent_config() {
        let config = FeedbackConfig {
            status_attribute: None,
            ..Default::default()
        };
        let plan = config.plan(&outcome(Err(CopyError::NoWindow)));
        assert_eq!(plan.status, None);
        assert_eq!(plan.label, None);
    }
}
