use crate::config::{Config, WizardMetadata};

use super::OnboardingMode;

/// Stamp the document with the flow that produced it.
///
/// Last write wins; the stamp is audit metadata and future runs use it only
/// for presentation, never for resolution.
pub fn stamp_wizard_metadata(config: Config, command: &str, mode: OnboardingMode) -> Config {
    let mut next = config;
    next.wizard = Some(WizardMetadata {
        command: command.to_string(),
        mode: mode.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    });
    next
}
