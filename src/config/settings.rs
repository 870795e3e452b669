//! Application settings configuration.

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_TIMEOUT_SECS;
use crate::state::{FailurePolicy, Section};

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the backend API.
    pub api_base_url: Option<String>,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Restore the last fetched paid value when an update fails.
    pub rollback_on_failure: bool,
    /// The section shown at startup.
    pub default_section: Section,
    /// Whether to use vim-style keybindings.
    pub vim_mode: bool,
}

impl Settings {
    /// The failure policy for paid toggles.
    pub fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::from_rollback_flag(self.rollback_on_failure)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            rollback_on_failure: false,
            default_section: Section::Activity,
            vim_mode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.api_base_url.is_none());
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.failure_policy(), FailurePolicy::KeepOptimistic);
        assert_eq!(settings.default_section, Section::Activity);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str("rollback_on_failure = true").unwrap();
        assert_eq!(settings.failure_policy(), FailurePolicy::Rollback);
        assert_eq!(settings.request_timeout_secs, 30);
        assert!(settings.vim_mode);
    }
}
