//! Navigator configuration: bridge identity, candidate sequences, and session policies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bridge::candidates::CandidateSequences;
use crate::navigation::JumpPolicy;
use crate::storage::prefs::PrefsStore;

/// localStorage key holding a JSON [`NavigatorConfig`] override.
pub const NAVIGATOR_CONFIG_KEY: &str = "bridge-navigator.config.v1";
/// Component prefix attached to every console line.
pub const DEFAULT_LOG_PREFIX: &str = "[Navigator]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
/// Whether later bridge failures clear the connected flag.
pub enum ConnectionPolicy {
    /// Once connected, stay connected for the session.
    #[default]
    Sticky,
    /// Clear the connected flag after `failures` consecutive failed bridge operations.
    DemoteAfter {
        /// Consecutive failures tolerated before demotion.
        failures: u32,
    },
}

impl ConnectionPolicy {
    /// Returns `true` when `consecutive_failures` should clear the connected flag.
    pub fn should_demote(self, consecutive_failures: u32) -> bool {
        match self {
            Self::Sticky => false,
            Self::DemoteAfter { failures } => consecutive_failures >= failures.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Navigator configuration; every field falls back to its default when omitted.
pub struct NavigatorConfig {
    /// Name of the bridge object on the page's global scope.
    pub global_name: String,
    /// Document event announcing that the bridge is ready.
    pub ready_event: String,
    /// Milliseconds to wait for the bridge before treating it as not installed.
    pub detection_timeout_ms: u32,
    /// Capabilities requested in the handshake, in order.
    pub capabilities: Vec<String>,
    /// Candidate sequences per operation.
    pub candidates: CandidateSequences,
    /// Handling of breadcrumb jumps to unrecorded paths.
    pub jump_policy: JumpPolicy,
    /// Handling of the connected flag after later failures.
    pub connection_policy: ConnectionPolicy,
    /// Prefix tagging every console line.
    pub log_prefix: String,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            global_name: "Akitaki".to_string(),
            ready_event: "akitaki-bridge-ready".to_string(),
            detection_timeout_ms: 2000,
            capabilities: vec!["folderAccess".to_string(), "processFile".to_string()],
            candidates: CandidateSequences::default(),
            jump_policy: JumpPolicy::default(),
            connection_policy: ConnectionPolicy::default(),
            log_prefix: DEFAULT_LOG_PREFIX.to_string(),
        }
    }
}

impl NavigatorConfig {
    /// Parses a JSON override; omitted fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Configuration loading failures.
pub enum ConfigError {
    /// The preference store could not be read.
    #[error("config store unavailable: {0}")]
    Store(String),
    /// The stored JSON was not a valid configuration.
    #[error("invalid navigator config: {0}")]
    Parse(String),
}

/// Loads the navigator configuration from `store`, defaulting when no override is saved.
///
/// # Errors
///
/// Returns an error when the store fails or the saved override does not parse.
pub fn load_navigator_config<S: PrefsStore + ?Sized>(store: &S) -> Result<NavigatorConfig, ConfigError> {
    match store.load_pref(NAVIGATOR_CONFIG_KEY).map_err(ConfigError::Store)? {
        Some(raw) => NavigatorConfig::from_json(&raw),
        None => Ok(NavigatorConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::bridge::candidates::Candidate;
    use crate::storage::prefs::{MemoryPrefsStore, NoopPrefsStore};

    #[test]
    fn missing_override_yields_defaults() {
        let config = load_navigator_config(&NoopPrefsStore).expect("config");
        assert_eq!(config, NavigatorConfig::default());
        assert_eq!(config.detection_timeout_ms, 2000);
        assert_eq!(config.capabilities, ["folderAccess", "processFile"]);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let store = MemoryPrefsStore::default().with_pref(
            NAVIGATOR_CONFIG_KEY,
            r#"{
                "jump_policy": "reject",
                "connection_policy": {"mode": "demote-after", "failures": 2},
                "candidates": {"browse": [{"kind": "dispatch", "name": "listFolder"}]}
            }"#,
        );
        let config = load_navigator_config(&store).expect("config");

        assert_eq!(config.jump_policy, JumpPolicy::Reject);
        assert_eq!(
            config.connection_policy,
            ConnectionPolicy::DemoteAfter { failures: 2 }
        );
        assert_eq!(config.candidates.browse, [Candidate::dispatch("listFolder")]);
        assert_eq!(
            config.candidates.read,
            CandidateSequences::default().read
        );
        assert_eq!(config.global_name, "Akitaki");
    }

    #[test]
    fn malformed_override_is_a_parse_error() {
        let store = MemoryPrefsStore::default().with_pref(NAVIGATOR_CONFIG_KEY, "{not json");
        assert!(matches!(
            load_navigator_config(&store),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn demotion_policy_thresholds() {
        assert!(!ConnectionPolicy::Sticky.should_demote(100));
        let policy = ConnectionPolicy::DemoteAfter { failures: 3 };
        assert!(!policy.should_demote(2));
        assert!(policy.should_demote(3));
        assert!(ConnectionPolicy::DemoteAfter { failures: 0 }.should_demote(1));
    }
}
