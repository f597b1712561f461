//! Client configuration
//!
//! Settings are read from environment variables, falling back to defaults
//! that match a task API running on the local machine.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

pub const ENV_API_URL: &str = "TASKLIST_API_URL";
pub const ENV_EDIT_RESETS_COMPLETION: &str = "TASKLIST_EDIT_RESETS_COMPLETION";
pub const ENV_GUARD_IN_FLIGHT: &str = "TASKLIST_GUARD_IN_FLIGHT";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "TASKLIST_REQUEST_TIMEOUT_SECS";

/// What an edit does to the task's completed flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPolicy {
    /// Keep the flag the task had before the edit
    #[default]
    PreserveCompletion,
    /// Always submit the edited task as not completed
    ResetCompletion,
}

/// Configuration for the task list client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base location of the remote task API
    pub base_url: String,
    pub edit_policy: EditPolicy,
    /// Reject a second operation on a task while one is still pending
    pub guard_in_flight: bool,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            edit_policy: EditPolicy::default(),
            guard_in_flight: true,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Build a configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup(ENV_API_URL)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or(defaults.base_url);

        let edit_policy = if parse_flag(lookup(ENV_EDIT_RESETS_COMPLETION), false) {
            EditPolicy::ResetCompletion
        } else {
            EditPolicy::PreserveCompletion
        };

        let request_timeout = lookup(ENV_REQUEST_TIMEOUT_SECS)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            base_url,
            edit_policy,
            guard_in_flight: parse_flag(lookup(ENV_GUARD_IN_FLIGHT), defaults.guard_in_flight),
            request_timeout,
        }
    }

    /// Set the API base location
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the edit policy
    pub fn with_edit_policy(mut self, edit_policy: EditPolicy) -> Self {
        self.edit_policy = edit_policy;
        self
    }

    /// Enable or disable the per-task in-flight guard
    pub fn with_guard_in_flight(mut self, enabled: bool) -> Self {
        self.guard_in_flight = enabled;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

fn parse_flag(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = config_from(&[]);
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.edit_policy, EditPolicy::PreserveCompletion);
        assert!(config.guard_in_flight);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_reads_env_values() {
        let config = config_from(&[
            (ENV_API_URL, " http://tasks.internal:8080 "),
            (ENV_EDIT_RESETS_COMPLETION, "yes"),
            (ENV_GUARD_IN_FLIGHT, "off"),
            (ENV_REQUEST_TIMEOUT_SECS, "15"),
        ]);
        assert_eq!(config.base_url, "http://tasks.internal:8080");
        assert_eq!(config.edit_policy, EditPolicy::ResetCompletion);
        assert!(!config.guard_in_flight);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_unrecognized_values_fall_back() {
        let config = config_from(&[
            (ENV_API_URL, ""),
            (ENV_GUARD_IN_FLIGHT, "maybe"),
            (ENV_REQUEST_TIMEOUT_SECS, "soon"),
        ]);
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert!(config.guard_in_flight);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_builder_setters() {
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:9000")
            .with_edit_policy(EditPolicy::ResetCompletion)
            .with_guard_in_flight(false)
            .with_request_timeout(Duration::from_secs(2));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.edit_policy, EditPolicy::ResetCompletion);
        assert!(!config.guard_in_flight);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(2)));
    }
}
