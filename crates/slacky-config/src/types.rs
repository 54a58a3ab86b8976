//! Configuration types.

use serde::{Deserialize, Serialize};

/// Client configuration as stored in `config.toml`.
///
/// ```toml
/// token = "xoxb-..."
/// base_url = "https://slack.com/api/"
/// timeout_secs = 30
/// user_agent = "release-bot/1.0"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackyConfig {
    /// Bot or user token. Prefer the keyring or `SLACK_BOT_TOKEN`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// API root; the public Slack API when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl SlackyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    pub fn merge(&mut self, other: SlackyConfig) {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }
    }

    /// Whether the token is stored in plaintext in this config.
    pub fn has_plaintext_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let config = SlackyConfig::from_toml(
            r#"
token = "xoxb-1"
base_url = "http://localhost:9000/api"
timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.token.as_deref(), Some("xoxb-1"));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000/api"));
        assert_eq!(config.timeout_secs, Some(5));
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_empty_config() {
        let config = SlackyConfig::from_toml("").unwrap();
        assert_eq!(config, SlackyConfig::new());
        assert!(!config.has_plaintext_token());
    }

    #[test]
    fn test_merge_overrides_only_set_fields() {
        let mut base = SlackyConfig {
            token: Some("xoxb-base".to_string()),
            timeout_secs: Some(10),
            ..Default::default()
        };
        base.merge(SlackyConfig {
            timeout_secs: Some(60),
            user_agent: Some("bot/2".to_string()),
            ..Default::default()
        });
        assert_eq!(base.token.as_deref(), Some("xoxb-base"));
        assert_eq!(base.timeout_secs, Some(60));
        assert_eq!(base.user_agent.as_deref(), Some("bot/2"));
    }

    #[test]
    fn test_to_toml_skips_unset() {
        let config = SlackyConfig {
            base_url: Some("https://example.test/api/".to_string()),
            ..Default::default()
        };
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("base_url"));
        assert!(!toml.contains("token"));
        assert_eq!(SlackyConfig::from_toml(&toml).unwrap(), config);
    }
}
