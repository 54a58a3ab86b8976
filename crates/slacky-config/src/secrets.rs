//! Token resolution.
//!
//! Resolution order:
//! 1. System keyring (if `keyring` feature enabled)
//! 2. `SLACK_BOT_TOKEN` environment variable
//! 3. Config file (with warning)
//!
//! The keyring entry is service="slacky", user="bot_token".

/// Environment variable holding the Slack token.
pub const TOKEN_ENV_VAR: &str = "SLACK_BOT_TOKEN";

/// Keyring service name.
#[cfg(feature = "keyring")]
const SERVICE_NAME: &str = "slacky";

/// Keyring user name.
#[cfg(feature = "keyring")]
const KEYRING_USER: &str = "bot_token";

/// A resolved secret with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSecret {
    pub value: String,
    pub source: SecretSource,
}

/// Where a secret was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// OS keyring (macOS Keychain, Linux secret-service, Windows Credential Manager).
    Keyring,
    /// Environment variable.
    EnvVar(String),
    /// Config file (plaintext, not recommended).
    ConfigFile,
}

impl std::fmt::Display for SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretSource::Keyring => write!(f, "system keyring"),
            SecretSource::EnvVar(var) => write!(f, "env var {}", var),
            SecretSource::ConfigFile => write!(f, "config file (plaintext)"),
        }
    }
}

/// Resolve the Slack token through the full chain.
pub fn resolve_token(config_value: Option<&str>) -> Option<ResolvedSecret> {
    resolve_token_with(config_value, |var| std::env::var(var).ok())
}

fn resolve_token_with(
    config_value: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<ResolvedSecret> {
    if let Some(secret) = get_from_keyring() {
        return Some(secret);
    }

    if let Some(value) = env(TOKEN_ENV_VAR).filter(|v| !v.is_empty()) {
        return Some(ResolvedSecret {
            value,
            source: SecretSource::EnvVar(TOKEN_ENV_VAR.to_string()),
        });
    }

    config_value
        .filter(|v| !v.is_empty())
        .map(|v| ResolvedSecret {
            value: v.to_string(),
            source: SecretSource::ConfigFile,
        })
}

#[cfg(feature = "keyring")]
fn get_from_keyring() -> Option<ResolvedSecret> {
    // Keep tests isolated from the local machine's keychain.
    if cfg!(test) {
        return None;
    }

    let entry = keyring::Entry::new(SERVICE_NAME, KEYRING_USER).ok()?;
    let value = entry.get_password().ok()?;
    if value.is_empty() {
        return None;
    }
    Some(ResolvedSecret {
        value,
        source: SecretSource::Keyring,
    })
}

#[cfg(not(feature = "keyring"))]
fn get_from_keyring() -> Option<ResolvedSecret> {
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
