//! CLI command handlers.

use std::path::PathBuf;

use anyhow::Result;
use console::{Style, style};
use serde::Serialize;

use slacky::{ClientBuilder, SlackyClient};
use slacky_config::{ConfigError, Discovery, TOKEN_ENV_VAR};

pub mod call;
pub mod channels;
pub mod history;
pub mod methods;
pub mod post;
pub mod users;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Token given on the command line; overrides every other source.
    pub token: Option<String>,
    /// Extra config file from `--config`.
    pub config_file: Option<PathBuf>,
    /// API root override.
    pub base_url: Option<String>,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Build a client from the discovered config and resolved token.
    pub fn client(&self) -> Result<SlackyClient> {
        let mut discovery = Discovery::new();
        if let Some(path) = &self.config_file {
            discovery = discovery.file(path);
        }
        let loaded = discovery.load()?;
        for warning in &loaded.warnings {
            tracing::warn!("{}", warning);
        }
        let mut config = loaded.config;

        let token = match &self.token {
            Some(token) => token.clone(),
            None => {
                let resolved = slacky_config::resolve_token(config.token.as_deref()).ok_or_else(
                    || ConfigError::TokenNotFound {
                        env_var: TOKEN_ENV_VAR.to_string(),
                    },
                )?;
                tracing::debug!(source = %resolved.source, "Resolved Slack token");
                resolved.value
            }
        };
        config.token = Some(token);
        if let Some(url) = &self.base_url {
            config.base_url = Some(url.clone());
        }

        Ok(ClientBuilder::from_config(&config).build()?)
    }

    /// Print `value` as pretty JSON.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Bold title followed by a rule.
pub fn header(title: &str) {
    let dim = Style::new().dim();
    println!("{}", style(title).bold());
    println!("{}", dim.apply_to("─".repeat(50)));
}

/// Green check mark line.
pub fn success(message: impl std::fmt::Display) {
    let green = Style::new().green();
    println!("{} {}", green.apply_to("✓"), message);
}

pub fn truncate(s: &str, max_len: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_len {
        s
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
