//! Configuration for the slacky Slack client.
//!
//! Provides TOML-based configuration with:
//! - Config file layering (user config dir, project-local, explicit file)
//! - Bot token resolution (keyring → env var → config file)

pub mod discovery;
pub mod error;
pub mod secrets;
pub mod types;

pub use discovery::{
    ConfigSource, Discovery, Layer, LoadedConfig, SourceStatus, config_dir, load_config,
    read_config, save_config, user_config_path,
};
pub use error::{ConfigError, Result};
pub use secrets::{ResolvedSecret, SecretSource, TOKEN_ENV_VAR, resolve_token};
pub use types::SlackyConfig;
