//! Locating and layering slacky config files.
//!
//! Layers, lowest precedence first:
//! 1. `config.toml` in the user config directory
//! 2. `slacky.toml` in the project directory
//! 3. a file named explicitly (`--config`)

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{ConfigError, Result, SlackyConfig};

const PROJECT_FILE: &str = "slacky.toml";
const USER_FILE: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "SLACKY_CONFIG_DIR";

/// Which layer a config file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    User,
    Project,
    Explicit,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::User => write!(f, "user"),
            Layer::Project => write!(f, "project"),
            Layer::Explicit => write!(f, "explicit"),
        }
    }
}

/// Outcome of looking at one layer's file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Loaded,
    Missing,
    /// Present but unreadable or not valid TOML; the layer was skipped.
    Invalid(String),
}

/// A file that was considered during discovery.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub layer: Layer,
    pub path: PathBuf,
    pub status: SourceStatus,
}

impl ConfigSource {
    pub fn is_loaded(&self) -> bool {
        self.status == SourceStatus::Loaded
    }
}

/// Merged configuration plus how it was assembled.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: SlackyConfig,
    /// Every file considered, lowest precedence first.
    pub sources: Vec<ConfigSource>,
    /// Problems worth showing the user (plaintext tokens, skipped files).
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    /// Paths of the files that contributed to [`LoadedConfig::config`].
    pub fn loaded_from(&self) -> Vec<&Path> {
        self.sources
            .iter()
            .filter(|s| s.is_loaded())
            .map(|s| s.path.as_path())
            .collect()
    }

    /// Merge an optional layer. Missing files are recorded; broken ones warn.
    fn try_layer(&mut self, layer: Layer, path: PathBuf) {
        if !path.is_file() {
            self.sources.push(ConfigSource {
                layer,
                path,
                status: SourceStatus::Missing,
            });
            return;
        }

        match read_config(&path) {
            Ok(config) => self.apply(layer, path, config),
            Err(e) => {
                self.warnings
                    .push(format!("Skipping {layer} config {}: {e}", path.display()));
                self.sources.push(ConfigSource {
                    layer,
                    path,
                    status: SourceStatus::Invalid(e.to_string()),
                });
            }
        }
    }

    fn apply(&mut self, layer: Layer, path: PathBuf, config: SlackyConfig) {
        if config.has_plaintext_token() {
            self.warnings.push(format!(
                "{} holds a plaintext Slack token; prefer {} or the system keyring",
                path.display(),
                crate::TOKEN_ENV_VAR
            ));
        }
        self.config.merge(config);
        self.sources.push(ConfigSource {
            layer,
            path,
            status: SourceStatus::Loaded,
        });
    }
}

/// Where to look for config files.
///
/// ```no_run
/// let loaded = slacky_config::Discovery::new()
///     .project_dir(".")
///     .file("ci/slacky.toml")
///     .load()?;
/// # Ok::<(), slacky_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    project_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    file: Option<PathBuf>,
}

impl Discovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory searched for `slacky.toml` (default: the working directory).
    pub fn project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    /// User config directory, overriding `SLACKY_CONFIG_DIR` and the
    /// platform default.
    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// Highest-precedence file. Unlike the other layers it must exist and
    /// parse.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<LoadedConfig> {
        let mut loaded = LoadedConfig::default();

        let user_dir = self.config_dir.clone().or_else(config_dir);
        if let Some(dir) = user_dir {
            loaded.try_layer(Layer::User, dir.join(USER_FILE));
        }

        let project = match &self.project_dir {
            Some(dir) => dir.join(PROJECT_FILE),
            None => PathBuf::from(PROJECT_FILE),
        };
        loaded.try_layer(Layer::Project, project);

        if let Some(path) = &self.file {
            let config = read_config(path)?;
            loaded.apply(Layer::Explicit, path.clone(), config);
        }

        Ok(loaded)
    }
}

/// Discover and merge the user and project layers.
pub fn load_config(project_dir: Option<&Path>) -> Result<LoadedConfig> {
    let mut discovery = Discovery::new();
    if let Some(dir) = project_dir {
        discovery = discovery.project_dir(dir);
    }
    discovery.load()
}

/// Parse one config file.
pub fn read_config(path: &Path) -> Result<SlackyConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    SlackyConfig::from_toml(&contents)
}

/// Write `config` as TOML, creating missing parent directories.
pub fn save_config(config: &SlackyConfig, path: &Path) -> Result<()> {
    let write_error = |at: &Path| {
        let path = at.display().to_string();
        move |source: std::io::Error| ConfigError::WriteFile { path, source }
    };

    let contents = config.to_toml()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error(parent))?;
    }
    std::fs::write(path, contents).map_err(write_error(path))
}

/// The user config directory: `SLACKY_CONFIG_DIR` if set, else the platform
/// config directory joined with `slacky`.
pub fn config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|d| d.join("slacky")),
    }
}

/// Path of the user layer's file.
pub fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(USER_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Discovery confined to two temp directories.
    fn isolated(user: &TempDir, project: &TempDir) -> Discovery {
        Discovery::new()
            .config_dir(user.path())
            .project_dir(project.path())
    }

    #[test]
    fn test_read_config_errors() {
        let err = read_config(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is not valid toml {{{{").unwrap();
        assert!(matches!(read_config(&path).unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_no_files_records_missing_layers() {
        let (user, project) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        let loaded = isolated(&user, &project).load().unwrap();

        assert_eq!(loaded.config, SlackyConfig::new());
        assert!(loaded.loaded_from().is_empty());
        assert!(loaded.warnings.is_empty());
        let layers: Vec<_> = loaded.sources.iter().map(|s| s.layer).collect();
        assert_eq!(layers, [Layer::User, Layer::Project]);
        assert!(loaded.sources.iter().all(|s| s.status == SourceStatus::Missing));
    }

    #[test]
    fn test_layers_override_in_order() {
        let (user, project) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        fs::write(
            user.path().join("config.toml"),
            "base_url = \"http://user.test/api\"\ntimeout_secs = 10\nuser_agent = \"ops-bot\"\n",
        )
        .unwrap();
        fs::write(project.path().join("slacky.toml"), "timeout_secs = 3\n").unwrap();
        let explicit = project.path().join("ci.toml");
        fs::write(&explicit, "base_url = \"http://ci.test/api\"\n").unwrap();

        let loaded = isolated(&user, &project).file(&explicit).load().unwrap();
        assert_eq!(loaded.config.base_url.as_deref(), Some("http://ci.test/api"));
        assert_eq!(loaded.config.timeout_secs, Some(3));
        assert_eq!(loaded.config.user_agent.as_deref(), Some("ops-bot"));
        assert_eq!(loaded.loaded_from().len(), 3);
        assert_eq!(loaded.sources[2].layer, Layer::Explicit);
    }

    #[test]
    fn test_plaintext_token_warning() {
        let (user, project) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        fs::write(project.path().join("slacky.toml"), "token = \"xoxb-secret\"\n").unwrap();

        let loaded = isolated(&user, &project).load().unwrap();
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("plaintext"));
        assert_eq!(loaded.config.token.as_deref(), Some("xoxb-secret"));
    }

    #[test]
    fn test_broken_optional_layer_is_skipped() {
        let (user, project) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        fs::write(project.path().join("slacky.toml"), "not valid toml {{{{").unwrap();

        let loaded = isolated(&user, &project).load().unwrap();
        assert!(loaded.warnings[0].starts_with("Skipping project config"));
        assert!(matches!(loaded.sources[1].status, SourceStatus::Invalid(_)));
        assert!(loaded.loaded_from().is_empty());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let (user, project) = (TempDir::new().unwrap(), TempDir::new().unwrap());
        let err = isolated(&user, &project)
            .file(project.path().join("absent.toml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_save_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = SlackyConfig {
            timeout_secs: Some(45),
            ..Default::default()
        };

        save_config(&config, &path).unwrap();
        assert_eq!(read_config(&path).unwrap(), config);
    }
}
