//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! reflens has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$REFLENS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/reflens/config.toml`
//! 3. `~/.reflens/config.toml`
//!
//! # Repo Config Location
//!
//! `<git-common-dir>/reflens/config.toml`, shared by every worktree of the
//! repository.
//!
//! # Example
//!
//! ```no_run
//! use reflens::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! for warning in &result.warnings {
//!     eprintln!("warning: {}", warning.message);
//! }
//! let config = result.config;
//!
//! println!("git: {}", config.git_binary());
//! println!("window: {} days", config.recent_days());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RecentDefaults, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::git::DEFAULT_GIT_BINARY;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "REFLENS_CONFIG";

/// Default recency window for `reflens recent`.
pub const DEFAULT_RECENT_DAYS: u32 = 14;

const CONFIG_DIR: &str = "reflens";
const CONFIG_FILE: &str = "config.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: repo overrides global,
/// global overrides the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    global_path: Option<PathBuf>,
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `common_dir` (the repository's shared administrative directory)
    /// is provided, repo-specific config is loaded from it too.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(common_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = Self::load_global(&mut warnings)?;

        let (repo, repo_path) = match common_dir {
            Some(dir) => Self::load_repo(dir)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        debug!(?global_path, ?repo_path, "loaded configuration");

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
            warnings,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global(
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // An explicit path that does not exist is worth telling about.
        if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            if !path.exists() {
                warnings.push(ConfigWarning {
                    message: format!(
                        "{} points to a missing file, falling back to default locations",
                        CONFIG_ENV
                    ),
                    path,
                });
            }
        }

        for path in Self::global_candidates() {
            if path.exists() {
                let config = Self::read_global_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Global config locations, in search order.
    pub fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            candidates.push(PathBuf::from(path));
        }

        if let Some(xdg_home) = std::env::var_os("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join(CONFIG_DIR).join(CONFIG_FILE));
        }

        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".reflens").join(CONFIG_FILE));
        }

        candidates
    }

    /// Load repository configuration from the shared administrative directory.
    fn load_repo(common_dir: &Path) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::repo_config_path(common_dir);
        if !path.exists() {
            return Ok((None, None));
        }

        let config = Self::read_repo_config(&path)?;
        Ok((Some(config), Some(path)))
    }

    /// Read and parse a global config file.
    fn read_global_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        read_toml(path)
    }

    /// Read and parse a repo config file.
    fn read_repo_config(path: &Path) -> Result<RepoConfig, ConfigError> {
        read_toml(path)
    }

    /// Get the path for repo config.
    ///
    /// Returns `reflens/config.toml` inside the given administrative directory.
    pub fn repo_config_path(common_dir: &Path) -> PathBuf {
        common_dir.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the git executable.
    ///
    /// Defaults to "git" if not configured.
    pub fn git_binary(&self) -> &str {
        self.global
            .git_binary
            .as_deref()
            .unwrap_or(DEFAULT_GIT_BINARY)
    }

    /// Get the recency window in days.
    ///
    /// Defaults to 14 if not configured.
    pub fn recent_days(&self) -> u32 {
        self.recent_value(|r| r.days).unwrap_or(DEFAULT_RECENT_DAYS)
    }

    /// Check if remote branches are listed by default.
    ///
    /// Defaults to `false` if not configured.
    pub fn include_remotes(&self) -> bool {
        self.recent_value(|r| r.include_remotes).unwrap_or(false)
    }

    /// Get the default remote filter.
    ///
    /// Empty (every remote) if not configured.
    pub fn remote(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.recent.as_ref())
            .and_then(|r| r.remote.as_deref())
            .or_else(|| {
                self.global
                    .recent
                    .as_ref()
                    .and_then(|r| r.remote.as_deref())
            })
            .unwrap_or("")
    }

    fn recent_value<T>(&self, get: impl Fn(&RecentDefaults) -> Option<T>) -> Option<T> {
        self.repo
            .as_ref()
            .and_then(|r| r.recent.as_ref())
            .and_then(&get)
            .or_else(|| self.global.recent.as_ref().and_then(&get))
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
