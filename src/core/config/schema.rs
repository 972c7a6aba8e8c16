//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$REFLENS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/reflens/config.toml`
//! 3. `~/.reflens/config.toml`
//!
//! # Repo Config
//!
//! Located at `<git-common-dir>/reflens/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing: an empty git binary, a zero
//! day window or a remote filter that is not a single remote name are
//! rejected before any query runs.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// git_binary = "/usr/local/bin/git"
///
/// [recent]
/// days = 30
/// include_remotes = true
/// remote = "origin"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Git executable to run (default: "git" from `PATH`)
    pub git_binary: Option<String>,

    /// Defaults for `reflens recent`
    pub recent: Option<RecentDefaults>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(binary) = &self.git_binary {
            if binary.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "git_binary cannot be empty".to_string(),
                ));
            }
        }

        if let Some(recent) = &self.recent {
            recent.validate()?;
        }

        Ok(())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// [recent]
/// remote = "upstream"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Defaults for `reflens recent`, overriding the global ones
    pub recent: Option<RecentDefaults>,
}

impl RepoConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(recent) = &self.recent {
            recent.validate()?;
        }
        Ok(())
    }
}

/// Defaults for the recent-branches query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RecentDefaults {
    /// Width of the recency window in days
    pub days: Option<u32>,

    /// Whether remote-tracking branches are listed
    pub include_remotes: Option<bool>,

    /// Only list remote branches of this remote
    pub remote: Option<String>,
}

impl RecentDefaults {
    /// Validate the recent-branch defaults.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days == Some(0) {
            return Err(ConfigError::InvalidValue(
                "recent.days must be at least 1".to_string(),
            ));
        }

        if let Some(remote) = &self.remote {
            if remote.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "recent.remote cannot be empty".to_string(),
                ));
            }
            if remote.contains('/') {
                return Err(ConfigError::InvalidValue(format!(
                    "recent.remote '{}' must be a remote name, not a ref",
                    remote
                )));
            }
        }

        Ok(())
    }
}
