//! git::capabilities
//!
//! Version-gated features of the installed git.
//!
//! # Architecture
//!
//! A capability either exists or does not. The set is derived once from a
//! [`GitVersion`] and then passed explicitly to the queries that need it,
//! so both the supported and unsupported paths can be driven directly in
//! tests without faking a whole `git version` round trip.
//!
//! # Example
//!
//! ```
//! use reflens::core::version::GitVersion;
//! use reflens::git::capabilities::{Capabilities, Capability};
//!
//! let modern = Capabilities::from_version(GitVersion::parse("git version 2.43.0").unwrap());
//! assert!(modern.has(Capability::Worktrees));
//!
//! let old = Capabilities::from_version(GitVersion::parse("git version 2.4.9").unwrap());
//! assert!(!old.has(Capability::Worktrees));
//! assert!(old.require(Capability::Worktrees).unwrap_err().is_unsupported());
//! ```

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::interface::{Git, GitError};
use super::runner::CommandRunner;
use crate::core::version::GitVersion;

/// A feature whose availability depends on the git version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Linked worktrees (`git worktree`, per-worktree `HEAD` under
    /// `<common-dir>/worktrees/<name>`).
    Worktrees,
}

impl Capability {
    /// Every known capability.
    pub const ALL: [Capability; 1] = [Capability::Worktrees];

    /// Oldest git version providing this capability.
    pub fn min_version(&self) -> &'static str {
        match self {
            Capability::Worktrees => "2.5.0",
        }
    }

    /// Get a human-readable description of the capability.
    pub fn description(&self) -> &'static str {
        match self {
            Capability::Worktrees => "worktree support",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Capabilities of one git installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    version: GitVersion,
    available: HashSet<Capability>,
}

impl Capabilities {
    /// Derive the capability set for a version.
    pub fn from_version(version: GitVersion) -> Self {
        let available: HashSet<Capability> = Capability::ALL
            .into_iter()
            .filter(|cap| version.is_at_least(cap.min_version()))
            .collect();
        debug!(%version, ?available, "derived git capabilities");
        Self { version, available }
    }

    /// The version the set was derived from.
    pub fn version(&self) -> &GitVersion {
        &self.version
    }

    /// Check if a capability is present.
    pub fn has(&self, cap: Capability) -> bool {
        self.available.contains(&cap)
    }

    /// Fail with [`GitError::Unsupported`] unless `cap` is present.
    pub fn require(&self, cap: Capability) -> Result<(), GitError> {
        if self.has(cap) {
            Ok(())
        } else {
            Err(GitError::Unsupported {
                feature: cap,
                required: cap.min_version(),
                actual: self.version.clone(),
            })
        }
    }
}

impl<R: CommandRunner> Git<R> {
    /// Probe the installed git and derive its capabilities.
    ///
    /// Issues one `git version` call; nothing is cached between calls.
    pub fn capabilities(&self) -> Result<Capabilities, GitError> {
        Ok(Capabilities::from_version(self.version()?))
    }
}
