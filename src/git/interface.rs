//! git::interface
//!
//! The `Git` façade: a runner, a git binary and a working directory.
//!
//! All queries in this crate are methods on [`Git`], spread across the
//! sibling modules by concern ([`super::refs`], [`super::branches`],
//! [`super::worktrees`], [`super::files`]). This module holds the shared
//! plumbing they build on: invocation, failure classification, ref
//! resolution and config lookup.
//!
//! # Error Handling
//!
//! Git failures are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::NoCommits`]: HEAD is unborn
//! - [`GitError::RefNotFound`]: Requested ref does not resolve
//! - [`GitError::Unsupported`]: Installed git is too old for the query
//! - [`GitError::CommandFailed`]: Any other non-zero exit
//! - [`GitError::MalformedOutput`]: Output broke the expected text contract
//!
//! Nothing is retried and nothing is swallowed: each failed invocation is
//! returned to the caller with the full command line attached.
//!
//! # Example
//!
//! ```no_run
//! use reflens::git::Git;
//!
//! let git = Git::open(".")?;
//! let head = git.current_ref()?;
//! println!("{} is at {}", head.name, head.sha.short(7));
//! # Ok::<(), reflens::git::GitError>(())
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::capabilities::Capability;
use super::runner::{CommandOutput, CommandRunner, ProcessRunner};
use crate::core::types::{Oid, Ref, RefName, TypeError};
use crate::core::version::GitVersion;

/// Default name of the git executable.
pub const DEFAULT_GIT_BINARY: &str = "git";

/// Errors from Git queries.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The directory the query ran in
        path: PathBuf,
    },

    /// HEAD does not point at a commit yet.
    #[error("repository has no commits yet: {detail}")]
    NoCommits {
        /// What git said about HEAD
        detail: String,
    },

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// A branch-relative query was made while HEAD is detached.
    #[error("HEAD is detached at {sha}, not on a branch")]
    DetachedHead {
        /// The commit HEAD points to
        sha: Oid,
    },

    /// The current branch has no remote upstream configured.
    #[error("no upstream configured for branch '{branch}'")]
    NoUpstream {
        /// The local branch
        branch: String,
    },

    /// The installed git is too old for the requested feature.
    #[error("{feature} requires git {required} or newer (found {actual})")]
    Unsupported {
        /// The gated capability
        feature: Capability,
        /// Minimum git version for it
        required: &'static str,
        /// The installed version
        actual: GitVersion,
    },

    /// The git binary could not be started.
    #[error("failed to run `{command}`")]
    Spawn {
        /// The full command line
        command: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Git exited with a failure status.
    #[error("`{command}` failed ({}): {stderr}", exit_label(.code))]
    CommandFailed {
        /// The full command line
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
        /// Trimmed standard error
        stderr: String,
    },

    /// Output did not match the expected text format.
    #[error("unexpected output from `{command}`: {reason} (line: {line:?})")]
    MalformedOutput {
        /// The full command line
        command: String,
        /// The offending line
        line: String,
        /// What was wrong with it
        reason: String,
    },

    /// Reading repository administrative files failed.
    #[error("failed to read {path}")]
    Io {
        /// The file or directory
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// Description of the problem
        oid: String,
    },

    /// Invalid ref name format.
    #[error("invalid ref name: {message}")]
    InvalidRefName {
        /// Description of the problem
        message: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "killed by signal".to_string(),
    }
}

impl GitError {
    /// Whether this error only says the installed git lacks a feature.
    ///
    /// Callers that treat missing capabilities as "nothing to report" can
    /// branch on this instead of matching the variant.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, GitError::Unsupported { .. })
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidRefName(msg) => GitError::InvalidRefName { message: msg },
        }
    }
}

/// Locations of a repository on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoInfo {
    /// Per-worktree administrative directory (`.git` or `.git/worktrees/<name>`)
    pub git_dir: PathBuf,
    /// Administrative directory shared by all worktrees
    pub common_dir: PathBuf,
    /// Top of the working tree, absent for bare repositories
    pub work_dir: Option<PathBuf>,
}

/// The Git query interface.
///
/// Holds no repository state of its own: every method asks git afresh, so
/// results always reflect the repository at call time and a `Git` can be
/// shared freely between threads.
pub struct Git<R = ProcessRunner> {
    runner: R,
    binary: String,
    cwd: PathBuf,
}

impl<R> std::fmt::Debug for Git<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("binary", &self.binary)
            .field("cwd", &self.cwd)
            .finish()
    }
}

impl Git<ProcessRunner> {
    /// Open the repository containing `path`, using `git` from `PATH`.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if `path` is not inside a repository
    /// - [`GitError::Spawn`] if git cannot be executed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GitError> {
        Self::open_with_binary(path, DEFAULT_GIT_BINARY)
    }

    /// Open the repository containing `path` with an explicit git binary.
    pub fn open_with_binary(
        path: impl Into<PathBuf>,
        binary: impl Into<String>,
    ) -> Result<Self, GitError> {
        let git = Self::open_unchecked(path, binary);
        git.run(&["rev-parse", "--git-dir"])?;
        Ok(git)
    }

    /// Bind the process runner to `path` without checking for a repository.
    ///
    /// For queries about git itself, such as [`Git::version`]. A relative
    /// `path` is made absolute against the process working directory.
    pub fn open_unchecked(path: impl Into<PathBuf>, binary: impl Into<String>) -> Self {
        let path = path.into();
        let path = std::path::absolute(&path).unwrap_or(path);
        Self::with_runner(ProcessRunner, path).binary(binary)
    }
}

impl<R: CommandRunner> Git<R> {
    /// Bind a runner to a working directory without probing it.
    pub fn with_runner(runner: R, cwd: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            binary: DEFAULT_GIT_BINARY.to_string(),
            cwd: cwd.into(),
        }
    }

    /// Use a different git executable.
    pub fn binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// The directory queries run in.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    // =========================================================================
    // Invocation
    // =========================================================================

    /// Run git in the working directory and return stdout, failing on non-zero exit.
    pub(crate) fn run(&self, args: &[&str]) -> Result<String, GitError> {
        self.run_in(&self.cwd, args)
    }

    /// Run git in `dir` and return stdout, failing on non-zero exit.
    pub(crate) fn run_in(&self, dir: &Path, args: &[&str]) -> Result<String, GitError> {
        let output = self.run_tolerant_in(dir, args)?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(self.failure(dir, args, &output))
        }
    }

    /// Run git in the working directory, returning the output whatever the exit status.
    pub(crate) fn run_tolerant(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        self.run_tolerant_in(&self.cwd, args)
    }

    fn run_tolerant_in(&self, dir: &Path, args: &[&str]) -> Result<CommandOutput, GitError> {
        let owned: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        debug!(command = %self.command_line(args), cwd = %dir.display(), "running git");

        let output = self
            .runner
            .run(&self.binary, &owned, dir)
            .map_err(|source| GitError::Spawn {
                command: self.command_line(args),
                source,
            })?;

        debug!(code = ?output.code, "git exited");
        Ok(output)
    }

    /// Turn a failed invocation into the most specific error available.
    pub(crate) fn failure(&self, dir: &Path, args: &[&str], output: &CommandOutput) -> GitError {
        let stderr = output.stderr.trim();
        if stderr.contains("not a git repository") {
            return GitError::NotARepo {
                path: dir.to_path_buf(),
            };
        }
        GitError::CommandFailed {
            command: self.command_line(args),
            code: output.code,
            stderr: stderr.to_string(),
        }
    }

    pub(crate) fn malformed(
        &self,
        args: &[&str],
        line: &str,
        reason: impl Into<String>,
    ) -> GitError {
        GitError::MalformedOutput {
            command: self.command_line(args),
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    fn command_line(&self, args: &[&str]) -> String {
        let mut line = self.binary.clone();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    // =========================================================================
    // Repository Info
    // =========================================================================

    /// Locate the repository's administrative and working directories.
    ///
    /// Relative paths reported by git are made absolute against the
    /// working directory.
    pub fn repo_info(&self) -> Result<RepoInfo, GitError> {
        let args = ["rev-parse", "--git-dir", "--git-common-dir"];
        let stdout = self.run(&args)?;
        let mut lines = stdout.lines().map(str::trim).filter(|l| !l.is_empty());

        let git_dir = lines
            .next()
            .map(|l| self.absolute(l))
            .ok_or_else(|| self.malformed(&args, "", "missing git dir"))?;

        // Git older than 2.5 echoes the unknown flag back verbatim.
        let common_dir = match lines.next() {
            Some(line) if !line.starts_with("--") => self.absolute(line),
            _ => git_dir.clone(),
        };

        let toplevel = self.run_tolerant(&["rev-parse", "--show-toplevel"])?;
        let work_dir = if toplevel.success() {
            Some(toplevel.stdout.trim())
                .filter(|l| !l.is_empty())
                .map(|l| self.absolute(l))
        } else {
            None
        };

        Ok(RepoInfo {
            git_dir,
            common_dir,
            work_dir,
        })
    }

    fn absolute(&self, reported: &str) -> PathBuf {
        let path = PathBuf::from(reported);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }

    /// The installed git's version.
    pub fn version(&self) -> Result<GitVersion, GitError> {
        let args = ["version"];
        let stdout = self.run(&args)?;
        GitVersion::parse(&stdout)
            .ok_or_else(|| self.malformed(&args, stdout.trim(), "no version number"))
    }

    // =========================================================================
    // Ref Resolution
    // =========================================================================

    /// Resolve any revision git understands into a [`Ref`].
    ///
    /// Symbolic names are classified by namespace. A raw commit id, or a
    /// `HEAD` that is detached, yields a [`crate::core::types::RefType::Other`]
    /// ref named by its sha.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if the revision does not resolve
    pub fn resolve_ref(&self, name: &str) -> Result<Ref, GitError> {
        self.resolve_ref_with(None, name)
    }

    /// Resolve a revision, optionally against an explicit administrative directory.
    pub(crate) fn resolve_ref_with(
        &self,
        git_dir: Option<&Path>,
        name: &str,
    ) -> Result<Ref, GitError> {
        let git_dir_arg = git_dir.map(|dir| format!("--git-dir={}", dir.display()));
        let mut args: Vec<&str> = Vec::with_capacity(5);
        if let Some(arg) = git_dir_arg.as_deref() {
            args.push(arg);
        }
        args.extend(["rev-parse", name, "--symbolic-full-name", name]);

        let output = self.run_tolerant(&args)?;
        if !output.success() {
            return match self.failure(&self.cwd, &args, &output) {
                GitError::CommandFailed { .. } => Err(GitError::RefNotFound {
                    refname: name.to_string(),
                }),
                other => Err(other),
            };
        }

        self.parse_rev_parse(&args, &output.stdout)
    }

    /// Parse `rev-parse <rev> --symbolic-full-name <rev>` output.
    ///
    /// The first line is the commit id; the second, when present, is the
    /// fully-qualified name (or `HEAD` when detached).
    pub(crate) fn parse_rev_parse(&self, args: &[&str], stdout: &str) -> Result<Ref, GitError> {
        let mut lines = stdout.lines().map(str::trim).filter(|l| !l.is_empty());

        let sha_line = lines
            .next()
            .ok_or_else(|| self.malformed(args, "", "missing commit id"))?;
        let sha = Oid::new(sha_line).map_err(|e| self.malformed(args, sha_line, e.to_string()))?;

        match lines.next() {
            None | Some("HEAD") => Ok(Ref::detached(sha)),
            Some(full) => {
                let full = RefName::new(full)
                    .map_err(|e| self.malformed(args, full, e.to_string()))?;
                Ok(Ref::from_full_name(&full, sha))
            }
        }
    }

    // =========================================================================
    // Config
    // =========================================================================

    /// Read a single config value.
    ///
    /// Returns `None` when the key is unset or empty.
    pub fn config_get(&self, key: &str) -> Result<Option<String>, GitError> {
        let args = ["config", "--get", key];
        let output = self.run_tolerant(&args)?;
        match output.code {
            Some(0) => {
                let value = output.stdout.trim();
                Ok((!value.is_empty()).then(|| value.to_string()))
            }
            // `git config --get` exits 1 when the key is missing.
            Some(1) => Ok(None),
            _ => Err(self.failure(&self.cwd, &args, &output)),
        }
    }
}
