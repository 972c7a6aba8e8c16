//! git::refs
//!
//! The checked-out ref and its upstream.
//!
//! HEAD is resolved with `rev-parse`, upstreams are read from the
//! `branch.<name>.remote` / `branch.<name>.merge` tracking configuration.
//! Every failure is returned: a missing upstream is never replaced by a
//! guessed `origin/<branch>`.

use tracing::debug;

use super::interface::{Git, GitError};
use super::runner::CommandRunner;
use crate::core::types::{Ref, RefType};

/// `branch.<name>.remote` value meaning "tracks a local branch".
const LOCAL_REMOTE: &str = ".";

impl<R: CommandRunner> Git<R> {
    /// The ref currently checked out.
    ///
    /// On a branch this is a [`RefType::LocalBranch`]; with a detached HEAD
    /// it is a [`RefType::Other`] ref named by the commit id.
    ///
    /// # Errors
    ///
    /// - [`GitError::NoCommits`] if HEAD is unborn (fresh repository)
    /// - [`GitError::NotARepo`] outside a repository
    pub fn current_ref(&self) -> Result<Ref, GitError> {
        let args = ["rev-parse", "HEAD", "--symbolic-full-name", "HEAD"];
        let output = self.run_tolerant(&args)?;
        if !output.success() {
            return match self.failure(self.cwd(), &args, &output) {
                GitError::CommandFailed { stderr, .. } => {
                    Err(GitError::NoCommits { detail: stderr })
                }
                other => Err(other),
            };
        }
        self.parse_rev_parse(&args, &output.stdout)
    }

    /// Name of the remote a local branch tracks, if any.
    pub fn remote_for_branch(&self, branch: &str) -> Result<Option<String>, GitError> {
        self.config_get(&format!("branch.{branch}.remote"))
    }

    /// Name of the remote branch a local branch merges from.
    ///
    /// Falls back to the local name when `branch.<name>.merge` is unset or
    /// does not name a branch.
    pub fn remote_branch_for_local_branch(&self, branch: &str) -> Result<String, GitError> {
        let merge = self.config_get(&format!("branch.{branch}.merge"))?;
        Ok(merge
            .as_deref()
            .and_then(|m| m.strip_prefix(RefType::LOCAL_PREFIX))
            .unwrap_or(branch)
            .to_string())
    }

    /// `<remote>/<branch>` of the current branch's upstream.
    ///
    /// # Errors
    ///
    /// - [`GitError::DetachedHead`] if HEAD is not on a branch
    /// - [`GitError::NoUpstream`] if no remote is configured for the branch
    pub fn remote_ref_name_for_current_branch(&self) -> Result<String, GitError> {
        let (remote, branch) = self.current_upstream()?;
        Ok(format!("{remote}/{branch}"))
    }

    /// Remote name of the current branch's upstream.
    pub fn remote_for_current_branch(&self) -> Result<String, GitError> {
        let (remote, _) = self.current_upstream()?;
        Ok(remote)
    }

    /// The current branch's upstream, resolved to a remote-tracking ref.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if the upstream is configured but the
    ///   remote-tracking ref does not exist (never fetched or pushed)
    pub fn current_remote_ref(&self) -> Result<Ref, GitError> {
        let name = self.remote_ref_name_for_current_branch()?;
        let full = format!("{}{}", RefType::REMOTE_PREFIX, name);
        match self.resolve_ref(&full) {
            Err(GitError::RefNotFound { .. }) => Err(GitError::RefNotFound { refname: name }),
            other => other,
        }
    }

    fn current_upstream(&self) -> Result<(String, String), GitError> {
        let current = self.current_ref()?;
        if current.ref_type != RefType::LocalBranch {
            return Err(GitError::DetachedHead { sha: current.sha });
        }

        let branch = current.name;
        let remote = match self.remote_for_branch(&branch)? {
            Some(remote) if remote != LOCAL_REMOTE => remote,
            other => {
                debug!(%branch, remote = ?other, "no remote upstream for branch");
                return Err(GitError::NoUpstream { branch });
            }
        };
        let merge = self.remote_branch_for_local_branch(&branch)?;
        Ok((remote, merge))
    }
}
