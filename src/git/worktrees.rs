//! git::worktrees
//!
//! The checked-out ref of every worktree attached to a repository.
//!
//! Each worktree keeps its own `HEAD`: the main one in the administrative
//! directory itself, linked ones in `<git-dir>/worktrees/<name>/HEAD`. The
//! files are read directly rather than through `git worktree list`, whose
//! porcelain output only appeared well after worktrees themselves. Symbolic
//! HEADs are then resolved against the shared ref store with `rev-parse`.
//!
//! Linked worktrees need git 2.5.0. Below that the query fails with
//! [`GitError::Unsupported`] before touching the filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::capabilities::{Capabilities, Capability};
use super::interface::{Git, GitError};
use super::runner::CommandRunner;
use crate::core::types::{Oid, Ref};

const HEAD_FILE: &str = "HEAD";
const WORKTREES_DIR: &str = "worktrees";
const SYMREF_PREFIX: &str = "ref:";

impl<R: CommandRunner> Git<R> {
    /// One [`Ref`] per worktree: the main worktree first, then linked
    /// worktrees ordered by their administrative directory name.
    ///
    /// `git_dir` is the repository's common administrative directory (see
    /// [`super::RepoInfo::common_dir`]); a relative path is taken against
    /// the working directory.
    ///
    /// # Errors
    ///
    /// - [`GitError::Unsupported`] if the installed git predates worktrees
    /// - [`GitError::Io`] if the main worktree's `HEAD` cannot be read
    /// - [`GitError::RefNotFound`] if a worktree is on a branch with no commits
    /// - [`GitError::MalformedOutput`] if a `HEAD` file holds neither a
    ///   symbolic ref nor a commit id
    pub fn all_worktree_heads(&self, git_dir: &Path) -> Result<Vec<Ref>, GitError> {
        let caps = self.capabilities()?;
        self.worktree_heads_with(&caps, git_dir)
    }

    /// Same as [`Git::all_worktree_heads`] with an already probed capability set.
    pub fn worktree_heads_with(
        &self,
        caps: &Capabilities,
        git_dir: &Path,
    ) -> Result<Vec<Ref>, GitError> {
        caps.require(Capability::Worktrees)?;

        let git_dir = if git_dir.is_absolute() {
            git_dir.to_path_buf()
        } else {
            self.cwd().join(git_dir)
        };

        // The main worktree's HEAD always exists; without it this is not an
        // administrative directory at all.
        let main_head = git_dir.join(HEAD_FILE);
        let content = fs::read_to_string(&main_head).map_err(|source| GitError::Io {
            path: main_head.clone(),
            source,
        })?;
        let mut heads = vec![self.resolve_head_file(&git_dir, &main_head, &content)?];
        debug!(path = %main_head.display(), name = %heads[0].name, "resolved main worktree HEAD");

        for head_file in linked_head_files(&git_dir)? {
            let Some(content) = read_optional(&head_file)? else {
                debug!(path = %head_file.display(), "worktree has no HEAD, skipping");
                continue;
            };
            let head = self.resolve_head_file(&git_dir, &head_file, &content)?;
            debug!(path = %head_file.display(), name = %head.name, "resolved worktree HEAD");
            heads.push(head);
        }
        Ok(heads)
    }

    fn resolve_head_file(
        &self,
        git_dir: &Path,
        head_file: &Path,
        content: &str,
    ) -> Result<Ref, GitError> {
        let content = content.trim();
        if let Some(target) = content.strip_prefix(SYMREF_PREFIX) {
            return self.resolve_ref_with(Some(git_dir), target.trim());
        }
        if Oid::is_full_hex(content) {
            return Ok(Ref::detached(Oid::new(content)?));
        }
        Err(GitError::MalformedOutput {
            command: format!("read {}", head_file.display()),
            line: content.to_string(),
            reason: "expected `ref: <path>` or a commit id".to_string(),
        })
    }
}

/// HEAD files of linked worktrees, by administrative directory name.
fn linked_head_files(git_dir: &Path) -> Result<Vec<PathBuf>, GitError> {
    let admin = git_dir.join(WORKTREES_DIR);
    let entries = match fs::read_dir(&admin) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(GitError::Io { path: admin, source }),
    };

    let mut linked = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| GitError::Io {
            path: admin.clone(),
            source,
        })?;
        if entry.path().is_dir() {
            linked.push(entry.path().join(HEAD_FILE));
        }
    }
    linked.sort();
    Ok(linked)
}

fn read_optional(path: &Path) -> Result<Option<String>, GitError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(GitError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
