//! git::files
//!
//! Index-tracked paths matching a glob.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use super::interface::{Git, GitError};
use super::runner::CommandRunner;

impl<R: CommandRunner> Git<R> {
    /// Paths the index tracks that match `pattern`, relative to `base_dir`.
    ///
    /// Tracked means present in the index: committed, newly staged and
    /// modified files are all listed whatever their working-tree state,
    /// while a removal staged with `git rm` drops the path even though it
    /// is still in history. The glob is matched by git as a pathspec, so
    /// `*.txt` reaches into subdirectories and `folder1/*` is scoped to one.
    ///
    /// `base_dir` replaces the process working directory; a relative
    /// `base_dir` is taken against this handle's working directory.
    pub fn tracked_files(&self, base_dir: &Path, pattern: &str) -> Result<Vec<String>, GitError> {
        let dir = if base_dir.is_absolute() {
            base_dir.to_path_buf()
        } else {
            self.cwd().join(base_dir)
        };

        let stdout = self.run_in(&dir, &["ls-files", "-z", "--cached", "--", pattern])?;

        // Unmerged paths appear once per conflict stage.
        let mut seen = HashSet::new();
        let files: Vec<String> = stdout
            .split('\0')
            .filter(|path| !path.is_empty())
            .filter(|path| seen.insert(*path))
            .map(str::to_string)
            .collect();

        debug!(%pattern, dir = %dir.display(), count = files.len(), "listed tracked files");
        Ok(files)
    }
}
