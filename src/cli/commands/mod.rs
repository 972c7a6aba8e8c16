//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository through [`Context::open`] (if it needs one)
//! 2. Runs one query on [`Git`]
//! 3. Formats and displays output
//!
//! Query results go to stdout as text or, with `--json`, as JSON. Notes and
//! warnings go to stderr and respect `--quiet`.

mod completion;
mod current;
mod recent;
mod tracked;
mod upstream;
mod version_check;
mod worktrees;

pub use completion::completion;
pub use current::current;
pub use recent::recent;
pub use tracked::tracked;
pub use upstream::upstream;
pub use version_check::version_check;
pub use worktrees::worktrees;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::args::Command;
use crate::core::config::Config;
use crate::core::types::Ref;
use crate::git::{Git, RepoInfo};
use crate::ui::output::{self, Verbosity};

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory the command runs in.
    pub cwd: PathBuf,
    /// Output verbosity.
    pub verbosity: Verbosity,
    /// Emit JSON instead of text.
    pub json: bool,
}

/// An opened repository with its merged configuration.
#[derive(Debug)]
pub struct Session {
    pub git: Git,
    pub info: RepoInfo,
    pub config: Config,
}

impl Context {
    /// Load configuration without a repository.
    pub fn global_config(&self) -> Result<Config> {
        Ok(Config::load(None)
            .context("failed to load configuration")?
            .config)
    }

    /// Open the repository around `cwd` and load its configuration.
    ///
    /// The git binary comes from global config; repo config is read from
    /// the repository's common directory once it is known.
    pub fn open(&self) -> Result<Session> {
        let global = self.global_config()?;
        let git = Git::open_with_binary(&self.cwd, global.git_binary())
            .with_context(|| format!("cannot open repository at {}", self.cwd.display()))?;
        let info = git.repo_info()?;

        let loaded = Config::load(Some(&info.common_dir)).context("failed to load configuration")?;
        for warning in &loaded.warnings {
            output::warn(
                format!("{} ({})", warning.message, warning.path.display()),
                self.verbosity,
            );
        }
        output::debug(format!("repository: {}", info.git_dir.display()), self.verbosity);

        Ok(Session {
            git,
            info,
            config: loaded.config,
        })
    }

    /// Print a list of refs, one per line or as a JSON array.
    pub fn emit_refs(&self, refs: &[Ref]) -> Result<()> {
        if self.json {
            return self.emit_json(&refs);
        }
        for r in refs {
            output::result(output::format_ref(r));
        }
        Ok(())
    }

    /// Print any serializable value as pretty JSON.
    pub fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
        output::result(text);
        Ok(())
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Current { remote } => current(ctx, remote)?,
        Command::Upstream { remote_only } => upstream(ctx, remote_only)?,
        Command::Recent {
            days,
            remotes,
            remote,
        } => recent(ctx, days, remotes, remote.as_deref())?,
        Command::Worktrees => worktrees(ctx)?,
        Command::Tracked { pattern } => tracked(ctx, &pattern)?,
        Command::VersionCheck { required, actual } => {
            return version_check(ctx, &required, actual.as_deref())
        }
        Command::Completion { shell } => completion(shell)?,
    }
    Ok(ExitCode::SUCCESS)
}
