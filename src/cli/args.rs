//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// reflens - Read-only ref introspection for Git working copies
#[derive(Parser, Debug)]
#[command(name = "reflens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if reflens was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output: only query results, no notes or warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the checked-out ref
    #[command(
        name = "current",
        long_about = "Show the ref currently checked out.\n\n\
            On a branch this prints the local branch and its commit. With a detached \
            HEAD the ref is named by its commit id. With --remote, the upstream \
            remote-tracking branch of the current branch is resolved instead.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Which branch am I on?
    reflens current

    # Where does my upstream point right now?
    reflens current --remote"
    )]
    Current {
        /// Resolve the current branch's upstream instead
        #[arg(long)]
        remote: bool,
    },

    /// Show the upstream of the current branch
    #[command(
        name = "upstream",
        long_about = "Show the configured upstream of the current branch.\n\n\
            Reads branch tracking configuration and prints `<remote>/<branch>`. \
            Fails if HEAD is detached or no remote is configured for the branch; \
            a missing upstream is never guessed.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Full upstream name
    reflens upstream

    # Only the remote, e.g. for `git fetch $(reflens upstream --remote-only)`
    reflens upstream --remote-only"
    )]
    Upstream {
        /// Print only the remote name
        #[arg(long)]
        remote_only: bool,
    },

    /// List branches with recent commits
    #[command(
        name = "recent",
        long_about = "List branches whose tip commit falls inside a recency window.\n\n\
            Local branches are always listed. Remote-tracking branches are added with \
            --remotes, or when --remote restricts them to one remote. Results are \
            ordered newest first; branches committed at the same moment keep local \
            branches ahead of remote ones.",
        after_help = "\
WORKFLOW EXAMPLES:
    # What have I touched in the last two weeks?
    reflens recent

    # Last week, including every remote
    reflens recent --days 7 --remotes

    # Only compare against origin
    reflens recent --remote origin"
    )]
    Recent {
        /// Width of the window in days [default: from config, else 14]
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,

        /// Include remote-tracking branches
        #[arg(long)]
        remotes: bool,

        /// Only include remote branches of this remote (implies --remotes)
        #[arg(long, value_name = "NAME")]
        remote: Option<String>,
    },

    /// Show the checked-out ref of every worktree
    #[command(
        name = "worktrees",
        long_about = "Show what every worktree of the repository has checked out.\n\n\
            The main worktree is listed first, then linked worktrees. Each entry \
            reflects that worktree's own HEAD. Requires git 2.5.0 or newer; on \
            older versions a warning is printed and the list is empty."
    )]
    Worktrees,

    /// List tracked files matching a pattern
    #[command(
        name = "tracked",
        long_about = "List files tracked by the index that match a glob.\n\n\
            Committed, staged and modified files are listed; files removed with \
            `git rm` are not, even before the removal is committed. Paths are \
            relative to the current directory.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Every tracked text file
    reflens tracked '*.txt'

    # Only inside one directory
    reflens tracked 'folder1/*'"
    )]
    Tracked {
        /// Glob to match (quote it so the shell does not expand it)
        pattern: String,
    },

    /// Check that git is at least a given version
    #[command(
        name = "version-check",
        long_about = "Compare the installed git version against a required version.\n\n\
            Versions are compared segment by segment; missing segments count as zero. \
            Exits 0 when the requirement is met and 1 otherwise.",
        after_help = "\
WORKFLOW EXAMPLES:
    # In a script
    reflens -q version-check 2.5.0 || echo 'git too old for worktrees'

    # Compare two arbitrary versions
    reflens version-check 2.6 --actual 2.5.10"
    )]
    VersionCheck {
        /// Minimum required version
        required: String,

        /// Compare this version instead of the installed git's
        #[arg(long, value_name = "VERSION")]
        actual: Option<String>,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for reflens commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    reflens completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    reflens completion zsh >> ~/.zshrc

    # Fish
    reflens completion fish > ~/.config/fish/completions/reflens.fish

    # PowerShell
    reflens completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
