//! git
//!
//! Read-only queries over a local Git repository.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. Every query is a method on
//! [`Git`], which shells out to the git binary through an injected
//! [`CommandRunner`] and parses the plumbing output into the types of
//! [`crate::core::types`]. Swapping the runner for a [`MockRunner`] lets the
//! parsing be tested against canned text without a repository.
//!
//! # Responsibilities
//!
//! - Current ref and upstream resolution ([`refs`])
//! - Recent branch enumeration across remotes ([`branches`])
//! - Per-worktree HEAD resolution ([`worktrees`])
//! - Tracked file listing ([`files`])
//! - Version-gated features ([`capabilities`])
//!
//! # Invariants
//!
//! - Nothing is written: no ref, index or config mutation
//! - Nothing is cached: every call reflects the repository at call time
//! - Every failed invocation surfaces as a [`GitError`]; none are retried
//!
//! # Example
//!
//! ```no_run
//! use reflens::git::Git;
//!
//! let git = Git::open(".")?;
//! let head = git.current_ref()?;
//! match git.remote_ref_name_for_current_branch() {
//!     Ok(upstream) => println!("{} tracks {}", head.name, upstream),
//!     Err(e) => println!("{}: {}", head.name, e),
//! }
//! # Ok::<(), reflens::git::GitError>(())
//! ```

pub mod branches;
pub mod capabilities;
pub mod files;
mod interface;
pub mod mock;
pub mod refs;
pub mod runner;
pub mod worktrees;

pub use capabilities::{Capabilities, Capability};
pub use interface::{Git, GitError, RepoInfo, DEFAULT_GIT_BINARY};
pub use mock::MockRunner;
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
