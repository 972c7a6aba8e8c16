//! reflens - Read-only ref introspection for Git working copies
//!
//! reflens answers questions about a repository without changing it: which
//! ref is checked out and what it tracks, which branches saw commits
//! recently across remotes, what every worktree has checked out, and which
//! files the index tracks.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to git)
//! - [`git`] - Single interface for all Git queries
//! - [`core`] - Domain types, version comparison and configuration
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. No query writes to the repository
//! 2. Every query reflects the repository at call time; nothing is cached
//! 3. Failures are returned to the caller, never replaced by a guessed default

pub mod cli;
pub mod core;
pub mod git;
pub mod ui;
