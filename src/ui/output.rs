//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Query results always go to stdout. Everything else is commentary and
//! respects the quiet flag. When `--json` is enabled, results are
//! machine-readable JSON.

use std::fmt::Display;

use crate::core::types::Ref;

/// Length of abbreviated commit ids in text output.
pub const SHORT_SHA_LEN: usize = 12;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a query result (always shown).
pub fn result(message: impl Display) {
    println!("{}", message);
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a ref as `<sha> <type> <name>`.
///
/// The type column is padded so names line up.
pub fn format_ref(r: &Ref) -> String {
    format!(
        "{} {:<6} {}",
        r.sha.short(SHORT_SHA_LEN),
        r.ref_type.label(),
        r.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Oid, RefType};

    const SHA: &str = "abc123def4567890abc123def4567890abc12345";

    #[test]
    fn verbosity_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn ref_line_layout() {
        let r = Ref::new("origin/main", RefType::RemoteBranch, Oid::new(SHA).unwrap());
        assert_eq!(format_ref(&r), "abc123def456 remote origin/main");

        let r = Ref::new("main", RefType::LocalBranch, Oid::new(SHA).unwrap());
        assert_eq!(format_ref(&r), "abc123def456 local  main");
    }
}
