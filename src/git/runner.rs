//! git::runner
//!
//! The process boundary: something that can run a git invocation and hand
//! back what it printed.
//!
//! # Design
//!
//! Every query in [`crate::git`] goes through a [`CommandRunner`]. The real
//! implementation, [`ProcessRunner`], spawns the binary with `std::process`.
//! Tests substitute [`crate::git::mock::MockRunner`] and feed canned plumbing
//! output instead, so parsing can be exercised without a repository on disk.
//!
//! Runners never interpret exit codes. Deciding whether a non-zero status is
//! a failure or an expected answer (`git config` exits 1 for a missing key)
//! belongs to the caller.

use std::io;
use std::path::Path;
use std::process::Command;

/// Captured result of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,
    /// Exit code, or `None` if the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    /// A successful run that printed `stdout`.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
        }
    }

    /// A run that exited with `code` and printed `stderr`.
    pub fn exit(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            code: Some(code),
        }
    }

    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes a command and captures its output.
///
/// Implementations must be safe to share between threads: queries are
/// independent and may be issued concurrently against the same runner.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `cwd`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error only when the process could not be started or
    /// its output could not be collected. A non-zero exit is not an error
    /// at this layer.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<CommandOutput>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<CommandOutput> {
        (**self).run(program, args, cwd)
    }
}

/// Runs commands as child processes.
///
/// Forces the C locale so error text stays stable for classification, and
/// disables terminal prompts so a query can never block on credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .env("LC_ALL", "C")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }
}
