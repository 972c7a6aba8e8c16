//! git::mock
//!
//! Canned-output runner for deterministic testing.
//!
//! # Design
//!
//! [`MockRunner`] maps exact argument lists to prepared [`CommandOutput`]s
//! and records every invocation it receives. Lookups ignore the program
//! name and working directory, so fixtures read like the git command line
//! they stand in for. An invocation with no prepared answer fails as if the
//! binary could not be spawned, which makes a missing fixture loud.
//!
//! # Example
//!
//! ```
//! use reflens::git::mock::MockRunner;
//! use reflens::git::runner::CommandOutput;
//! use reflens::git::Git;
//!
//! let runner = MockRunner::new().on(
//!     &["rev-parse", "HEAD", "--symbolic-full-name", "HEAD"],
//!     CommandOutput::ok("abc123def4567890abc123def4567890abc12345\nrefs/heads/main\n"),
//! );
//!
//! let git = Git::with_runner(runner.clone(), "/repo");
//! let head = git.current_ref().unwrap();
//! assert_eq!(head.name, "main");
//! assert_eq!(runner.calls().len(), 1);
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::runner::{CommandOutput, CommandRunner};

/// Mock runner for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<MockRunnerInner>>,
}

#[derive(Debug, Default)]
struct MockRunnerInner {
    responses: Vec<(Vec<String>, CommandOutput)>,
    calls: Vec<MockCall>,
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// Program that was asked for.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Directory the command would have run in.
    pub cwd: PathBuf,
}

impl MockRunner {
    /// Create a runner with no prepared responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the output for an exact argument list.
    ///
    /// A later registration for the same arguments replaces the earlier one.
    pub fn on(self, args: &[&str], output: CommandOutput) -> Self {
        self.respond(args, output);
        self
    }

    /// Prepare the output for an exact argument list, in place.
    pub fn respond(&self, args: &[&str], output: CommandOutput) {
        let key: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let mut inner = self.lock();
        inner.responses.retain(|(existing, _)| existing != &key);
        inner.responses.push((key, output));
    }

    /// All invocations seen so far, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockRunnerInner> {
        // Poisoning is ignored; the recorded data stays readable.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<CommandOutput> {
        let mut inner = self.lock();
        inner.calls.push(MockCall {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        });

        inner
            .responses
            .iter()
            .find(|(key, _)| key.as_slice() == args)
            .map(|(_, output)| output.clone())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no canned response for: {} {}", program, args.join(" ")),
                )
            })
    }
}
