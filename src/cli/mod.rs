//! cli
//!
//! Command-line interface layer for reflens.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the tracing subscriber
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that run a single [`crate::git::Git`] query and print the
//! result. Nothing here touches the repository directly.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::ui::output::Verbosity;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "REFLENS_LOG";

/// Install the stderr tracing subscriber.
///
/// `REFLENS_LOG` wins when set; otherwise `--debug` selects `debug` and
/// the default is `warn`.
pub fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok();
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`, after tracing is
/// installed. The returned code is the process exit status.
pub fn run(cli: Cli) -> Result<ExitCode> {
    // Absolute from here on; queries join paths onto it.
    let here = std::env::current_dir().context("cannot determine current directory")?;
    let cwd = match cli.cwd {
        Some(dir) => here.join(dir),
        None => here,
    };

    let ctx = commands::Context {
        cwd,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        json: cli.json,
    };

    commands::dispatch(cli.command, &ctx)
}
