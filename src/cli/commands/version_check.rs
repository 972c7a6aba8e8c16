//! version-check command - Compare git's version against a requirement

use std::process::ExitCode;

use anyhow::{anyhow, Result};
use serde::Serialize;

use super::Context;
use crate::core::version::{is_version_at_least, GitVersion};
use crate::git::Git;
use crate::ui::output;

#[derive(Serialize)]
struct VersionCheckJson<'a> {
    actual: &'a str,
    required: &'a str,
    satisfied: bool,
}

/// Exit 0 if the version is at least `required`, 1 otherwise.
///
/// Without `actual` the installed git is asked; no repository is needed.
pub fn version_check(ctx: &Context, required: &str, actual: Option<&str>) -> Result<ExitCode> {
    if GitVersion::parse(required).is_none() {
        return Err(anyhow!("'{}' is not a version number", required));
    }

    let actual = match actual {
        Some(v) => v.to_string(),
        None => {
            let config = ctx.global_config()?;
            Git::open_unchecked(&ctx.cwd, config.git_binary())
                .version()?
                .to_string()
        }
    };

    let satisfied = is_version_at_least(&actual, required);

    if ctx.json {
        ctx.emit_json(&VersionCheckJson {
            actual: &actual,
            required,
            satisfied,
        })?;
    } else {
        let op = if satisfied { ">=" } else { "<" };
        output::print(format!("{} {} {}", actual, op, required), ctx.verbosity);
    }

    Ok(if satisfied {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
