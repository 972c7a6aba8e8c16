//! recent command - List branches with commits inside a time window

use anyhow::Result;
use chrono::{Duration, Utc};

use super::Context;
use crate::ui::output;

/// List recent branches.
///
/// Flags win over configuration. Naming a remote implies remotes are wanted.
pub fn recent(ctx: &Context, days: Option<u32>, remotes: bool, remote: Option<&str>) -> Result<()> {
    let session = ctx.open()?;
    let config = &session.config;

    let days = days.unwrap_or_else(|| config.recent_days());
    let remote_filter = remote.unwrap_or_else(|| config.remote());
    let include_remotes = remotes || remote.is_some() || config.include_remotes();

    let since = Utc::now() - Duration::days(i64::from(days));
    output::debug(
        format!(
            "recent: since={} remotes={} filter={:?}",
            since.to_rfc3339(),
            include_remotes,
            remote_filter
        ),
        ctx.verbosity,
    );

    let refs = session
        .git
        .recent_branches(since, include_remotes, remote_filter)?;

    if refs.is_empty() && !ctx.json {
        output::print(
            format!("No branches with commits in the last {} days", days),
            ctx.verbosity,
        );
        return Ok(());
    }
    ctx.emit_refs(&refs)
}
