//! upstream command - Show the configured upstream of the current branch

use anyhow::Result;
use serde::Serialize;

use super::Context;
use crate::ui::output;

#[derive(Serialize)]
struct UpstreamJson<'a> {
    remote: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream: Option<&'a str>,
}

/// Show `<remote>/<branch>`, or only the remote.
pub fn upstream(ctx: &Context, remote_only: bool) -> Result<()> {
    let session = ctx.open()?;

    if remote_only {
        let remote = session.git.remote_for_current_branch()?;
        if ctx.json {
            return ctx.emit_json(&UpstreamJson {
                remote: &remote,
                upstream: None,
            });
        }
        output::result(remote);
        return Ok(());
    }

    let name = session.git.remote_ref_name_for_current_branch()?;
    if ctx.json {
        // Remote names may themselves contain '/'.
        let remote = session.git.remote_for_current_branch()?;
        return ctx.emit_json(&UpstreamJson {
            remote: &remote,
            upstream: Some(&name),
        });
    }
    output::result(name);
    Ok(())
}
