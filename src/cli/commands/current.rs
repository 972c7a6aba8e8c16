//! current command - Show the checked-out ref or its upstream

use anyhow::Result;

use super::Context;

/// Show the checked-out ref, or with `remote` its resolved upstream.
pub fn current(ctx: &Context, remote: bool) -> Result<()> {
    let session = ctx.open()?;

    let head = if remote {
        session.git.current_remote_ref()?
    } else {
        session.git.current_ref()?
    };

    if ctx.json {
        ctx.emit_json(&head)
    } else {
        ctx.emit_refs(std::slice::from_ref(&head))
    }
}
