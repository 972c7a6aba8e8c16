//! worktrees command - Show the checked-out ref of every worktree

use anyhow::Result;

use super::Context;
use crate::ui::output;

/// Show every worktree's HEAD.
///
/// An installed git without worktree support is reported as a warning and
/// an empty list, not a failure.
pub fn worktrees(ctx: &Context) -> Result<()> {
    let session = ctx.open()?;

    let heads = match session.git.all_worktree_heads(&session.info.common_dir) {
        Ok(heads) => heads,
        Err(e) if e.is_unsupported() => {
            output::warn(e, ctx.verbosity);
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    ctx.emit_refs(&heads)
}
