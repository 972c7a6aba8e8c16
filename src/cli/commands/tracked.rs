//! tracked command - List index-tracked files matching a glob

use anyhow::Result;

use super::Context;
use crate::ui::output;

/// List tracked files relative to the command's directory.
pub fn tracked(ctx: &Context, pattern: &str) -> Result<()> {
    let session = ctx.open()?;
    let files = session.git.tracked_files(session.git.cwd(), pattern)?;

    if ctx.json {
        return ctx.emit_json(&files);
    }
    for file in files {
        output::result(file);
    }
    Ok(())
}
