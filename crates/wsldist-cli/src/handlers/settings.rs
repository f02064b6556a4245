//! Settings command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Print the effective settings as pretty JSON.
pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(ctx.cache.settings())?);
    Ok(())
}
