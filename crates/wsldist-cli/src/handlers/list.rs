//! List command handler.

use std::sync::Arc;

use anyhow::Result;

use super::format_distribution_row;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the list command.
///
/// With `background`, the refresh runs through the cache's async path;
/// otherwise the blocking call is moved off the async executor here.
pub async fn execute(ctx: &CliContext, background: bool) -> Result<()> {
    let listed = if background {
        ctx.cache.installed_distributions_async().await
    } else {
        let cache = Arc::clone(&ctx.cache);
        tokio::task::spawn_blocking(move || cache.installed_distributions()).await?
    };
    let distributions = listed.map_err(CliError::from)?;

    if distributions.is_empty() {
        println!("No WSL distributions installed.");
        return Ok(());
    }
    for distribution in distributions.iter() {
        println!("{}", format_distribution_row(distribution));
    }
    Ok(())
}
