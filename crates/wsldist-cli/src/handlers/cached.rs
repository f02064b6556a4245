//! Cached command handler.

use anyhow::Result;

use super::format_distribution_row;
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print the cached list without waiting for `wsl.exe`.
///
/// A fresh process always starts cold, so this usually reports a scheduled
/// refresh. The handler then joins that refresh, so the process does not
/// shut the cache down underneath it.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    if let Some(distributions) = ctx.cache.cached_distributions() {
        for distribution in distributions.iter() {
            println!("{}", format_distribution_row(distribution));
        }
        return Ok(());
    }

    println!("No up-to-date list cached; a refresh was scheduled.");
    let distributions = ctx
        .cache
        .installed_distributions_async()
        .await
        .map_err(CliError::from)?;
    println!("Refreshed ({} installed):", distributions.len());
    for distribution in distributions.iter() {
        println!("{}", format_distribution_row(distribution));
    }
    Ok(())
}
