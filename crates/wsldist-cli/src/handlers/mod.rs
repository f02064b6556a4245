//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<...>`
//! - Thin wrappers that:
//!   1. Validate CLI-specific input
//!   2. Call the cache (blocking calls go through `spawn_blocking`)
//!   3. Format output for the terminal

pub mod cached;
pub mod info;
pub mod is_wsl_path;
pub mod list;
pub mod settings;

use wsldist_core::Distribution;

/// One line of distribution output: name and WSL version.
pub fn format_distribution_row(distribution: &Distribution) -> String {
    let version = distribution
        .version()
        .map_or_else(|| "-".to_string(), |v| format!("WSL{v}"));
    format!("{:<28} {version}", distribution.ms_id())
}
