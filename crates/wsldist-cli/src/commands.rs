//! Subcommands.

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List installed distributions with their WSL version
    List {
        /// Refresh on the background pool instead of the calling thread
        #[arg(long = "async")]
        background: bool,
    },

    /// Show the cached list without waiting for a refresh
    Cached,

    /// Show details of one distribution, including network addresses
    Info {
        /// Distribution name as printed by `wsl.exe -l`
        name: String,
    },

    /// Check whether a path is on the WSL network share (exit code 1 if not)
    IsWslPath {
        /// Windows path, `\` or `/` separated
        path: String,
    },

    /// Print the effective settings as JSON
    Settings,
}
