//! Process runtime and OS-level concerns for wsldist.
//!
//! Provides the `wsl.exe` backed implementations of the core ports and the
//! change tracker the cache is invalidated by.
#![deny(unsafe_code)]

mod changes;
mod command;
pub mod wsl;

pub use changes::ExternalChangesTracker;
pub use wsl::{WslCli, decode_output};
