//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No process or registry details in any signature
//! - Listing errors distinguish "could not run" from "could not understand"
//! - Every port is `Send + Sync` so it can sit behind an `Arc` in the cache

pub mod change_counter;
pub mod distribution_lister;
pub mod network_probe;

use thiserror::Error;

pub use change_counter::ChangeCounter;
pub use distribution_lister::{DistributionLister, HostProfile, ToolFlags};
pub use network_probe::NetworkProbe;

#[cfg(test)]
pub use distribution_lister::MockDistributionLister;

/// Failure of an external listing or probing command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListingError {
    /// The command could not be started or exited abnormally.
    #[error("Failed to execute `{command}`: {reason}")]
    Execution { command: String, reason: String },

    /// The command ran but its output did not have the expected shape.
    #[error("Unexpected output from `{command}`: {reason}")]
    Parse { command: String, reason: String },
}

impl ListingError {
    pub fn execution(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Execution {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Errors surfaced by the distribution cache.
#[derive(Debug, Error)]
pub enum DistributionError {
    /// Invalid input, such as an empty distribution name.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The last listing strategy in the fallback chain failed.
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// The background refresh task panicked or was cancelled.
    #[error("Background refresh failed: {0}")]
    Background(String),
}
