//! CLI adapter for wsldist.
//!
//! `main.rs` parses arguments, calls [`bootstrap`] and dispatches to the
//! handlers. Everything else lives here so it can be tested.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used only by the binary target
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap, load_settings};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
