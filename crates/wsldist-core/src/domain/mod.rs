//! Domain types for WSL distributions.
//!
//! Pure data and string logic only. Anything that needs to run a process
//! goes through a port.

mod distribution;
mod wsl_path;

pub use distribution::{Distribution, DistributionAndVersion, DistributionState};
pub use wsl_path::{UNC_PREFIX, WslPath, is_wsl_path, parse_wsl_path};
