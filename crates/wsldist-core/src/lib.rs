//! Core domain types and port definitions for wsldist.
//!
//! This crate owns the [`DistributionCache`](services::DistributionCache)
//! and the traits it needs from the outside world. It never spawns processes
//! itself; `wsldist-runtime` provides the `wsl.exe` backed implementations.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    Distribution, DistributionAndVersion, DistributionState, UNC_PREFIX, WslPath, is_wsl_path,
    parse_wsl_path,
};
pub use ports::{
    ChangeCounter, DistributionError, DistributionLister, HostProfile, ListingError,
    NetworkProbe, ToolFlags,
};
pub use services::{
    DistributionCache, DistributionList, DistributionRegistry, ListingMode, select_listing_mode,
};
pub use settings::{
    DEFAULT_LEGACY_RELEASE_THRESHOLD, DEFAULT_WSL_EXECUTABLE, DEFAULT_WSLCONFIG_EXECUTABLE,
    Settings, SettingsError, validate_settings,
};

