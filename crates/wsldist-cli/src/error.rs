//! CLI-specific error types and mappings.
//!
//! Maps core errors to exit codes and user-facing messages.

use thiserror::Error;
use wsldist_core::{DistributionError, ListingError, SettingsError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A WSL tool could not be run.
    #[error("Process error: {0}")]
    Process(String),

    /// A WSL tool printed something we could not read.
    #[error("Unexpected tool output: {0}")]
    Data(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Data(_) => 65,     // EX_DATAERR
            Self::Process(_) => 71,  // EX_OSERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<ListingError> for CliError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Execution { .. } => Self::Process(err.to_string()),
            ListingError::Parse { .. } => Self::Data(err.to_string()),
        }
    }
}

impl From<DistributionError> for CliError {
    fn from(err: DistributionError) -> Self {
        match err {
            DistributionError::InvalidArgument(msg) => Self::Arguments(msg),
            DistributionError::Listing(listing) => listing.into(),
            DistributionError::Background(msg) => Self::Core(msg),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_errors_map_to_exit_codes() {
        let invalid: CliError = DistributionError::InvalidArgument("WSL msId is empty".into()).into();
        assert_eq!(invalid.exit_code(), 2);

        let exec: CliError =
            DistributionError::Listing(ListingError::execution("wsl.exe --list --quiet", "not found"))
                .into();
        assert_eq!(exec.exit_code(), 71);

        let parse: CliError = ListingError::parse("wsl.exe --list --verbose", "bad header").into();
        assert_eq!(parse.exit_code(), 65);
        assert!(parse.to_string().contains("bad header"));
    }

    #[test]
    fn test_settings_error_is_config() {
        let err: CliError = SettingsError::ZeroThreshold.into();
        assert_eq!(err.exit_code(), 78);
    }
}
