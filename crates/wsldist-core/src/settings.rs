//! Settings domain types and validation.
//!
//! Settings are read from `WSLDIST_*` environment variables. Adapters load a
//! `.env` file first if they want file-based overrides.

use serde::{Deserialize, Serialize};

/// Windows releases below this one may ship a `wsl.exe` without list flags.
pub const DEFAULT_LEGACY_RELEASE_THRESHOLD: u32 = 2004;

pub const DEFAULT_WSL_EXECUTABLE: &str = "wsl.exe";
pub const DEFAULT_WSLCONFIG_EXECUTABLE: &str = "wslconfig.exe";

const ENV_PREFER_VERBOSE: &str = "WSLDIST_PREFER_VERBOSE_LISTING";
const ENV_LEGACY_THRESHOLD: &str = "WSLDIST_LEGACY_RELEASE_THRESHOLD";
const ENV_WSL_EXE: &str = "WSLDIST_WSL_EXE";
const ENV_WSLCONFIG_EXE: &str = "WSLDIST_WSLCONFIG_EXE";

/// Distribution cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Try `wsl.exe --list --verbose` before the names-only listing.
    pub prefer_verbose_listing: bool,

    /// Hosts with a release id below this value and a `wsl.exe` lacking both
    /// `--verbose` and `--quiet` use the legacy listing. `None` disables the check.
    pub legacy_release_threshold: Option<u32>,

    /// Override for the `wsl.exe` executable.
    pub wsl_executable: Option<String>,

    /// Override for the `wslconfig.exe` executable.
    pub wslconfig_executable: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            prefer_verbose_listing: true,
            legacy_release_threshold: Some(DEFAULT_LEGACY_RELEASE_THRESHOLD),
            wsl_executable: None,
            wslconfig_executable: None,
        }
    }

    /// Get the effective `wsl.exe` (with default fallback).
    pub fn effective_wsl_executable(&self) -> &str {
        self.wsl_executable
            .as_deref()
            .unwrap_or(DEFAULT_WSL_EXECUTABLE)
    }

    /// Get the effective `wslconfig.exe` (with default fallback).
    pub fn effective_wslconfig_executable(&self) -> &str {
        self.wslconfig_executable
            .as_deref()
            .unwrap_or(DEFAULT_WSLCONFIG_EXECUTABLE)
    }

    /// Build settings from `(key, value)` pairs, ignoring unrelated keys.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Self::with_defaults();
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            match key {
                ENV_PREFER_VERBOSE => {
                    settings.prefer_verbose_listing = parse_bool(key, value)?;
                }
                ENV_LEGACY_THRESHOLD => {
                    settings.legacy_release_threshold = parse_threshold(key, value)?;
                }
                ENV_WSL_EXE => settings.wsl_executable = Some(value.to_string()),
                ENV_WSLCONFIG_EXE => settings.wslconfig_executable = Some(value.to_string()),
                _ => {}
            }
        }
        validate_settings(&settings)?;
        Ok(settings)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_threshold(key: &str, value: &str) -> Result<Option<u32>, SettingsError> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Legacy release threshold must be positive")]
    ZeroThreshold,

    #[error("{0} executable cannot be empty")]
    EmptyExecutable(&'static str),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.legacy_release_threshold == Some(0) {
        return Err(SettingsError::ZeroThreshold);
    }

    if settings
        .wsl_executable
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyExecutable("wsl"));
    }

    if settings
        .wslconfig_executable
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyExecutable("wslconfig"));
    }

    Ok(())
}
