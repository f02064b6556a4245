//! The WSL distribution entity and the rows produced by listing it.

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use super::wsl_path::UNC_PREFIX;
use crate::ports::{ListingError, NetworkProbe};

/// A WSL distribution identified by its `msId` (the name `wsl.exe -l` prints).
///
/// Instances are handed out as `Arc<Distribution>` by the registry so that
/// derived values such as network addresses are computed once per name.
/// The version slot is refreshed whenever a verbose listing runs.
#[derive(Debug)]
pub struct Distribution {
    ms_id: String,
    /// 0 means "not known yet".
    version: AtomicU8,
    wsl_ip: OnceLock<Ipv4Addr>,
    host_ip: OnceLock<Ipv4Addr>,
}

impl Distribution {
    /// Create a distribution with no version information.
    pub fn new(ms_id: impl Into<String>) -> Self {
        Self {
            ms_id: ms_id.into(),
            version: AtomicU8::new(0),
            wsl_ip: OnceLock::new(),
            host_ip: OnceLock::new(),
        }
    }

    /// Distribution name, in the case it was last registered with.
    pub fn ms_id(&self) -> &str {
        &self.ms_id
    }

    /// WSL version (1 or 2) if a verbose listing has reported it.
    pub fn version(&self) -> Option<u8> {
        match self.version.load(Ordering::Acquire) {
            0 => None,
            v => Some(v),
        }
    }

    pub fn set_version(&self, version: u8) {
        self.version.store(version, Ordering::Release);
    }

    /// `\\wsl$\<msId>`, the Windows-side root of the distribution's filesystem.
    pub fn unc_root(&self) -> String {
        format!("{UNC_PREFIX}{}", self.ms_id)
    }

    /// IPv4 address of the distribution itself.
    ///
    /// Resolved through `probe` on first successful call and reused after
    /// that. A failed lookup is not remembered, so the next call retries.
    pub fn wsl_ip(&self, probe: &dyn NetworkProbe) -> Result<Ipv4Addr, ListingError> {
        if let Some(ip) = self.wsl_ip.get() {
            return Ok(*ip);
        }
        let resolved = probe.wsl_ip(&self.ms_id)?;
        Ok(*self.wsl_ip.get_or_init(|| resolved))
    }

    /// IPv4 address of the Windows host as seen from inside the distribution.
    pub fn host_ip(&self, probe: &dyn NetworkProbe) -> Result<Ipv4Addr, ListingError> {
        if let Some(ip) = self.host_ip.get() {
            return Ok(*ip);
        }
        let resolved = probe.host_ip(&self.ms_id)?;
        Ok(*self.host_ip.get_or_init(|| resolved))
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ms_id)
    }
}

/// Run state column of `wsl.exe --list --verbose`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionState {
    Running,
    Stopped,
    Installing,
    Uninstalling,
    Converting,
    /// Anything else, including localized state names.
    Other(String),
}

impl DistributionState {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "running" => Self::Running,
            "stopped" => Self::Stopped,
            "installing" => Self::Installing,
            "uninstalling" => Self::Uninstalling,
            "converting" => Self::Converting,
            _ => Self::Other(raw.to_string()),
        }
    }
}

impl fmt::Display for DistributionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("Running"),
            Self::Stopped => f.write_str("Stopped"),
            Self::Installing => f.write_str("Installing"),
            Self::Uninstalling => f.write_str("Uninstalling"),
            Self::Converting => f.write_str("Converting"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// One row of a verbose listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionAndVersion {
    pub name: String,
    pub state: DistributionState,
    pub version: u8,
    /// Row was marked with `*` (the default distribution).
    pub is_default: bool,
}

impl DistributionAndVersion {
    pub fn new(name: impl Into<String>, state: DistributionState, version: u8) -> Self {
        Self {
            name: name.into(),
            state,
            version,
            is_default: false,
        }
    }

    #[must_use]
    pub const fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}
