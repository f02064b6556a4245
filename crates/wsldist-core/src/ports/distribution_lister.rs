//! Distribution listing port.
//!
//! Implementations run the platform's listing tool. The cache decides which
//! of the three listing methods to call based on [`HostProfile`] and settings.

use serde::{Deserialize, Serialize};

use super::ListingError;
use crate::domain::DistributionAndVersion;

/// Flags the installed `wsl.exe` advertises in its help text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolFlags {
    pub verbose: bool,
    pub quiet: bool,
}

impl ToolFlags {
    pub const fn any(&self) -> bool {
        self.verbose || self.quiet
    }
}

/// What is known about the host that affects how distributions are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostProfile {
    /// Windows release id (e.g. 1909, 2004); `None` if it could not be read.
    pub release_id: Option<u32>,
    /// `None` if the tool could not be queried.
    pub tool_flags: Option<ToolFlags>,
}

/// Lists installed distributions.
#[cfg_attr(test, mockall::automock)]
pub trait DistributionLister: Send + Sync {
    /// Probe the host. Implementations should memoize this.
    fn host_profile(&self) -> HostProfile;

    /// Names and versions in one call (`wsl.exe --list --verbose`).
    fn list_with_versions(&self) -> Result<Vec<DistributionAndVersion>, ListingError>;

    /// Names only (`wsl.exe --list --quiet`).
    fn list_names(&self) -> Result<Vec<String>, ListingError>;

    /// Names through the pre-2004 tooling.
    fn list_legacy(&self) -> Result<Vec<String>, ListingError>;
}
