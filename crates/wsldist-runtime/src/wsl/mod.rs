//! `wsl.exe` adapter.
//!
//! [`WslCli`] implements the core listing and network ports by running the
//! Windows WSL tools. On hosts without them every call fails with an
//! execution error, which the cache treats like any other listing failure.

mod decode;
mod parse;

use std::net::Ipv4Addr;
use std::sync::OnceLock;

use tracing::debug;
use wsldist_core::domain::DistributionAndVersion;
use wsldist_core::ports::{DistributionLister, HostProfile, ListingError, NetworkProbe, ToolFlags};
use wsldist_core::settings::Settings;

use crate::command::{capture_output, describe, run_command, run_command_accepting};
pub use decode::decode_output;
pub use parse::{
    is_no_distributions_banner, parse_default_gateway, parse_first_ipv4, parse_legacy_list, parse_quiet_list,
    parse_release_id, parse_tool_flags, parse_verbose_list,
};

const REG_EXECUTABLE: &str = "reg";
const CURRENT_VERSION_KEY: &str = r"HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion";

/// Lists and probes distributions through `wsl.exe` and `wslconfig.exe`.
#[derive(Debug)]
pub struct WslCli {
    wsl_executable: String,
    wslconfig_executable: String,
    profile: OnceLock<HostProfile>,
}

impl WslCli {
    /// Use the executables configured in `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self::with_executables(
            settings.effective_wsl_executable(),
            settings.effective_wslconfig_executable(),
        )
    }

    pub fn with_executables(wsl: impl Into<String>, wslconfig: impl Into<String>) -> Self {
        Self {
            wsl_executable: wsl.into(),
            wslconfig_executable: wslconfig.into(),
            profile: OnceLock::new(),
        }
    }

    pub fn wsl_executable(&self) -> &str {
        &self.wsl_executable
    }

    /// Run a WSL tool and parse its output.
    ///
    /// Newer `wsl.exe` builds exit non-zero when nothing is installed; that
    /// banner still reaches the parser, which reads it as an empty list.
    fn run_parsed<T>(
        &self,
        program: &str,
        args: &[&str],
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Result<T, ListingError> {
        let output = run_command_accepting(program, args, is_no_distributions_banner)?;
        parse(&output).map_err(|reason| ListingError::parse(describe(program, args), reason))
    }

    fn probe_release_id() -> Option<u32> {
        if !cfg!(windows) {
            return None;
        }
        match run_command(
            REG_EXECUTABLE,
            &["query", CURRENT_VERSION_KEY, "/v", "ReleaseId"],
        ) {
            Ok(output) => parse_release_id(&output),
            Err(e) => {
                debug!(error = %e, "Windows release id unavailable");
                None
            }
        }
    }

    fn probe_tool_flags(&self) -> Option<ToolFlags> {
        match capture_output(&self.wsl_executable, &["--help"]) {
            Ok(help) => Some(parse_tool_flags(&help)),
            Err(e) => {
                debug!(error = %e, "wsl.exe help unavailable");
                None
            }
        }
    }

    fn distribution_args(ms_id: &str, command: &[&str]) -> Vec<String> {
        ["-d", ms_id, "-e"]
            .iter()
            .chain(command)
            .map(ToString::to_string)
            .collect()
    }

    fn run_in_distribution<T>(
        &self,
        ms_id: &str,
        command: &[&str],
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Result<T, ListingError> {
        let args = Self::distribution_args(ms_id, command);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_parsed(&self.wsl_executable, &args, parse)
    }
}

impl DistributionLister for WslCli {
    fn host_profile(&self) -> HostProfile {
        *self.profile.get_or_init(|| {
            let profile = HostProfile {
                release_id: Self::probe_release_id(),
                tool_flags: self.probe_tool_flags(),
            };
            debug!(?profile, "Probed WSL host");
            profile
        })
    }

    fn list_with_versions(&self) -> Result<Vec<DistributionAndVersion>, ListingError> {
        self.run_parsed(
            &self.wsl_executable,
            &["--list", "--verbose"],
            parse_verbose_list,
        )
    }

    fn list_names(&self) -> Result<Vec<String>, ListingError> {
        self.run_parsed(&self.wsl_executable, &["--list", "--quiet"], parse_quiet_list)
    }

    fn list_legacy(&self) -> Result<Vec<String>, ListingError> {
        self.run_parsed(&self.wslconfig_executable, &["/list"], parse_legacy_list)
    }
}

impl NetworkProbe for WslCli {
    fn wsl_ip(&self, ms_id: &str) -> Result<Ipv4Addr, ListingError> {
        self.run_in_distribution(ms_id, &["hostname", "-I"], parse_first_ipv4)
    }

    fn host_ip(&self, ms_id: &str) -> Result<Ipv4Addr, ListingError> {
        self.run_in_distribution(
            ms_id,
            &["ip", "route", "show", "default"],
            parse_default_gateway,
        )
    }
}
