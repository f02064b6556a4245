//! Parsers for WSL tool output.
//!
//! Each parser returns a plain reason string on failure; the caller attaches
//! the command line when turning it into a `ListingError::Parse`.

use std::net::Ipv4Addr;

use wsldist_core::domain::{DistributionAndVersion, DistributionState};
use wsldist_core::ports::ToolFlags;

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Whether the output opens with the banner the WSL tools print when WSL is
/// enabled but nothing is installed, e.g.
/// `Windows Subsystem for Linux has no installed distributions.`
pub fn is_no_distributions_banner(text: &str) -> bool {
    non_empty_lines(text).next().is_some_and(|line| {
        line.to_ascii_lowercase()
            .contains("no installed distributions")
    })
}

/// Parse `wsl.exe --list --verbose`.
///
/// ```text
///   NAME            STATE           VERSION
/// * Ubuntu          Running         2
///   Debian          Stopped         1
/// ```
pub fn parse_verbose_list(text: &str) -> Result<Vec<DistributionAndVersion>, String> {
    if is_no_distributions_banner(text) {
        return Ok(Vec::new());
    }
    let mut lines = non_empty_lines(text);
    let header = lines.next().ok_or_else(|| "empty output".to_string())?;
    if header.split_whitespace().count() != 3 {
        return Err(format!("unexpected header {header:?}"));
    }
    lines.map(parse_verbose_row).collect()
}

fn parse_verbose_row(line: &str) -> Result<DistributionAndVersion, String> {
    let (is_default, row) = match line.strip_prefix('*') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, line),
    };

    let columns: Vec<&str> = row.split_whitespace().collect();
    let [name @ .., state, version] = columns.as_slice() else {
        return Err(format!("expected name, state and version in {line:?}"));
    };
    if name.is_empty() {
        return Err(format!("missing distribution name in {line:?}"));
    }

    let version = version
        .parse::<u8>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| format!("invalid version {version:?} in {line:?}"))?;

    let mut entry = DistributionAndVersion::new(name.join(" "), DistributionState::parse(state), version);
    entry.is_default = is_default;
    Ok(entry)
}

/// Parse `wsl.exe --list --quiet`: one name per line.
pub fn parse_quiet_list(text: &str) -> Result<Vec<String>, String> {
    if is_no_distributions_banner(text) {
        return Ok(Vec::new());
    }
    non_empty_lines(text)
        .map(|line| {
            if line.split_whitespace().count() == 1 {
                Ok(line.to_string())
            } else {
                Err(format!("unexpected line {line:?}"))
            }
        })
        .collect()
}

/// Parse `wslconfig.exe /list`.
///
/// The first line is a banner ending in `:`; the default distribution carries
/// a `(Default)` suffix.
pub fn parse_legacy_list(text: &str) -> Result<Vec<String>, String> {
    if is_no_distributions_banner(text) {
        return Ok(Vec::new());
    }
    let mut lines = non_empty_lines(text);
    let Some(banner) = lines.next() else {
        return Ok(Vec::new());
    };
    if !banner.ends_with(':') {
        return Err(format!("unexpected banner {banner:?}"));
    }

    Ok(lines
        .map(|line| {
            line.strip_suffix("(Default)")
                .map_or(line, str::trim_end)
                .to_string()
        })
        .filter(|name| !name.is_empty())
        .collect())
}

/// Extract `ReleaseId` from `reg query ... /v ReleaseId`.
///
/// ```text
/// HKEY_LOCAL_MACHINE\SOFTWARE\Microsoft\Windows NT\CurrentVersion
///     ReleaseId    REG_SZ    2004
/// ```
pub fn parse_release_id(text: &str) -> Option<u32> {
    non_empty_lines(text)
        .filter(|line| line.starts_with("ReleaseId"))
        .find_map(|line| line.split_whitespace().last()?.parse().ok())
}

/// Which list flags `wsl.exe --help` mentions.
pub fn parse_tool_flags(help: &str) -> ToolFlags {
    ToolFlags {
        verbose: help.contains("--verbose"),
        quiet: help.contains("--quiet"),
    }
}

/// First IPv4 address in `hostname -I` output.
pub fn parse_first_ipv4(text: &str) -> Result<Ipv4Addr, String> {
    text.split_whitespace()
        .find_map(|token| token.parse().ok())
        .ok_or_else(|| format!("no IPv4 address in {:?}", text.trim()))
}

/// Gateway from `ip route show default` (`default via <ip> dev eth0 ...`).
pub fn parse_default_gateway(text: &str) -> Result<Ipv4Addr, String> {
    non_empty_lines(text)
        .filter(|line| line.starts_with("default"))
        .find_map(|line| {
            let mut tokens = line.split_whitespace();
            tokens.find(|t| *t == "via")?;
            tokens.next()?.parse().ok()
        })
        .ok_or_else(|| format!("no default route in {:?}", text.trim()))
}
