//! Windows-side UNC paths into WSL distributions.
//!
//! These are plain string predicates. Both `\` and `/` separators are
//! accepted since paths reach us from either convention.

/// Prefix of every path served by the WSL network share.
pub const UNC_PREFIX: &str = r"\\wsl$\";

/// A `\\wsl$\<distribution>\<rest>` path split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WslPath {
    pub distribution: String,
    /// Linux-side path, always absolute with `/` separators.
    pub linux_path: String,
}

fn normalize_separators(path: &str) -> String {
    path.replace('/', "\\")
}

fn strip_unc_prefix(path: &str) -> Option<&str> {
    let head = path.get(..UNC_PREFIX.len())?;
    head.eq_ignore_ascii_case(UNC_PREFIX)
        .then(|| &path[UNC_PREFIX.len()..])
}

/// Whether `path` lives on the WSL network share.
pub fn is_wsl_path(path: &str) -> bool {
    strip_unc_prefix(&normalize_separators(path)).is_some()
}

/// Split a WSL UNC path into distribution name and Linux path.
///
/// Returns `None` for non-WSL paths and for the bare `\\wsl$\` root.
pub fn parse_wsl_path(path: &str) -> Option<WslPath> {
    let normalized = normalize_separators(path);
    let rest = strip_unc_prefix(&normalized)?;
    let (distribution, tail) = rest.split_once('\\').unwrap_or((rest, ""));
    if distribution.is_empty() {
        return None;
    }

    let segments: Vec<&str> = tail.split('\\').filter(|s| !s.is_empty()).collect();
    Some(WslPath {
        distribution: distribution.to_string(),
        linux_path: format!("/{}", segments.join("/")),
    })
}
