//! Choice of listing strategy.

use crate::ports::HostProfile;
use crate::settings::Settings;

/// Which listing call the cache starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    /// Names and versions; falls back to [`ListingMode::Quiet`] on failure.
    Verbose,
    /// Names only.
    Quiet,
    /// Names through the old tooling, for hosts whose `wsl.exe` has no list flags.
    Legacy,
}

/// Pick the listing mode for a host.
///
/// The release threshold comes from settings rather than being baked in, so
/// hosts with unusual tool versions can opt out of the legacy path.
pub fn select_listing_mode(settings: &Settings, profile: &HostProfile) -> ListingMode {
    if let (Some(threshold), Some(release_id)) =
        (settings.legacy_release_threshold, profile.release_id)
    {
        if release_id > 0 && release_id < threshold && !profile.tool_flags.is_some_and(|f| f.any())
        {
            return ListingMode::Legacy;
        }
    }

    if settings.prefer_verbose_listing {
        ListingMode::Verbose
    } else {
        ListingMode::Quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ToolFlags;

    const fn profile(release_id: Option<u32>, tool_flags: Option<ToolFlags>) -> HostProfile {
        HostProfile {
            release_id,
            tool_flags,
        }
    }

    #[test]
    fn test_modern_host_prefers_verbose() {
        let settings = Settings::default();
        let flags = ToolFlags {
            verbose: true,
            quiet: true,
        };
        assert_eq!(
            select_listing_mode(&settings, &profile(Some(2009), Some(flags))),
            ListingMode::Verbose
        );
    }

    #[test]
    fn test_old_host_without_flags_uses_legacy() {
        let settings = Settings::default();
        assert_eq!(
            select_listing_mode(&settings, &profile(Some(1809), None)),
            ListingMode::Legacy
        );
        assert_eq!(
            select_listing_mode(&settings, &profile(Some(1809), Some(ToolFlags::default()))),
            ListingMode::Legacy
        );
    }

    #[test]
    fn test_old_host_with_quiet_flag_skips_legacy() {
        let settings = Settings::default();
        let flags = ToolFlags {
            verbose: false,
            quiet: true,
        };
        assert_eq!(
            select_listing_mode(&settings, &profile(Some(1903), Some(flags))),
            ListingMode::Verbose
        );
    }

    #[test]
    fn test_unknown_release_never_uses_legacy() {
        let settings = Settings::default();
        assert_eq!(
            select_listing_mode(&settings, &profile(None, None)),
            ListingMode::Verbose
        );
    }

    #[test]
    fn test_disabled_threshold_and_quiet_preference() {
        let settings = Settings {
            prefer_verbose_listing: false,
            legacy_release_threshold: None,
            ..Settings::default()
        };
        assert_eq!(
            select_listing_mode(&settings, &profile(Some(1809), None)),
            ListingMode::Quiet
        );
    }
}
