//! Platform family detection.
//!
//! The engine only distinguishes Mac-family hosts from everything else:
//! the distinction drives both primary-modifier matching (Cmd vs Ctrl) and
//! label formatting (`⌘K` vs `Ctrl+K`).

use std::sync::OnceLock;

use regex::Regex;

/// Mac-family platform identifiers as they appear in navigator-style
/// platform strings ("MacIntel", "iPhone", ...).
const MAC_FAMILY_PATTERN: &str = "Mac|iPod|iPhone|iPad";

fn mac_family_regex() -> &'static Regex {
    static MAC_FAMILY: OnceLock<Regex> = OnceLock::new();
    MAC_FAMILY.get_or_init(|| {
        Regex::new(MAC_FAMILY_PATTERN).expect("platform pattern is a valid regex")
    })
}

/// Platform classification, computed once and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub is_mac: bool,
}

impl Platform {
    /// Classify a navigator-style platform string.
    ///
    /// Absent platform information defaults to non-Mac. There are no error
    /// conditions: any unrecognized string is simply non-Mac.
    pub fn from_platform_string(platform: Option<&str>) -> Self {
        let is_mac = platform
            .map(|p| mac_family_regex().is_match(p))
            .unwrap_or(false);
        Self { is_mac }
    }

    /// The host platform, computed once per process lifetime.
    pub fn host() -> Self {
        static HOST: OnceLock<Platform> = OnceLock::new();
        *HOST.get_or_init(|| Platform {
            is_mac: matches!(std::env::consts::OS, "macos" | "ios"),
        })
    }

    /// A Mac-family platform. Handy for tests and embedders that resolve
    /// the platform themselves.
    pub const fn mac() -> Self {
        Self { is_mac: true }
    }

    /// A non-Mac platform.
    pub const fn other() -> Self {
        Self { is_mac: false }
    }
}
