//! Target platforms a generate run can produce manifests for.

use manifold_types::FormatId;

/// One generate target: the rule set it is validated against and the format it converts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTarget {
    /// Platform id; also the rule set key and the output sub-directory.
    pub id: &'static str,
    pub display_name: &'static str,
    format: &'static str,
    /// File name of the generated manifest inside the platform directory.
    pub manifest_file: &'static str,
}

impl PlatformTarget {
    pub fn format(&self) -> FormatId {
        FormatId::new(self.format)
    }
}

const PLATFORMS: &[PlatformTarget] = &[
    PlatformTarget {
        id: "web",
        display_name: "Web",
        format: "w3c",
        manifest_file: "manifest.json",
    },
    PlatformTarget {
        id: "windows10",
        display_name: "Windows 10",
        format: "windows10",
        manifest_file: "appxmanifest.xml",
    },
    PlatformTarget {
        id: "chrome",
        display_name: "Chrome",
        format: "chromeos",
        manifest_file: "manifest.json",
    },
    PlatformTarget {
        id: "firefox",
        display_name: "Firefox",
        format: "firefox",
        manifest_file: "manifest.webapp",
    },
    PlatformTarget {
        id: "android",
        display_name: "Android",
        format: "w3c",
        manifest_file: "manifest.json",
    },
    PlatformTarget {
        id: "ios",
        display_name: "iOS",
        format: "w3c",
        manifest_file: "manifest.json",
    },
];

pub fn all_platforms() -> &'static [PlatformTarget] {
    PLATFORMS
}

pub fn all_platform_ids() -> Vec<String> {
    PLATFORMS.iter().map(|p| p.id.to_string()).collect()
}

/// Case-insensitive lookup.
pub fn lookup(id: &str) -> Option<&'static PlatformTarget> {
    let id = id.trim();
    PLATFORMS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// True when every id names a known platform.
pub fn platforms_valid<S: AsRef<str>>(platforms: &[S]) -> bool {
    platforms.iter().all(|p| lookup(p.as_ref()).is_some())
}

/// Split a user-supplied list on whitespace and commas, lowercasing each id.
pub fn parse_platform_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}
