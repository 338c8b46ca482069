use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a manifest schema (e.g. `w3c`, `chromeos`).
///
/// Identifiers are opaque tokens compared case-insensitively; the stored form is always
/// trimmed and lowercase, so `FormatId::new("ChromeOS") == FormatId::new("chromeos")`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FormatId(String);

impl FormatId {
    /// Canonical base format every conversion goes through.
    pub const W3C: &'static str = "w3c";
    pub const CHROMEOS: &'static str = "chromeos";
    pub const FIREFOX: &'static str = "firefox";
    pub const WINDOWS10: &'static str = "windows10";

    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_ascii_lowercase())
    }

    pub fn base() -> Self {
        Self(Self::W3C.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_base(&self) -> bool {
        self.0 == Self::W3C
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormatId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FormatId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<FormatId> for String {
    fn from(id: FormatId) -> Self {
        id.0
    }
}

impl PartialEq<str> for FormatId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.trim().to_ascii_lowercase()
    }
}

impl PartialEq<&str> for FormatId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
