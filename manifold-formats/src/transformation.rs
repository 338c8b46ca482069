use crate::error::ConvertError;
use manifold_types::{FormatId, ManifestContent, ManifestInfo};
use std::fmt;

/// Which half of a transformation is being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    ToBase,
    FromBase,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::ToBase => "to-base",
            Direction::FromBase => "from-base",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair of converters associated with one format identifier.
///
/// Implementations are pure data transformations. The default direction methods fail with
/// [`ConvertError::DirectionNotImplemented`]; formats that support a direction override both the
/// method and [`Transformation::supports`].
pub trait Transformation: Send + Sync {
    fn format(&self) -> FormatId;

    /// One-line description for listings.
    fn summary(&self) -> &'static str;

    /// Structural predicate: required members present, no member outside the allowed set.
    fn matches(&self, content: &ManifestContent) -> bool;

    fn supports(&self, direction: Direction) -> bool;

    fn to_base(&self, info: &ManifestInfo) -> Result<ManifestInfo, ConvertError> {
        let _ = info;
        Err(ConvertError::DirectionNotImplemented {
            format: self.format(),
            direction: Direction::ToBase,
        })
    }

    fn from_base(&self, info: &ManifestInfo) -> Result<ManifestInfo, ConvertError> {
        let _ = info;
        Err(ConvertError::DirectionNotImplemented {
            format: self.format(),
            direction: Direction::FromBase,
        })
    }
}
