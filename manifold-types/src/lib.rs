//! Shared DTOs (schemas-as-code) for the manifold workspace.
//!
//! # Design constraints
//! - Manifest content travels as a loosely-typed JSON object until a format has been confirmed.
//! - The canonical (W3C) manifest has a strongly-typed record in [`w3c`].
//! - Report types are serialized to disk; prefer adding optional fields over changing semantics.

pub mod format;
pub mod manifest;
pub mod report;
pub mod validation;
pub mod w3c;

pub use format::FormatId;
pub use manifest::{ManifestContent, ManifestInfo};
pub use validation::{ValidationLevel, ValidationResult, ValidationSummary};
pub use w3c::{UrlAccess, W3cIcon, W3cManifest};

/// Schema identifiers.
pub mod schema {
    pub const MANIFOLD_REPORT_V1: &str = "manifold.report.v1";
}
