use manifold_types::{ValidationLevel, ValidationResult, W3cManifest};

/// A unit of platform policy over a canonical manifest.
///
/// Rules are independent of each other and emit zero or more findings per evaluation.
pub trait ValidationRule: Send + Sync {
    /// Stable kebab-case identifier.
    fn id(&self) -> &str;

    fn summary(&self) -> &str;

    /// Level of the findings this rule emits.
    fn level(&self) -> ValidationLevel;

    fn evaluate(&self, platform: &str, manifest: &W3cManifest) -> Vec<ValidationResult>;
}
