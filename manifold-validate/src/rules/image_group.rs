use crate::rule::ValidationRule;
use manifold_types::validation::{codes, members};
use manifold_types::{ValidationLevel, ValidationResult, W3cManifest};
use serde_json::json;

/// Requires at least one icon declaring any of `sizes`.
///
/// Emits at most one finding per evaluation, no matter how many sizes are missing.
#[derive(Debug, Clone)]
pub struct ImageGroupRule {
    id: &'static str,
    description: String,
    sizes: &'static [&'static str],
    level: ValidationLevel,
}

impl ImageGroupRule {
    pub fn new(
        id: &'static str,
        subject: &str,
        sizes: &'static [&'static str],
        level: ValidationLevel,
    ) -> Self {
        Self {
            id,
            description: format!(
                "{subject} of any of the following sizes is required: {}",
                sizes.join(", ")
            ),
            sizes,
            level,
        }
    }
}

impl ValidationRule for ImageGroupRule {
    fn id(&self) -> &str {
        self.id
    }

    fn summary(&self) -> &str {
        &self.description
    }

    fn level(&self) -> ValidationLevel {
        self.level
    }

    fn evaluate(&self, platform: &str, manifest: &W3cManifest) -> Vec<ValidationResult> {
        if self.sizes.iter().any(|size| manifest.has_icon_size(size)) {
            return vec![];
        }
        vec![ValidationResult {
            level: self.level,
            platform: platform.to_string(),
            member: members::ICONS.to_string(),
            code: codes::MISSING_IMAGE_GROUP.to_string(),
            description: self.description.clone(),
            data: Some(json!({ "sizes": self.sizes })),
        }]
    }
}
