use crate::rule::ValidationRule;
use manifold_types::validation::{codes, members};
use manifold_types::{ValidationLevel, ValidationResult, W3cManifest};
use serde_json::json;

/// Chrome truncates app names longer than this in the launcher.
const MAX_NAME_CHARS: usize = 45;

pub struct NameLength;

impl ValidationRule for NameLength {
    fn id(&self) -> &str {
        "chrome-name-length"
    }

    fn summary(&self) -> &str {
        "The app name should be at most 45 characters for Chrome"
    }

    fn level(&self) -> ValidationLevel {
        ValidationLevel::Warning
    }

    fn evaluate(&self, platform: &str, manifest: &W3cManifest) -> Vec<ValidationResult> {
        let Some(name) = manifest.display_name() else {
            return vec![];
        };
        let length = name.chars().count();
        if length <= MAX_NAME_CHARS {
            return vec![];
        }
        vec![ValidationResult {
            level: self.level(),
            platform: platform.to_string(),
            member: members::NAME.to_string(),
            code: codes::VALUE_TOO_LONG.to_string(),
            description: self.summary().to_string(),
            data: Some(json!({ "length": length, "max": MAX_NAME_CHARS })),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_names_warn() {
        let mut m = W3cManifest {
            name: Some("x".repeat(45)),
            ..W3cManifest::default()
        };
        assert!(NameLength.evaluate("chrome", &m).is_empty());
        m.name = Some("é".repeat(46));
        let findings = NameLength.evaluate("chrome", &m);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, "value-too-long");
    }
}
