use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a validation finding, ordered by increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationLevel {
    Suggestion,
    Warning,
    Error,
}

impl ValidationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationLevel::Suggestion => "suggestion",
            ValidationLevel::Warning => "warning",
            ValidationLevel::Error => "error",
        }
    }

    /// Only `error` makes a manifest invalid.
    pub fn is_blocking(self) -> bool {
        matches!(self, ValidationLevel::Error)
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known manifest member names referenced by findings.
pub mod members {
    pub const ICONS: &str = "icons";
    pub const START_URL: &str = "start_url";
    pub const NAME: &str = "name";
    pub const DISPLAY: &str = "display";
    pub const ORIENTATION: &str = "orientation";
}

/// Stable finding codes.
pub mod codes {
    pub const MISSING_IMAGE_GROUP: &str = "missing-image-group";
    pub const REQUIRED_VALUE: &str = "required-value";
    pub const INVALID_VALUE: &str = "invalid-value";
    pub const VALUE_TOO_LONG: &str = "value-too-long";
}

/// One finding produced against a canonical manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub level: ValidationLevel,

    /// Platform the rule was evaluated for.
    pub platform: String,

    /// Manifest member the rule inspected.
    pub member: String,

    pub code: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Per-level counts over a result sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub suggestions: u64,
    pub warnings: u64,
    pub errors: u64,
}

impl ValidationSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let mut summary = Self::default();
        for r in results {
            match r.level {
                ValidationLevel::Suggestion => summary.suggestions += 1,
                ValidationLevel::Warning => summary.warnings += 1,
                ValidationLevel::Error => summary.errors += 1,
            }
        }
        summary
    }

    /// A manifest is valid unless some finding is at `error` level.
    pub fn is_valid(&self) -> bool {
        self.errors == 0
    }

    pub fn total(&self) -> u64 {
        self.suggestions + self.warnings + self.errors
    }

    pub fn max_level(&self) -> Option<ValidationLevel> {
        if self.errors > 0 {
            Some(ValidationLevel::Error)
        } else if self.warnings > 0 {
            Some(ValidationLevel::Warning)
        } else if self.suggestions > 0 {
            Some(ValidationLevel::Suggestion)
        } else {
            None
        }
    }
}
