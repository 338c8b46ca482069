//! Rules every platform shares, registered under the `all` platform id.

use crate::rule::ValidationRule;
use manifold_types::validation::{codes, members};
use manifold_types::{ValidationLevel, ValidationResult, W3cManifest};
use serde_json::json;

const DISPLAY_MODES: &[&str] = &["fullscreen", "standalone", "minimal-ui", "browser"];

const ORIENTATIONS: &[&str] = &[
    "any",
    "natural",
    "landscape",
    "landscape-primary",
    "landscape-secondary",
    "portrait",
    "portrait-primary",
    "portrait-secondary",
];

fn finding(
    level: ValidationLevel,
    platform: &str,
    member: &str,
    code: &str,
    description: impl Into<String>,
) -> ValidationResult {
    ValidationResult {
        level,
        platform: platform.to_string(),
        member: member.to_string(),
        code: code.to_string(),
        description: description.into(),
        data: None,
    }
}

pub struct StartUrlRequired;

impl ValidationRule for StartUrlRequired {
    fn id(&self) -> &str {
        "start-url-required"
    }

    fn summary(&self) -> &str {
        "The start URL of the app is required"
    }

    fn level(&self) -> ValidationLevel {
        ValidationLevel::Error
    }

    fn evaluate(&self, platform: &str, manifest: &W3cManifest) -> Vec<ValidationResult> {
        match manifest.start_url.as_deref() {
            Some(url) if !url.trim().is_empty() => vec![],
            _ => vec![finding(
                self.level(),
                platform,
                members::START_URL,
                codes::REQUIRED_VALUE,
                self.summary(),
            )],
        }
    }
}

pub struct NameRequired;

impl ValidationRule for NameRequired {
    fn id(&self) -> &str {
        "name-required"
    }

    fn summary(&self) -> &str {
        "A name or short name for the app is recommended"
    }

    fn level(&self) -> ValidationLevel {
        ValidationLevel::Warning
    }

    fn evaluate(&self, platform: &str, manifest: &W3cManifest) -> Vec<ValidationResult> {
        if manifest.display_name().is_some() {
            return vec![];
        }
        vec![finding(
            self.level(),
            platform,
            members::NAME,
            codes::REQUIRED_VALUE,
            self.summary(),
        )]
    }
}

pub struct DisplayMode;

impl ValidationRule for DisplayMode {
    fn id(&self) -> &str {
        "display-mode"
    }

    fn summary(&self) -> &str {
        "The display mode must be one of: fullscreen, standalone, minimal-ui, browser"
    }

    fn level(&self) -> ValidationLevel {
        ValidationLevel::Warning
    }

    fn evaluate(&self, platform: &str, manifest: &W3cManifest) -> Vec<ValidationResult> {
        match manifest.display.as_deref() {
            Some(mode) if !DISPLAY_MODES.contains(&mode) => {
                let mut result = finding(
                    self.level(),
                    platform,
                    members::DISPLAY,
                    codes::INVALID_VALUE,
                    self.summary(),
                );
                result.data = Some(json!({ "value": mode }));
                vec![result]
            }
            _ => vec![],
        }
    }
}

pub struct Orientation;

impl ValidationRule for Orientation {
    fn id(&self) -> &str {
        "orientation"
    }

    fn summary(&self) -> &str {
        "The orientation must be a screen orientation lock type"
    }

    fn level(&self) -> ValidationLevel {
        ValidationLevel::Warning
    }

    fn evaluate(&self, platform: &str, manifest: &W3cManifest) -> Vec<ValidationResult> {
        match manifest.orientation.as_deref() {
            Some(value) if !ORIENTATIONS.contains(&value) => {
                let mut result = finding(
                    self.level(),
                    platform,
                    members::ORIENTATION,
                    codes::INVALID_VALUE,
                    self.summary(),
                );
                result.data = Some(json!({ "value": value, "allowed": ORIENTATIONS }));
                vec![result]
            }
            _ => vec![],
        }
    }
}

/// One finding per icon whose `sizes` is missing or malformed.
pub struct IconSizes;

impl IconSizes {
    fn token_ok(token: &str) -> bool {
        if token.eq_ignore_ascii_case("any") {
            return true;
        }
        let Some((w, h)) = token.split_once(['x', 'X']) else {
            return false;
        };
        let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        numeric(w) && numeric(h)
    }
}

impl ValidationRule for IconSizes {
    fn id(&self) -> &str {
        "icon-sizes"
    }

    fn summary(&self) -> &str {
        "Every icon should declare its sizes as WIDTHxHEIGHT tokens or `any`"
    }

    fn level(&self) -> ValidationLevel {
        ValidationLevel::Warning
    }

    fn evaluate(&self, platform: &str, manifest: &W3cManifest) -> Vec<ValidationResult> {
        manifest
            .icons()
            .iter()
            .filter(|icon| {
                let mut tokens = icon.size_tokens().peekable();
                tokens.peek().is_none() || !tokens.all(Self::token_ok)
            })
            .map(|icon| {
                let mut result = finding(
                    self.level(),
                    platform,
                    members::ICONS,
                    codes::INVALID_VALUE,
                    format!("Icon {} does not declare valid sizes", icon.src),
                );
                result.data = Some(json!({ "src": icon.src, "sizes": icon.sizes }));
                result
            })
            .collect()
    }
}
