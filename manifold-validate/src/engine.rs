use crate::catalog::RuleCatalog;
use crate::error::ValidationError;
use manifold_formats::ConvertError;
use manifold_types::{FormatId, ManifestInfo, ValidationResult, W3cManifest};
use tracing::debug;

/// Run the rule sets of `platforms` against a canonical manifest.
///
/// Every platform is resolved before any rule runs, so an unknown id fails the call without
/// partial output. Results follow platform order as given, then rule registration order.
pub fn validate_manifest<S: AsRef<str>>(
    info: &ManifestInfo,
    catalog: &RuleCatalog,
    platforms: &[S],
) -> Result<Vec<ValidationResult>, ValidationError> {
    if info.is_empty() {
        return Err(ConvertError::InvalidFormat {
            reason: "manifest content is empty or not initialized".to_string(),
        }
        .into());
    }

    let format = info.format_or_base();
    if !format.is_base() {
        return Err(ValidationError::NotCanonical { format });
    }

    let manifest = W3cManifest::from_content(&info.content).map_err(|e| ConvertError::Schema {
        format: FormatId::base(),
        message: e.to_string(),
    })?;

    let mut resolved = Vec::with_capacity(platforms.len());
    for platform in platforms {
        let id = platform.as_ref().trim().to_ascii_lowercase();
        let rules = catalog
            .rules_for(&id)
            .ok_or_else(|| ValidationError::UnknownPlatform {
                platform: platform.as_ref().to_string(),
            })?;
        resolved.push((id, rules));
    }

    let mut results = Vec::new();
    for (platform, rules) in resolved {
        let before = results.len();
        for rule in rules {
            results.extend(rule.evaluate(&platform, &manifest));
        }
        debug!(
            platform = %platform,
            rules = rules.len(),
            findings = results.len() - before,
            "validated platform"
        );
    }
    Ok(results)
}
