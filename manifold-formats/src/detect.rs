use crate::registry::FormatRegistry;
use manifold_types::{FormatId, ManifestContent};
use serde_json::Value;
use tracing::debug;

/// Determine which registered format `content` matches.
///
/// Predicates are evaluated in registry order (base format first) and the first match wins.
/// `None` means undetected; callers report that as an invalid manifest format.
pub fn detect(registry: &FormatRegistry, content: &ManifestContent) -> Option<FormatId> {
    let found = registry
        .transformations()
        .find(|t| t.matches(content))
        .map(|t| t.format());
    debug!(
        format = found.as_ref().map(FormatId::as_str).unwrap_or("undetected"),
        members = content.len(),
        "format detection"
    );
    found
}

/// Every name in `required` is a member of `map`.
pub(crate) fn has_members(map: &ManifestContent, required: &[&str]) -> bool {
    required.iter().all(|name| map.contains_key(*name))
}

/// Every member of `map` is in `allowed`, compared case-insensitively.
pub(crate) fn members_within(map: &ManifestContent, allowed: &[&str]) -> bool {
    map.keys().all(|key| is_allowed(key, allowed))
}

pub(crate) fn is_allowed(key: &str, allowed: &[&str]) -> bool {
    allowed.iter().any(|a| a.eq_ignore_ascii_case(key))
}

/// Case-insensitive member lookup.
pub(crate) fn member<'a>(map: &'a ManifestContent, name: &str) -> Option<&'a Value> {
    map.get(name).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    })
}

/// A nested object whose members all fall within `allowed`. Non-objects never qualify.
pub(crate) fn object_within<'a>(
    value: Option<&'a Value>,
    allowed: &[&str],
) -> Option<&'a ManifestContent> {
    value
        .and_then(Value::as_object)
        .filter(|map| members_within(map, allowed))
}
