use super::{base_content, parse_base};
use crate::detect::{has_members, is_allowed, member};
use crate::error::ConvertError;
use crate::transformation::{Direction, Transformation};
use manifold_types::{FormatId, ManifestContent, ManifestInfo};
use serde_json::Value;

/// The canonical W3C web app manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct W3c;

impl W3c {
    const REQUIRED: &'static [&'static str] = &["start_url"];

    const ALLOWED: &'static [&'static str] = &[
        "name",
        "short_name",
        "description",
        "start_url",
        "scope",
        "display",
        "orientation",
        "theme_color",
        "background_color",
        "lang",
        "dir",
        "icons",
        "related_applications",
        "prefer_related_applications",
        "screenshots",
        "categories",
        "serviceworker",
    ];

    const ICON_MEMBERS: &'static [&'static str] =
        &["src", "sizes", "type", "density", "purpose", "platform"];

    fn icons_fit(value: &Value) -> bool {
        match value.as_array() {
            Some(icons) => icons.iter().all(|icon| {
                icon.as_object()
                    .is_some_and(|obj| obj.keys().all(|k| is_allowed(k, Self::ICON_MEMBERS)))
            }),
            None => false,
        }
    }
}

/// Vendor extension members carry a short alphanumeric prefix, e.g. `hap_urlAccess` or
/// `gcm_sender_id`.
fn is_vendor_extension(key: &str) -> bool {
    match key.split_once('_') {
        Some((prefix, rest)) => {
            (2..=4).contains(&prefix.len())
                && prefix.bytes().all(|b| b.is_ascii_alphanumeric())
                && !rest.is_empty()
        }
        None => false,
    }
}

impl Transformation for W3c {
    fn format(&self) -> FormatId {
        FormatId::base()
    }

    fn summary(&self) -> &'static str {
        "W3C web app manifest (canonical base format)"
    }

    fn matches(&self, content: &ManifestContent) -> bool {
        if !has_members(content, Self::REQUIRED) {
            return false;
        }
        let members_ok = content
            .keys()
            .all(|k| is_allowed(k, Self::ALLOWED) || is_vendor_extension(k));
        if !members_ok {
            return false;
        }
        member(content, "icons").is_none_or(Self::icons_fit)
    }

    fn supports(&self, _direction: Direction) -> bool {
        true
    }

    fn to_base(&self, info: &ManifestInfo) -> Result<ManifestInfo, ConvertError> {
        let manifest = parse_base(info)?;
        Ok(info.with_content(base_content(&manifest)?, FormatId::base()))
    }

    fn from_base(&self, info: &ManifestInfo) -> Result<ManifestInfo, ConvertError> {
        self.to_base(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(v: Value) -> ManifestContent {
        v.as_object().cloned().expect("object")
    }

    #[test]
    fn minimal_manifest_matches() {
        assert!(W3c.matches(&content(json!({"start_url": "/"}))));
        assert!(!W3c.matches(&content(json!({}))));
    }

    #[test]
    fn vendor_extensions_are_allowed() {
        let c = content(json!({
            "start_url": "/",
            "hap_urlAccess": [],
            "mjs_api_access": [],
            "gcm_sender_id": "1"
        }));
        assert!(W3c.matches(&c));
    }

    #[test]
    fn foreign_members_do_not_match() {
        assert!(!W3c.matches(&content(json!({"start_url": "/", "app": {}}))));
        assert!(!W3c.matches(&content(json!({"start_url": "/", "manifest_version": 2}))));
    }

    #[test]
    fn icons_must_be_array_of_known_members() {
        assert!(W3c.matches(&content(json!({
            "start_url": "/",
            "icons": [{"src": "a.png", "sizes": "48x48", "type": "image/png"}]
        }))));
        assert!(!W3c.matches(&content(json!({"start_url": "/", "icons": {"48": "a.png"}}))));
        assert!(!W3c.matches(&content(json!({
            "start_url": "/",
            "icons": [{"src": "a.png", "color": "red"}]
        }))));
    }

    #[test]
    fn icon_shape_check_ignores_member_case() {
        assert!(!W3c.matches(&content(json!({"start_url": "/", "ICONS": {"48": "a.png"}}))));
        assert!(W3c.matches(&content(json!({
            "start_url": "/",
            "Icons": [{"src": "a.png"}]
        }))));
    }

    #[test]
    fn to_base_drops_mistyped_members() {
        let info = ManifestInfo::new(
            content(json!({
                "start_url": 5,
                "name": "X",
                "icons": [{"sizes": "48x48"}, {"src": "a.png", "sizes": "96x96"}]
            })),
            FormatId::base(),
        );
        let out = W3c.to_base(&info).expect("convert");
        assert_eq!(
            Value::Object(out.content),
            json!({"name": "X", "icons": [{"src": "a.png", "sizes": "96x96"}]})
        );
    }
}
