use super::{base_content, edge_map, icons_from_edge_map, parse_base};
use crate::detect::{has_members, member, members_within, object_within};
use crate::error::ConvertError;
use crate::transformation::{Direction, Transformation};
use manifold_types::{FormatId, ManifestContent, ManifestInfo, W3cManifest};
use serde_json::{Value, json};
use url::Url;

/// Firefox Open Web App manifest (`manifest.webapp`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Firefox;

impl Firefox {
    const REQUIRED: &'static [&'static str] = &["name", "launch_path"];

    const ALLOWED: &'static [&'static str] = &[
        "name",
        "description",
        "launch_path",
        "icons",
        "developer",
        "default_locale",
        "locales",
        "orientation",
        "fullscreen",
        "version",
        "type",
        "permissions",
        "installs_allowed_from",
        "appcache_path",
        "origin",
        "redirects",
        "csp",
        "activities",
        "messages",
        "role",
        "required_features",
        "chrome",
        "precompile",
    ];

    const DEVELOPER: &'static [&'static str] = &["name", "url"];

    /// Path and query of `start_url`, resolved against a placeholder origin so relative URLs work.
    fn launch_path(start_url: &str) -> Result<String, ConvertError> {
        let origin = Url::parse("https://localhost/")
            .map_err(|e| ConvertError::schema(FormatId::W3C, e))?;
        let url = origin
            .join(start_url)
            .map_err(|e| ConvertError::schema(FormatId::W3C, format!("start_url: {e}")))?;
        Ok(match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        })
    }

    fn str_member<'a>(content: &'a ManifestContent, name: &str) -> Option<&'a str> {
        member(content, name).and_then(Value::as_str)
    }
}

impl Transformation for Firefox {
    fn format(&self) -> FormatId {
        FormatId::new(FormatId::FIREFOX)
    }

    fn summary(&self) -> &'static str {
        "Firefox Open Web App manifest (manifest.webapp)"
    }

    fn matches(&self, content: &ManifestContent) -> bool {
        if !has_members(content, Self::REQUIRED) || !members_within(content, Self::ALLOWED) {
            return false;
        }
        match member(content, "developer") {
            Some(dev) => object_within(Some(dev), Self::DEVELOPER).is_some(),
            None => true,
        }
    }

    fn supports(&self, _direction: Direction) -> bool {
        true
    }

    fn to_base(&self, info: &ManifestInfo) -> Result<ManifestInfo, ConvertError> {
        let content = &info.content;
        let launch_path = Self::str_member(content, "launch_path")
            .ok_or_else(|| ConvertError::missing(FormatId::FIREFOX, "launch_path"))?;
        let name = Self::str_member(content, "name")
            .ok_or_else(|| ConvertError::missing(FormatId::FIREFOX, "name"))?;

        let fullscreen = member(content, "fullscreen")
            .is_some_and(|v| v.as_str() == Some("true") || v.as_bool() == Some(true));

        let manifest = W3cManifest {
            start_url: Some(launch_path.to_string()),
            name: Some(name.to_string()),
            description: Self::str_member(content, "description").map(str::to_string),
            orientation: Self::str_member(content, "orientation").map(str::to_string),
            lang: Self::str_member(content, "default_locale").map(str::to_string),
            display: fullscreen.then(|| "fullscreen".to_string()),
            icons: member(content, "icons")
                .and_then(Value::as_object)
                .map(icons_from_edge_map),
            ..W3cManifest::default()
        };

        Ok(info.with_content(base_content(&manifest)?, FormatId::base()))
    }

    fn from_base(&self, info: &ManifestInfo) -> Result<ManifestInfo, ConvertError> {
        let manifest = parse_base(info)?;
        let start_url = manifest
            .start_url
            .as_deref()
            .ok_or_else(|| ConvertError::missing(FormatId::W3C, "start_url"))?;
        let name = manifest
            .display_name()
            .ok_or_else(|| ConvertError::missing(FormatId::W3C, "name"))?;
        let description = manifest
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(name);

        let mut content = ManifestContent::new();
        content.insert("name".to_string(), json!(name));
        content.insert("description".to_string(), json!(description));
        content.insert(
            "launch_path".to_string(),
            json!(Self::launch_path(start_url)?),
        );

        let icons = edge_map(manifest.icons());
        if !icons.is_empty() {
            content.insert("icons".to_string(), Value::Object(icons));
        }
        if let Some(orientation) = manifest.orientation.as_deref() {
            content.insert("orientation".to_string(), json!(orientation));
        }
        if manifest.display.as_deref() == Some("fullscreen") {
            content.insert("fullscreen".to_string(), json!("true"));
        }
        if let Some(lang) = manifest.lang.as_deref() {
            content.insert("default_locale".to_string(), json!(lang));
        }

        Ok(info.with_content(content, self.format()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn content(v: Value) -> ManifestContent {
        v.as_object().cloned().expect("object")
    }

    #[test]
    fn launch_path_strips_origin_keeps_query() {
        assert_eq!(
            Firefox::launch_path("https://x.test/app/index.html?src=pwa").expect("path"),
            "/app/index.html?src=pwa"
        );
        assert_eq!(Firefox::launch_path("/").expect("path"), "/");
        assert_eq!(Firefox::launch_path("index.html").expect("path"), "/index.html");
    }

    #[test]
    fn developer_block_is_restricted() {
        let ok = content(json!({
            "name": "X", "launch_path": "/",
            "developer": {"name": "Dev", "url": "https://dev.test"}
        }));
        assert!(Firefox.matches(&ok));

        let bad = content(json!({
            "name": "X", "launch_path": "/",
            "developer": {"email": "dev@test"}
        }));
        assert!(!Firefox.matches(&bad));
    }

    #[test]
    fn from_base_maps_display_and_locale() {
        let info = ManifestInfo::new(
            content(json!({
                "start_url": "https://x.test/start?a=1",
                "name": "Example",
                "display": "fullscreen",
                "orientation": "landscape",
                "lang": "en-US",
                "icons": [{"src": "i128.png", "sizes": "128x128"}]
            })),
            FormatId::base(),
        );
        let out = Firefox.from_base(&info).expect("from base");
        assert!(Firefox.matches(&out.content));
        assert_eq!(
            Value::Object(out.content),
            json!({
                "name": "Example",
                "description": "Example",
                "launch_path": "/start?a=1",
                "icons": {"128": "i128.png"},
                "orientation": "landscape",
                "fullscreen": "true",
                "default_locale": "en-US"
            })
        );
    }

    #[test]
    fn to_base_inverts_fullscreen() {
        let info = ManifestInfo::new(
            content(json!({"name": "X", "launch_path": "/", "fullscreen": "true"})),
            FormatId::new("firefox"),
        );
        let base = Firefox.to_base(&info).expect("to base");
        assert_eq!(
            Value::Object(base.content),
            json!({"name": "X", "start_url": "/", "display": "fullscreen"})
        );
    }
}
