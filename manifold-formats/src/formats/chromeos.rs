use super::{edge_map, icons_from_edge_map, parse_base};
use crate::detect::{has_members, member, members_within, object_within};
use crate::error::ConvertError;
use crate::transformation::{Direction, Transformation};
use manifold_types::{FormatId, ManifestContent, ManifestInfo, W3cManifest};
use serde_json::{Value, json};

/// Chrome OS hosted app manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeOs;

impl ChromeOs {
    const REQUIRED: &'static [&'static str] = &["name", "version", "manifest_version", "app"];

    const ALLOWED: &'static [&'static str] = &[
        "name",
        "description",
        "version",
        "manifest_version",
        "app",
        "background_page",
        "icons",
        "key",
        "minimum_chrome_version",
        "offline_enabled",
        "permissions",
        "update_url",
        "default_locale",
    ];

    const APP: &'static [&'static str] = &["urls", "launch"];
    const APP_LAUNCH: &'static [&'static str] = &["web_url", "container", "height", "width"];

    const DEFAULT_VERSION: &'static str = "0.0.1";
    const MANIFEST_VERSION: u64 = 2;

    fn web_url(content: &ManifestContent) -> Option<&Value> {
        member(content, "app")
            .and_then(Value::as_object)
            .and_then(|app| member(app, "launch"))
            .and_then(Value::as_object)
            .and_then(|launch| member(launch, "web_url"))
    }
}

impl Transformation for ChromeOs {
    fn format(&self) -> FormatId {
        FormatId::new(FormatId::CHROMEOS)
    }

    fn summary(&self) -> &'static str {
        "Chrome OS hosted app manifest"
    }

    fn matches(&self, content: &ManifestContent) -> bool {
        if !has_members(content, Self::REQUIRED) || !members_within(content, Self::ALLOWED) {
            return false;
        }
        let Some(app) = object_within(member(content, "app"), Self::APP) else {
            return false;
        };
        let Some(launch) = object_within(member(app, "launch"), Self::APP_LAUNCH) else {
            return false;
        };
        launch.contains_key("web_url")
    }

    fn supports(&self, _direction: Direction) -> bool {
        true
    }

    fn to_base(&self, info: &ManifestInfo) -> Result<ManifestInfo, ConvertError> {
        let content = &info.content;
        let start_url = Self::web_url(content)
            .and_then(Value::as_str)
            .ok_or_else(|| ConvertError::missing(FormatId::CHROMEOS, "app.launch.web_url"))?;
        let name = member(content, "name")
            .and_then(Value::as_str)
            .ok_or_else(|| ConvertError::missing(FormatId::CHROMEOS, "name"))?;

        let icons = member(content, "icons")
            .and_then(Value::as_object)
            .map(icons_from_edge_map)
            .unwrap_or_default();

        let manifest = W3cManifest {
            start_url: Some(start_url.to_string()),
            name: Some(name.to_string()),
            description: member(content, "description")
                .and_then(Value::as_str)
                .map(str::to_string),
            icons: Some(icons),
            ..W3cManifest::default()
        };

        Ok(info.with_content(super::base_content(&manifest)?, FormatId::base()))
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

        let mut app = ManifestContent::new();
        if let Some(scope) = manifest.scope.as_deref().filter(|s| !s.is_empty()) {
            app.insert("urls".to_string(), json!([scope]));
        }
        app.insert("launch".to_string(), json!({ "web_url": start_url }));

        let mut content = ManifestContent::new();
        content.insert("name".to_string(), json!(name));
        if let Some(description) = manifest.description.as_deref() {
            content.insert("description".to_string(), json!(description));
        }
        content.insert("version".to_string(), json!(Self::DEFAULT_VERSION));
        content.insert("manifest_version".to_string(), json!(Self::MANIFEST_VERSION));
        content.insert("app".to_string(), Value::Object(app));

        let icons = edge_map(manifest.icons());
        if !icons.is_empty() {
            content.insert("icons".to_string(), Value::Object(icons));
        }

        Ok(info.with_content(content, self.format()))
    }
}
