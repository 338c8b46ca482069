use super::parse_base;
use crate::error::ConvertError;
use crate::transformation::{Direction, Transformation};
use camino::Utf8PathBuf;
use fs_err as fs;
use manifold_types::{FormatId, ManifestContent, ManifestInfo, W3cManifest};
use serde_json::{Value, json};
use std::borrow::Cow;
use tracing::debug;

const EMBEDDED_TEMPLATE: &str = include_str!("../../assets/windows10/appxmanifest-template.xml");

/// Icon slots filled from exact `sizes` matches, paired with their template placeholder.
const ICON_SLOTS: &[(&str, &str)] = &[
    ("44x44", "{Square44x44Logo}"),
    ("150x150", "{Square150x150Logo}"),
    ("620x300", "{SplashScreenImage}"),
];

const RULE_SEPARATOR: &str = "\r\n\t\t\t\t";

/// Windows 10 AppX manifest. Output-only: there is no path back to the base format.
#[derive(Debug, Clone, Default)]
pub struct Windows10 {
    template: Option<Utf8PathBuf>,
}

impl Windows10 {
    /// Uses the bundled AppX template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the AppX template from `path` on every conversion instead of the bundled copy.
    pub fn with_template_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            template: Some(path.into()),
        }
    }

    fn load_template(&self) -> Result<Cow<'static, str>, ConvertError> {
        match &self.template {
            None => Ok(Cow::Borrowed(EMBEDDED_TEMPLATE)),
            Some(path) => {
                debug!(path = %path, "reading appx template");
                fs::read_to_string(path)
                    .map(Cow::Owned)
                    .map_err(|e| ConvertError::Template {
                        path: path.to_string(),
                        message: e.to_string(),
                    })
            }
        }
    }

    /// Slot key to icon source. A later icon with the same size replaces an earlier one.
    fn slot_icons(manifest: &W3cManifest) -> ManifestContent {
        let mut icons = ManifestContent::new();
        for icon in manifest.icons() {
            let Some(sizes) = icon.sizes.as_deref() else {
                continue;
            };
            if let Some((slot, _)) = ICON_SLOTS.iter().find(|(slot, _)| *slot == sizes.trim()) {
                icons.insert(slot.to_string(), json!(icon.src));
            }
        }
        icons
    }

    fn content_uri_rules(manifest: &W3cManifest) -> String {
        let scope = manifest
            .scope
            .as_deref()
            .filter(|s| !s.is_empty())
            .into_iter();
        let access = manifest
            .hap_url_access
            .iter()
            .flatten()
            .filter(|a| a.external != Some(true))
            .map(|a| a.url.as_str());

        scope
            .chain(access)
            .map(|url| format!(r#"<uap:Rule Type="include" Match="{}" />"#, xml_escape(url)))
            .collect::<Vec<_>>()
            .join(RULE_SEPARATOR)
    }
}

impl Transformation for Windows10 {
    fn format(&self) -> FormatId {
        FormatId::new(FormatId::WINDOWS10)
    }

    fn summary(&self) -> &'static str {
        "Windows 10 AppX manifest (output only)"
    }

    fn matches(&self, _content: &ManifestContent) -> bool {
        false
    }

    fn supports(&self, direction: Direction) -> bool {
        direction == Direction::FromBase
    }

    fn from_base(&self, info: &ManifestInfo) -> Result<ManifestInfo, ConvertError> {
        let manifest = parse_base(info)?;
        let start_url = manifest
            .start_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConvertError::missing(FormatId::W3C, "start_url"))?;

        let icons = Self::slot_icons(&manifest);
        let slot_src = |slot: &str| icons.get(slot).and_then(Value::as_str).unwrap_or("");

        let mut values = vec![
            ("{StartPage}", xml_escape(start_url)),
            ("{DisplayName}", xml_escape(manifest.label().unwrap_or(""))),
            ("{Description}", xml_escape(manifest.display_name().unwrap_or(""))),
            (
                "{RotationPreference}",
                xml_escape(manifest.orientation.as_deref().unwrap_or("portrait")),
            ),
            // Rules are markup; their URLs are escaped individually.
            (
                "{ApplicationContentUriRules}",
                Cow::Owned(Self::content_uri_rules(&manifest)),
            ),
        ];
        for (slot, placeholder) in ICON_SLOTS {
            values.push((*placeholder, xml_escape(slot_src(slot))));
        }
        let raw = fill_placeholders(&self.load_template()?, &values);

        let mut content = ManifestContent::new();
        content.insert("rawData".to_string(), Value::String(raw));
        content.insert("icons".to_string(), Value::Object(icons));
        Ok(info.with_content(content, self.format()))
    }
}

/// Replace every `{Name}` token of `template` that has an entry in `values`, in one pass.
/// Substituted text is never rescanned, so values may contain brace tokens of their own.
fn fill_placeholders(template: &str, values: &[(&str, Cow<'_, str>)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let found = tail.find('}').and_then(|close| {
            let token = &tail[..=close];
            values
                .iter()
                .find(|(placeholder, _)| *placeholder == token)
                .map(|(_, value)| (close, value))
        });
        match found {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn xml_escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
