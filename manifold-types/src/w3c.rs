//! Typed record for the canonical (W3C web app manifest) format.

use crate::manifest::ManifestContent;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A W3C web app manifest.
///
/// Members this crate does not model (vendor extensions such as `mjs_api_access`) are kept in
/// `extensions` and written back verbatim.
///
/// Modelled members are read leniently: a value of the wrong JSON type reads as absent, and list
/// entries that do not fit their record are skipped. Rules then see the member as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct W3cManifest {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub start_url: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<W3cIcon>>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub related_applications: Option<Vec<serde_json::Value>>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub prefer_related_applications: Option<bool>,

    /// Additional URLs the hosted app may navigate to.
    #[serde(
        default,
        rename = "hap_urlAccess",
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub hap_url_access: Option<Vec<UrlAccess>>,

    #[serde(flatten)]
    pub extensions: ManifestContent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct W3cIcon {
    pub src: String,

    /// Space-separated `WIDTHxHEIGHT` tokens (or `any`).
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,

    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub mime_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<serde_json::Value>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlAccess {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<bool>,
}

impl W3cManifest {
    pub fn from_content(content: &ManifestContent) -> serde_json::Result<Self> {
        serde_json::from_value(serde_json::Value::Object(content.clone()))
    }

    pub fn to_content(&self) -> serde_json::Result<ManifestContent> {
        serde_json::to_value(self).map(|v| match v {
            serde_json::Value::Object(map) => map,
            _ => ManifestContent::new(),
        })
    }

    /// `name`, falling back to `short_name`.
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.name.as_deref()).or_else(|| non_empty(self.short_name.as_deref()))
    }

    /// `short_name`, falling back to `name`.
    pub fn label(&self) -> Option<&str> {
        non_empty(self.short_name.as_deref()).or_else(|| non_empty(self.name.as_deref()))
    }

    pub fn icons(&self) -> &[W3cIcon] {
        self.icons.as_deref().unwrap_or(&[])
    }

    /// True when any icon declares `size` among its `sizes` tokens.
    pub fn has_icon_size(&self, size: &str) -> bool {
        self.icons()
            .iter()
            .any(|icon| icon.size_tokens().any(|t| t == size))
    }
}

impl W3cIcon {
    pub fn size_tokens(&self) -> impl Iterator<Item = &str> {
        self.sizes.as_deref().unwrap_or("").split_whitespace()
    }

    /// Edge lengths of every square `NxN` token, in declaration order.
    pub fn square_edges(&self) -> impl Iterator<Item = &str> {
        self.size_tokens().filter_map(square_edge)
    }
}

/// Returns `N` when `token` is a square `NxN` size.
pub fn square_edge(token: &str) -> Option<&str> {
    let (w, h) = token.split_once(['x', 'X'])?;
    let numeric = !w.is_empty() && w.bytes().all(|b| b.is_ascii_digit());
    (numeric && w == h).then_some(w)
}

/// A present member whose value does not fit `T` reads as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// An array keeps the entries that fit `T`; any other value reads as `None`.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}
