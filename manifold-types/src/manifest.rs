use crate::format::FormatId;
use serde::{Deserialize, Serialize};

/// Loosely-typed manifest members, as found on the wire.
pub type ManifestContent = serde_json::Map<String, serde_json::Value>;

/// Envelope around a manifest's members and its format tag.
///
/// An empty `content` object is the "uninitialized" state: conversion and validation reject it
/// rather than treating it as an empty manifest. Provenance fields are informational only and are
/// carried across conversions untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestInfo {
    #[serde(default)]
    pub content: ManifestContent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatId>,

    /// Which front end produced this manifest (e.g. "CLI").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_from: Option<String>,

    /// Where the manifest was acquired from (URL or file path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ManifestInfo {
    pub fn new(content: ManifestContent, format: FormatId) -> Self {
        Self {
            content,
            format: Some(format),
            ..Self::default()
        }
    }

    /// True when there is nothing to convert or validate.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The format tag, defaulting to the canonical base format when unset.
    pub fn format_or_base(&self) -> FormatId {
        self.format.clone().unwrap_or_else(FormatId::base)
    }

    /// Replace the content and format, keeping provenance.
    pub fn with_content(&self, content: ManifestContent, format: FormatId) -> Self {
        Self {
            content,
            format: Some(format),
            generated_from: self.generated_from.clone(),
            generated_url: self.generated_url.clone(),
            timestamp: self.timestamp.clone(),
        }
    }

    pub fn str_member(&self, key: &str) -> Option<&str> {
        self.content.get(key).and_then(|v| v.as_str())
    }
}
