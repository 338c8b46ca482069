//! Normalization applied to an acquired manifest before validation.

use manifold_acquire::default_short_name;
use manifold_types::ManifestInfo;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("The site URL is not a valid URL.")]
    InvalidSiteUrl,

    #[error("The manifest found is not a W3C manifest.")]
    NotW3c,

    #[error(
        "The domain of the hosted site ({site}) does not match the domain of the manifest's start_url parameter ({start_url})"
    )]
    DomainMismatch { site: String, start_url: String },

    #[error("The start_url '{start_url}' cannot be resolved against the site URL: {message}")]
    UnresolvableStartUrl { start_url: String, message: String },
}

/// Parse a site URL, requiring a host.
pub fn parse_site_url(site_url: &str) -> Result<Url, NormalizeError> {
    let url = Url::parse(site_url).map_err(|_| NormalizeError::InvalidSiteUrl)?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(NormalizeError::InvalidSiteUrl);
    }
    Ok(url)
}

/// Check the manifest against its hosting site and make `start_url` absolute.
///
/// An absolute `start_url` must share the site's host. A missing one becomes the site URL.
pub fn resolve_start_url(manifest: &mut ManifestInfo, site_url: &str) -> Result<(), NormalizeError> {
    let site = parse_site_url(site_url)?;
    if !manifest.format_or_base().is_base() {
        return Err(NormalizeError::NotW3c);
    }

    let resolved = match manifest.str_member("start_url") {
        None => site.to_string(),
        Some(start_url) => {
            if let Ok(absolute) = Url::parse(start_url)
                && let Some(host) = absolute.host_str()
                && Some(host) != site.host_str()
            {
                return Err(NormalizeError::DomainMismatch {
                    site: site.host_str().unwrap_or_default().to_string(),
                    start_url: host.to_string(),
                });
            }
            site.join(start_url)
                .map_err(|e| NormalizeError::UnresolvableStartUrl {
                    start_url: start_url.to_string(),
                    message: e.to_string(),
                })?
                .to_string()
        }
    };

    debug!(start_url = %resolved, "resolved start_url");
    manifest
        .content
        .insert("start_url".to_string(), Value::String(resolved));
    Ok(())
}

/// Fill `short_name` from `name`, then from the site host. An explicit override always wins.
pub fn apply_short_name(manifest: &mut ManifestInfo, site_url: Option<&str>, short_name: Option<&str>) {
    let chosen = match short_name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => Some(explicit.to_string()),
        None if non_empty(manifest, "short_name").is_some() => None,
        None => non_empty(manifest, "name")
            .map(str::to_string)
            .or_else(|| site_url.map(default_short_name)),
    };

    if let Some(value) = chosen {
        manifest
            .content
            .insert("short_name".to_string(), Value::String(value));
    }
}

fn non_empty<'a>(manifest: &'a ManifestInfo, key: &str) -> Option<&'a str> {
    manifest.str_member(key).filter(|s| !s.trim().is_empty())
}

/// Directory-safe application name: ASCII alphanumerics, `-` and `_` only.
pub fn sanitize_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if sanitized.is_empty() {
        "App".to_string()
    } else {
        sanitized
    }
}
