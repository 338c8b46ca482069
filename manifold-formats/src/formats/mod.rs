//! Built-in transformations.

mod chromeos;
mod firefox;
mod w3c;
mod windows10;

pub use chromeos::ChromeOs;
pub use firefox::Firefox;
pub use w3c::W3c;
pub use windows10::Windows10;

use crate::error::ConvertError;
use manifold_types::{ManifestContent, ManifestInfo, W3cIcon, W3cManifest};
use serde_json::Value;

/// Parse base-format content into the typed record.
pub(crate) fn parse_base(info: &ManifestInfo) -> Result<W3cManifest, ConvertError> {
    W3cManifest::from_content(&info.content)
        .map_err(|e| ConvertError::schema(manifold_types::FormatId::W3C, e))
}

pub(crate) fn base_content(manifest: &W3cManifest) -> Result<ManifestContent, ConvertError> {
    manifest
        .to_content()
        .map_err(|e| ConvertError::schema(manifold_types::FormatId::W3C, e))
}

/// `{ "N": src }` for every square `NxN` size token; the first icon declaring a size wins.
pub(crate) fn edge_map(icons: &[W3cIcon]) -> ManifestContent {
    let mut map = ManifestContent::new();
    for icon in icons {
        for edge in icon.square_edges() {
            map.entry(edge.to_string())
                .or_insert_with(|| Value::String(icon.src.clone()));
        }
    }
    map
}

/// Inverse of [`edge_map`]: every key becomes a square `NxN` size.
///
/// Numeric keys come first in ascending order, other keys follow lexicographically. Entries whose
/// source is not a string are dropped.
pub(crate) fn icons_from_edge_map(map: &ManifestContent) -> Vec<W3cIcon> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort_by(|a, b| edge_sort_key(a).cmp(&edge_sort_key(b)));
    keys.into_iter()
        .filter_map(|key| {
            let src = map.get(key)?.as_str()?;
            Some(W3cIcon {
                src: src.to_string(),
                sizes: Some(format!("{key}x{key}")),
                ..W3cIcon::default()
            })
        })
        .collect()
}

fn edge_sort_key(key: &str) -> (bool, u64, &str) {
    match key.parse::<u64>() {
        Ok(n) => (false, n, key),
        Err(_) => (true, 0, key),
    }
}
