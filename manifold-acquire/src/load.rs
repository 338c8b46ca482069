use camino::Utf8Path;
use fs_err as fs;
use manifold_formats::{ConvertError, Converter, FormatRegistry};
use manifold_types::{FormatId, ManifestContent, ManifestInfo};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("could not open the manifest file {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid manifest format: {message}")]
    Json { message: String },

    #[error("invalid manifest format: the manifest must be a JSON object")]
    NotAnObject,

    #[error("invalid manifest format: unable to detect the input manifest format")]
    UndetectedFormat,

    #[error("manifest content is empty or invalid")]
    EmptyManifest,

    #[error(transparent)]
    Conversion(#[from] ConvertError),
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode raw manifest bytes into a JSON object, ignoring a leading UTF-8 byte order mark.
pub fn parse_manifest_bytes(bytes: &[u8]) -> Result<ManifestContent, AcquireError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let value: Value = serde_json::from_slice(bytes).map_err(|e| AcquireError::Json {
        message: e.to_string(),
    })?;
    match value {
        Value::Object(content) => Ok(content),
        _ => Err(AcquireError::NotAnObject),
    }
}

/// Parse and detect raw manifest bytes.
///
/// With `source_format` the hint is trusted (it must be registered) and detection is skipped. A
/// Chrome OS manifest is converted to the base format before it is returned.
pub fn process_manifest_contents(
    bytes: &[u8],
    registry: &FormatRegistry,
    source_format: Option<&FormatId>,
) -> Result<ManifestInfo, AcquireError> {
    let content = parse_manifest_bytes(bytes)?;

    let format = match source_format {
        Some(hint) => {
            let hint = FormatId::new(hint.as_str());
            if !registry.contains(&hint) {
                return Err(ConvertError::FormatNotRecognized { format: hint }.into());
            }
            hint
        }
        None => registry.detect(&content).ok_or_else(|| {
            debug!("unable to detect the input manifest format");
            AcquireError::UndetectedFormat
        })?,
    };
    info!(format = %format, "found a {} manifest", format.as_str().to_uppercase());

    let manifest = ManifestInfo::new(content, format.clone());
    if format != FormatId::CHROMEOS {
        return Ok(manifest);
    }

    info!("converting the Chrome OS manifest to the base format");
    let converted = Converter::new(registry).to_base(manifest)?;
    if registry.detect(&converted.content).is_some_and(|f| f.is_base()) {
        info!("conversion to the base format successful");
    }
    Ok(converted)
}

/// Read a manifest file and process its contents. `generated_url` records the path.
pub fn load_manifest_file(
    path: &Utf8Path,
    registry: &FormatRegistry,
    source_format: Option<&FormatId>,
) -> Result<ManifestInfo, AcquireError> {
    debug!(path = %path, "reading manifest file");
    let bytes = fs::read(path).map_err(|e| AcquireError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    let mut manifest = process_manifest_contents(&bytes, registry, source_format)?;
    manifest.generated_url = Some(path.to_string());
    Ok(manifest)
}

/// A base-format manifest for a site that publishes none.
pub fn default_manifest(site_url: &str) -> ManifestInfo {
    let mut content = ManifestContent::new();
    content.insert("start_url".to_string(), Value::String(site_url.to_string()));
    content.insert(
        "short_name".to_string(),
        Value::String(default_short_name(site_url)),
    );
    ManifestInfo::new(content, FormatId::base())
}

/// Capitalized host fragments, joined: `https://my-site.example.com` gives `MySiteExampleCom`.
pub fn default_short_name(site_url: &str) -> String {
    let parsed = Url::parse(site_url).ok();
    let host = parsed
        .as_ref()
        .and_then(Url::host_str)
        .unwrap_or(site_url);

    host.split(['.', '-'])
        .filter(|fragment| !fragment.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(fragment: &str) -> String {
    let mut chars = fragment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Manifest content as 4-space indented JSON.
pub fn manifest_to_string(manifest: &ManifestInfo) -> Result<String, AcquireError> {
    if manifest.is_empty() {
        return Err(AcquireError::EmptyManifest);
    }
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    manifest
        .content
        .serialize(&mut ser)
        .map_err(|e| AcquireError::Json {
            message: e.to_string(),
        })?;
    String::from_utf8(buf).map_err(|e| AcquireError::Json {
        message: e.to_string(),
    })
}
