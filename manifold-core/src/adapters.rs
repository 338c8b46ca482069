//! Default filesystem-backed port implementations.

use crate::ports::{ManifestSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use manifold_formats::FormatRegistry;
use manifold_types::{FormatId, ManifestInfo};
use tracing::debug;

/// Loads a manifest file via `manifold_acquire::load_manifest_file`.
#[derive(Debug, Clone)]
pub struct FsManifestSource {
    pub path: Utf8PathBuf,
    pub source_format: Option<FormatId>,
}

impl FsManifestSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self {
            path,
            source_format: None,
        }
    }

    /// Skip detection and trust the given format.
    pub fn with_format(mut self, format: FormatId) -> Self {
        self.source_format = Some(format);
        self
    }
}

impl ManifestSource for FsManifestSource {
    fn load_manifest(&self, registry: &FormatRegistry) -> anyhow::Result<ManifestInfo> {
        manifold_acquire::load_manifest_file(&self.path, registry, self.source_format.as_ref())
            .with_context(|| format!("load manifest from {}", self.path))
    }
}

/// In-memory manifest source for embedding and testing.
///
/// Holds raw bytes so detection, BOM handling and Chrome OS conversion run exactly as they do
/// for a file.
#[derive(Debug, Clone)]
pub struct InMemoryManifestSource {
    bytes: Vec<u8>,
    origin: Option<String>,
}

impl InMemoryManifestSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            origin: None,
        }
    }

    /// Record where the bytes came from as the manifest's `generated_url`.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

impl ManifestSource for InMemoryManifestSource {
    fn load_manifest(&self, registry: &FormatRegistry) -> anyhow::Result<ManifestInfo> {
        debug!(bytes = self.bytes.len(), "processing in-memory manifest");
        let mut manifest = manifold_acquire::process_manifest_contents(&self.bytes, registry, None)
            .context("process in-memory manifest")?;
        if let Some(origin) = &self.origin {
            manifest.generated_url = Some(origin.clone());
        }
        Ok(manifest)
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
