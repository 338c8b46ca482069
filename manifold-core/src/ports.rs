//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use manifold_formats::FormatRegistry;
use manifold_types::ManifestInfo;

/// Source of the manifest a run starts from.
///
/// Implementations return a detected manifest; a Chrome OS manifest is expected to arrive
/// already converted to the base format, as `manifold_acquire` does.
pub trait ManifestSource {
    fn load_manifest(&self, registry: &FormatRegistry) -> anyhow::Result<ManifestInfo>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
