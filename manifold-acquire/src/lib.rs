//! Manifest acquisition utilities.
//!
//! This crate turns raw manifest bytes into a detected [`manifold_types::ManifestInfo`]. Transport
//! is someone else's concern: callers hand over bytes from a file, a download or a test fixture.
//! Chrome OS manifests are converted to the base format on arrival; every other detected format is
//! returned as-is.

mod load;

pub use load::{
    AcquireError, default_manifest, default_short_name, load_manifest_file, manifest_to_string,
    parse_manifest_bytes, process_manifest_contents,
};
