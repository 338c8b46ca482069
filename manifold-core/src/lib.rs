//! Embeddable core library for manifold.
//!
//! Provides a clap-free, I/O-abstracted generate pipeline suitable for linking
//! into the CLI or any other host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`ManifestSource`](ports::ManifestSource): acquire a manifest
//! - [`WritePort`](ports::WritePort): write files and create directories
//!
//! The [`adapters`] module provides filesystem-backed and in-memory implementations.
//!
//! # Entry points
//!
//! - [`run_generate`](pipeline::run_generate): acquire, normalize, validate, convert and report
//! - [`write_generate_artifacts`](pipeline::write_generate_artifacts): persist the outcome

pub mod adapters;
pub mod normalize;
pub mod pipeline;
pub mod platform;
pub mod ports;
pub mod settings;

pub use pipeline::{
    GenerateOutcome, PlatformConversion, ToolError, run_generate, write_generate_artifacts,
};
pub use platform::{PlatformTarget, parse_platform_list, platforms_valid};
pub use settings::GenerateSettings;
