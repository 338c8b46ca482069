//! Clap-free settings for the generate pipeline.

use camino::Utf8PathBuf;

/// Front end recorded in `generated_from` when none is given.
pub const DEFAULT_GENERATED_FROM: &str = "CLI";

/// Settings for the generate pipeline.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    /// Hosted site the manifest belongs to. Required when no manifest source is given.
    pub site_url: Option<String>,
    pub platforms: Vec<String>,
    pub out_dir: Utf8PathBuf,

    /// Explicit `short_name`; wins over anything in the manifest.
    pub short_name: Option<String>,

    /// Evaluate the common rule set before the platform sets.
    pub common_rules: bool,
    pub generated_from: String,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            site_url: None,
            platforms: crate::platform::all_platform_ids(),
            out_dir: Utf8PathBuf::from("."),
            short_name: None,
            common_rules: true,
            generated_from: DEFAULT_GENERATED_FROM.to_string(),
        }
    }
}
