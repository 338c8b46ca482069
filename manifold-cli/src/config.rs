//! Configuration file loading for manifold.
//!
//! Discovers and loads `manifold.toml` from the working root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use manifold_core::parse_platform_list;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "manifold.toml";

/// Top-level configuration from manifold.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManifoldConfig {
    pub generate: GenerateConfig,
    pub validation: ValidationConfig,
    pub windows10: Windows10Config,
}

/// Generate section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Default platform list when `--platforms` is not given.
    pub platforms: Vec<String>,

    /// Output directory, relative to the root.
    pub out_dir: Option<Utf8PathBuf>,

    /// `short_name` override.
    pub short_name: Option<String>,
}

/// Validation section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Evaluate the common rule set before platform rules.
    pub common_rules: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { common_rules: true }
    }
}

/// Windows 10 section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Windows10Config {
    /// AppX manifest template replacing the bundled one, relative to the root.
    pub template: Option<Utf8PathBuf>,
}

/// Discover the manifold.toml config file in `root`.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a manifold.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<ManifoldConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<ManifoldConfig> {
    let config: ManifoldConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the root, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<ManifoldConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(ManifoldConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub platforms: Vec<String>,
    pub out_dir: Utf8PathBuf,
    pub short_name: Option<String>,
    pub common_rules: bool,
    pub windows10_template: Option<Utf8PathBuf>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: ManifoldConfig,
    root: Utf8PathBuf,
}

impl ConfigMerger {
    /// Create a new merger; relative config paths resolve against `root`.
    pub fn new(config: ManifoldConfig, root: &Utf8Path) -> Self {
        Self {
            config,
            root: root.to_path_buf(),
        }
    }

    /// Merge with command CLI arguments.
    ///
    /// A CLI platform list replaces the configured one. Without either, every known platform is
    /// used. `no_common` can only switch the common rules off.
    pub fn merge_args(
        self,
        cli_platforms: Option<&str>,
        cli_out_dir: Option<&Utf8Path>,
        cli_short_name: Option<&str>,
        no_common: bool,
    ) -> MergedConfig {
        let platforms = match cli_platforms {
            Some(raw) => parse_platform_list(raw),
            None if !self.config.generate.platforms.is_empty() => self
                .config
                .generate
                .platforms
                .iter()
                .flat_map(|p| parse_platform_list(p))
                .collect(),
            None => manifold_core::platform::all_platform_ids(),
        };

        let out_dir = match cli_out_dir {
            Some(dir) => dir.to_path_buf(),
            None => match &self.config.generate.out_dir {
                Some(dir) => self.root.join(dir),
                None => self.root.clone(),
            },
        };

        let short_name = cli_short_name
            .map(str::to_string)
            .or(self.config.generate.short_name);

        let windows10_template = self
            .config
            .windows10
            .template
            .map(|template| self.root.join(template));

        MergedConfig {
            platforms,
            out_dir,
            short_name,
            common_rules: self.config.validation.common_rules && !no_common,
            windows10_template,
        }
    }
}
