mod config;
mod listing;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use fs_err as fs;
use manifold_core::adapters::{FsManifestSource, FsWritePort};
use manifold_core::{GenerateSettings, ToolError, run_generate, write_generate_artifacts};
use manifold_formats::{Converter, FormatRegistry, Windows10};
use manifold_render::render_validation_text;
use manifold_types::report::{PlatformStatus, ToolInfo};
use manifold_types::{FormatId, ManifestInfo, ValidationSummary};
use manifold_validate::{COMMON_RULES, RuleCatalog, validate_manifest};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const LOG_LEVELS: &[&str] = &["debug", "trace", "info", "warn", "error"];

#[derive(Debug, Parser)]
#[command(
    name = "manifold",
    version,
    about = "Detect, convert and validate web app manifests across platforms."
)]
struct Cli {
    /// Working root; manifold.toml is read from here (default: current directory).
    #[arg(long, global = true, default_value = ".")]
    root: Utf8PathBuf,

    /// Log level: debug, trace, info, warn or error. RUST_LOG wins when set.
    #[arg(long, global = true, default_value = "warn", value_parser = parse_log_level)]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate per-platform manifests for a site.
    Generate(GenerateArgs),
    /// Convert a manifest file to another format.
    Convert(ConvertArgs),
    /// Validate a manifest against platform rules.
    Validate(ValidateArgs),
    /// Print the detected format of a manifest file.
    Detect(DetectArgs),
    /// List the registered manifest formats.
    ListFormats(ListArgs),
    /// List the validation rules per platform.
    ListRules(ListRulesArgs),
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    /// URL of the hosted site.
    site_url: Option<String>,

    /// Manifest file to start from instead of a synthesized default.
    #[arg(long, short = 'm')]
    manifest: Option<Utf8PathBuf>,

    /// Format id of the manifest file (default: detected).
    #[arg(long, requires = "manifest")]
    from: Option<String>,

    /// Platforms, separated by commas or whitespace.
    #[arg(long, short = 'p')]
    platforms: Option<String>,

    /// Override the app's short name.
    #[arg(long, short = 's')]
    shortname: Option<String>,

    /// Output directory (default: config value, then the root).
    #[arg(long, short = 'd')]
    out_dir: Option<Utf8PathBuf>,

    /// Skip the rules shared by every platform.
    #[arg(long, default_value_t = false)]
    no_common: bool,
}

#[derive(Debug, Parser)]
struct ConvertArgs {
    /// Manifest file to convert.
    #[arg(long, short = 'm')]
    manifest: Utf8PathBuf,

    /// Target format id.
    #[arg(long)]
    to: String,

    /// Source format id (default: detected).
    #[arg(long)]
    from: Option<String>,

    /// Write the result here instead of stdout.
    #[arg(long, short = 'o')]
    out: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ValidateArgs {
    /// Manifest file to validate.
    #[arg(long, short = 'm')]
    manifest: Utf8PathBuf,

    /// Platforms, separated by commas or whitespace (default: config value, then all).
    #[arg(long, short = 'p')]
    platforms: Option<String>,

    /// Skip the rules shared by every platform.
    #[arg(long, default_value_t = false)]
    no_common: bool,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct DetectArgs {
    /// Manifest file to inspect.
    #[arg(long, short = 'm')]
    manifest: Utf8PathBuf,
}

#[derive(Debug, Parser)]
struct ListArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Only list rules for this platform.
    #[arg(long)]
    platform: Option<String>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_log_level(raw: &str) -> Result<String, String> {
    let level = raw.trim().to_ascii_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(format!(
            "invalid log level '{}' (expected one of: {})",
            raw,
            LOG_LEVELS.join(", ")
        ))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match real_main(cli) {
        Ok(()) => ExitCode::from(0),
        Err(e) => match e.downcast_ref::<ToolError>() {
            Some(tool_error) => {
                error!("{}", tool_error);
                eprintln!("error: {}", tool_error);
                ExitCode::from(tool_error.exit_code())
            }
            None => {
                error!("{:?}", e);
                eprintln!("error: {:#}", e);
                ExitCode::from(1)
            }
        },
    }
}

fn real_main(cli: Cli) -> anyhow::Result<()> {
    let root = cli.root;
    match cli.cmd {
        Command::Generate(args) => cmd_generate(&root, args),
        Command::Convert(args) => cmd_convert(&root, args),
        Command::Validate(args) => cmd_validate(&root, args),
        Command::Detect(args) => cmd_detect(args),
        Command::ListFormats(args) => cmd_list_formats(&root, args),
        Command::ListRules(args) => cmd_list_rules(args),
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "manifold".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        commit: None,
    }
}

fn registry_for(template: Option<&Utf8Path>) -> FormatRegistry {
    match template {
        Some(path) => {
            debug!(template = %path, "using windows10 template override");
            FormatRegistry::with_windows10(Windows10::with_template_file(path))
        }
        None => FormatRegistry::builtin(),
    }
}

fn parse_format_arg(raw: &str, registry: &FormatRegistry) -> anyhow::Result<FormatId> {
    let id = FormatId::new(raw);
    if !registry.contains(&id) {
        let known: Vec<String> = registry.ids().iter().map(|f| f.to_string()).collect();
        bail!(
            "unknown format '{}' (expected one of: {})",
            raw,
            known.join(", ")
        );
    }
    Ok(id)
}

fn cmd_generate(root: &Utf8Path, args: GenerateArgs) -> anyhow::Result<()> {
    let file_config = config::load_or_default(root).context("load manifold.toml config")?;
    let merged = ConfigMerger::new(file_config, root).merge_args(
        args.platforms.as_deref(),
        args.out_dir.as_deref(),
        args.shortname.as_deref(),
        args.no_common,
    );
    debug!("merged config: {:?}", merged);

    let settings = GenerateSettings {
        site_url: args.site_url,
        platforms: merged.platforms.clone(),
        out_dir: merged.out_dir.clone(),
        short_name: merged.short_name.clone(),
        common_rules: merged.common_rules,
        ..GenerateSettings::default()
    };

    let registry = registry_for(merged.windows10_template.as_deref());
    let catalog = RuleCatalog::builtin();
    let source_format = args
        .from
        .as_deref()
        .map(|raw| parse_format_arg(raw, &registry))
        .transpose()?;
    let source = args.manifest.map(|path| match source_format {
        Some(format) => FsManifestSource::new(path).with_format(format),
        None => FsManifestSource::new(path),
    });
    let source_ref = source
        .as_ref()
        .map(|s| s as &dyn manifold_core::ports::ManifestSource);

    let outcome = run_generate(&settings, source_ref, &registry, &catalog, tool_info())?;
    write_generate_artifacts(&outcome, &settings.out_dir, &FsWritePort)
        .context("write generate artifacts")?;

    let app_dir = settings.out_dir.join(&outcome.app_name);
    if outcome.invalid_manifest {
        println!("Report written to {}", app_dir);
        return Err(ToolError::InvalidManifest.into());
    }

    for record in &outcome.report.platforms {
        match record.status {
            PlatformStatus::Converted => println!(
                "  {:<10} {}",
                record.platform,
                app_dir.join(record.artifact.as_deref().unwrap_or_default())
            ),
            PlatformStatus::Failed | PlatformStatus::Skipped => println!(
                "  {:<10} failed: {}",
                record.platform,
                record.error.as_deref().unwrap_or("skipped")
            ),
        }
    }
    println!("Generated app '{}' in {}", outcome.app_name, app_dir);
    info!(app = %outcome.app_name, dir = %app_dir, "generate finished");
    Ok(())
}

fn cmd_convert(root: &Utf8Path, args: ConvertArgs) -> anyhow::Result<()> {
    let file_config = config::load_or_default(root).context("load manifold.toml config")?;
    let merged = ConfigMerger::new(file_config, root).merge_args(None, None, None, false);
    let registry = registry_for(merged.windows10_template.as_deref());

    let target = parse_format_arg(&args.to, &registry)?;
    let source_format = args
        .from
        .as_deref()
        .map(|raw| parse_format_arg(raw, &registry))
        .transpose()?;

    let manifest =
        manifold_acquire::load_manifest_file(&args.manifest, &registry, source_format.as_ref())
            .with_context(|| format!("load manifest from {}", args.manifest))?;
    let converted = Converter::new(&registry)
        .convert_to(manifest, &target)
        .with_context(|| format!("convert manifest to {}", target))?;
    let output = render_converted(&converted, &target)?;

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_str().is_empty()
            {
                fs::create_dir_all(parent).with_context(|| format!("create {}", parent))?;
            }
            fs::write(&path, output.as_bytes()).with_context(|| format!("write {}", path))?;
            info!(path = %path, format = %target, "wrote converted manifest");
        }
        None => println!("{}", output),
    }
    Ok(())
}

fn render_converted(manifest: &ManifestInfo, target: &FormatId) -> anyhow::Result<String> {
    if *target == FormatId::WINDOWS10 {
        return manifest
            .str_member("rawData")
            .map(str::to_string)
            .context("converted manifest carries no rawData");
    }
    Ok(manifold_acquire::manifest_to_string(manifest)?)
}

fn cmd_validate(root: &Utf8Path, args: ValidateArgs) -> anyhow::Result<()> {
    let file_config = config::load_or_default(root).context("load manifold.toml config")?;
    let merged = ConfigMerger::new(file_config, root).merge_args(
        args.platforms.as_deref(),
        None,
        None,
        args.no_common,
    );
    let registry = FormatRegistry::builtin();
    let catalog = RuleCatalog::builtin();

    let mut manifest = manifold_acquire::load_manifest_file(&args.manifest, &registry, None)
        .with_context(|| format!("load manifest from {}", args.manifest))?;
    if !manifest.format_or_base().is_base() {
        manifest = Converter::new(&registry)
            .to_base(manifest)
            .context("convert manifest to the base format")?;
    }

    let mut platforms: Vec<&str> = Vec::new();
    if merged.common_rules {
        platforms.push(COMMON_RULES);
    }
    platforms.extend(merged.platforms.iter().map(String::as_str));

    let findings = validate_manifest(&manifest, &catalog, &platforms).context("validate manifest")?;
    let summary = ValidationSummary::from_results(&findings);

    match args.format {
        OutputFormat::Text => print!("{}", render_validation_text(&findings)),
        OutputFormat::Json => {
            let out = serde_json::json!({
                "valid": summary.is_valid(),
                "summary": summary,
                "findings": findings,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    if !summary.is_valid() {
        return Err(ToolError::InvalidManifest.into());
    }
    Ok(())
}

fn cmd_detect(args: DetectArgs) -> anyhow::Result<()> {
    let registry = FormatRegistry::builtin();
    let bytes = fs::read(&args.manifest).with_context(|| format!("read {}", args.manifest))?;
    let content = manifold_acquire::parse_manifest_bytes(&bytes)
        .with_context(|| format!("parse {}", args.manifest))?;

    let format = registry
        .detect(&content)
        .ok_or(manifold_acquire::AcquireError::UndetectedFormat)?;
    println!("{}", format);
    Ok(())
}

fn cmd_list_formats(root: &Utf8Path, args: ListArgs) -> anyhow::Result<()> {
    let file_config = config::load_or_default(root).context("load manifold.toml config")?;
    let merged = ConfigMerger::new(file_config, root).merge_args(None, None, None, false);
    let summaries = registry_for(merged.windows10_template.as_deref()).summaries();

    match args.format {
        OutputFormat::Text => print!("{}", listing::render_formats_text(&summaries)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
    }
    Ok(())
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    let catalog = RuleCatalog::builtin();
    if let Some(platform) = &args.platform
        && !catalog.contains(platform)
    {
        let known: Vec<&str> = catalog.platforms().collect();
        bail!(
            "unknown platform '{}' (expected one of: {})",
            platform,
            known.join(", ")
        );
    }

    let summaries: Vec<_> = catalog
        .summaries()
        .into_iter()
        .filter(|r| {
            args.platform
                .as_deref()
                .is_none_or(|p| r.platform.eq_ignore_ascii_case(p))
        })
        .collect();

    match args.format {
        OutputFormat::Text => print!(
            "{}",
            listing::render_rules_text(&catalog, &summaries, args.platform.as_deref())
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
    }
    Ok(())
}
