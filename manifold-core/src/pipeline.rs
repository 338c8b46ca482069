//! Core generate pipeline, extracted from the CLI.
//!
//! The entry points are I/O-agnostic: manifest acquisition and artifact writes
//! go through the port traits.

use crate::normalize::{apply_short_name, parse_site_url, resolve_start_url, sanitize_name};
use crate::platform::{self, PlatformTarget};
use crate::ports::{ManifestSource, WritePort};
use crate::settings::GenerateSettings;
use anyhow::{Context, anyhow};
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use manifold_formats::{ConvertError, Converter, FormatRegistry};
use manifold_render::{format_validation_message, render_report_md};
use manifold_types::report::{
    ManifoldReport, PlatformRecord, PlatformStatus, ReportStatus, ReportVerdict, RunInfo,
    ToolInfo, reason_tokens,
};
use manifold_types::{FormatId, ManifestInfo, ValidationLevel, ValidationResult, ValidationSummary};
use manifold_validate::{COMMON_RULES, RuleCatalog, validate_manifest};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Error type for pipeline results.  Exit code 2 = invalid manifest, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(
        "The manifest is not valid. Review the validation messages above for additional information."
    )]
    InvalidManifest,
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::InvalidManifest => 2,
            ToolError::Internal(_) => 1,
        }
    }
}

/// Conversion result for one requested platform.
#[derive(Debug)]
pub struct PlatformConversion {
    pub target: &'static PlatformTarget,
    pub result: Result<ManifestInfo, ConvertError>,
}

/// Outcome of `run_generate`.
#[derive(Debug)]
pub struct GenerateOutcome {
    /// The normalized base-format manifest every conversion started from.
    pub manifest: ManifestInfo,
    pub app_name: String,
    pub findings: Vec<ValidationResult>,
    pub summary: ValidationSummary,
    /// Empty when the manifest is invalid.
    pub conversions: Vec<PlatformConversion>,
    pub report: ManifoldReport,
    pub invalid_manifest: bool,
}

/// Run the generate pipeline: acquire, normalize, validate, convert per platform, report.
///
/// Without a `source`, a default manifest is synthesized from `settings.site_url`. A manifest
/// with error-level findings is reported with `invalid_manifest` set and no conversions; the
/// caller decides whether that is fatal. Nothing is written; see `write_generate_artifacts`.
pub fn run_generate(
    settings: &GenerateSettings,
    source: Option<&dyn ManifestSource>,
    registry: &FormatRegistry,
    catalog: &RuleCatalog,
    tool: ToolInfo,
) -> Result<GenerateOutcome, ToolError> {
    let started_at = Utc::now();
    let targets = resolve_targets(&settings.platforms)?;
    let site_url = settings
        .site_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut manifest = match (source, site_url) {
        (Some(source), _) => source.load_manifest(registry).context("acquire manifest")?,
        (None, Some(site)) => {
            parse_site_url(site).context("acquire manifest")?;
            warn!(site_url = site, "no manifest found, generating a default manifest");
            manifold_acquire::default_manifest(site)
        }
        (None, None) => {
            return Err(anyhow!("A site URL or manifest should be specified.").into());
        }
    };

    match site_url {
        Some(site) => resolve_start_url(&mut manifest, site).context("normalize manifest")?,
        None if !manifest.format_or_base().is_base() => {
            info!(format = %manifest.format_or_base(), "converting the manifest to the base format");
            manifest = Converter::new(registry)
                .to_base(manifest)
                .context("convert manifest to the base format")?;
        }
        None => {}
    }
    apply_short_name(&mut manifest, site_url, settings.short_name.as_deref());
    manifest.generated_from = Some(settings.generated_from.clone());
    manifest.timestamp = Some(manifest_timestamp(started_at));

    let mut rule_platforms: Vec<&str> = Vec::with_capacity(targets.len() + 1);
    if settings.common_rules {
        rule_platforms.push(COMMON_RULES);
    }
    rule_platforms.extend(targets.iter().map(|t| t.id));

    let findings =
        validate_manifest(&manifest, catalog, &rule_platforms).context("validate manifest")?;
    log_findings(&findings);
    let summary = ValidationSummary::from_results(&findings);
    let invalid_manifest = !summary.is_valid();

    let app_name = sanitize_name(
        manifest
            .str_member("short_name")
            .or_else(|| manifest.str_member("name"))
            .unwrap_or_default(),
    );

    let mut conversions = Vec::new();
    if invalid_manifest {
        error!(
            errors = summary.errors,
            "manifest is not valid, skipping platform conversions"
        );
    } else {
        let converter = Converter::new(registry);
        for &target in &targets {
            let result = converter.convert_to(manifest.clone(), &target.format());
            match &result {
                Ok(_) => info!(platform = target.id, format = %target.format(), "converted manifest"),
                Err(e) => warn!(platform = target.id, error = %e, "platform conversion failed"),
            }
            conversions.push(PlatformConversion {
                target,
                result,
            });
        }
    }

    let report = build_report(
        &manifest,
        &app_name,
        &targets,
        &findings,
        &summary,
        &conversions,
        tool,
        started_at,
    )
    .context("build report")?;

    debug!(
        app = %app_name,
        findings = findings.len(),
        converted = conversions.iter().filter(|c| c.result.is_ok()).count(),
        "generate complete"
    );

    Ok(GenerateOutcome {
        manifest,
        app_name,
        findings,
        summary,
        conversions,
        report,
        invalid_manifest,
    })
}

/// Write every converted manifest plus `report.json` / `report.md` under `<out_dir>/<app>/`.
pub fn write_generate_artifacts(
    outcome: &GenerateOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    let app_dir = out_dir.join(&outcome.app_name);
    writer.create_dir_all(&app_dir)?;

    for conversion in &outcome.conversions {
        let Ok(manifest) = &conversion.result else {
            continue;
        };
        let target = conversion.target;
        let bytes = artifact_contents(target, manifest)
            .with_context(|| format!("render {} manifest", target.id))?;
        let path = app_dir.join(target.id).join(target.manifest_file);
        writer.write_file(&path, bytes.as_bytes())?;
        debug!(path = %path, "wrote platform manifest");
    }

    let report_json = serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
    writer.write_file(&app_dir.join("report.json"), report_json.as_bytes())?;

    let report_md = render_report_md(&outcome.report);
    writer.write_file(&app_dir.join("report.md"), report_md.as_bytes())?;

    Ok(())
}

fn artifact_contents(target: &PlatformTarget, manifest: &ManifestInfo) -> anyhow::Result<String> {
    if target.format() == FormatId::WINDOWS10 {
        return manifest
            .str_member("rawData")
            .map(str::to_string)
            .ok_or_else(|| anyhow!("converted manifest carries no rawData"));
    }
    Ok(manifold_acquire::manifest_to_string(manifest)?)
}

/// Requested platforms in order, first occurrence kept.
fn resolve_targets(platforms: &[String]) -> Result<Vec<&'static PlatformTarget>, ToolError> {
    if platforms.is_empty() {
        return Err(anyhow!("at least one platform must be specified").into());
    }
    let mut targets: Vec<&'static PlatformTarget> = Vec::with_capacity(platforms.len());
    for id in platforms {
        let target = platform::lookup(id).ok_or_else(|| {
            anyhow!(
                "unknown platform '{}' (expected one of: {})",
                id,
                platform::all_platform_ids().join(", ")
            )
        })?;
        if !targets.iter().any(|t| t.id == target.id) {
            targets.push(target);
        }
    }
    Ok(targets)
}

fn log_findings(findings: &[ValidationResult]) {
    for finding in findings {
        let message = format_validation_message(finding);
        match finding.level {
            ValidationLevel::Error => error!(platform = %finding.platform, "{}", message),
            ValidationLevel::Warning | ValidationLevel::Suggestion => {
                warn!(platform = %finding.platform, "{}", message)
            }
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS Z`: ISO 8601 with the `T` and fractional seconds blanked out.
pub(crate) fn manifest_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S Z").to_string()
}

pub(crate) fn content_sha256(manifest: &ManifestInfo) -> anyhow::Result<String> {
    let bytes = serde_json::to_vec(&manifest.content).context("serialize manifest content")?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[allow(clippy::too_many_arguments)]
fn build_report(
    manifest: &ManifestInfo,
    app_name: &str,
    targets: &[&'static PlatformTarget],
    findings: &[ValidationResult],
    summary: &ValidationSummary,
    conversions: &[PlatformConversion],
    tool: ToolInfo,
    started_at: DateTime<Utc>,
) -> anyhow::Result<ManifoldReport> {
    let platforms: Vec<PlatformRecord> = if conversions.is_empty() {
        targets
            .iter()
            .map(|t| PlatformRecord {
                platform: t.id.to_string(),
                format: t.format().to_string(),
                status: PlatformStatus::Skipped,
                artifact: None,
                error: None,
            })
            .collect()
    } else {
        conversions
            .iter()
            .map(|c| match &c.result {
                Ok(_) => PlatformRecord {
                    platform: c.target.id.to_string(),
                    format: c.target.format().to_string(),
                    status: PlatformStatus::Converted,
                    artifact: Some(format!("{}/{}", c.target.id, c.target.manifest_file)),
                    error: None,
                },
                Err(e) => PlatformRecord {
                    platform: c.target.id.to_string(),
                    format: c.target.format().to_string(),
                    status: PlatformStatus::Failed,
                    artifact: None,
                    error: Some(e.to_string()),
                },
            })
            .collect()
    };

    let any_failed = platforms
        .iter()
        .any(|p| p.status == PlatformStatus::Failed);

    let mut reasons = Vec::new();
    if !summary.is_valid() {
        reasons.push(reason_tokens::INVALID_MANIFEST.to_string());
    }
    if any_failed {
        reasons.push(reason_tokens::PLATFORM_FAILED.to_string());
    }
    if summary.is_valid() && summary.total() > 0 {
        reasons.push(reason_tokens::ADVISORY_FINDINGS.to_string());
    }

    let status = if !summary.is_valid() {
        ReportStatus::Fail
    } else if any_failed || summary.total() > 0 {
        ReportStatus::Warn
    } else {
        ReportStatus::Pass
    };

    let run = RunInfo {
        id: Uuid::new_v4(),
        started_at: started_at.to_rfc3339(),
        ended_at: Some(Utc::now().to_rfc3339()),
    };
    let verdict = ReportVerdict {
        status,
        counts: *summary,
        reasons,
    };

    let mut report = ManifoldReport::new(tool, run, verdict);
    report.findings = findings.to_vec();
    report.platforms = platforms;
    report.data = Some(json!({
        "app_name": app_name,
        "start_url": manifest.str_member("start_url"),
        "generated_from": manifest.generated_from,
        "generated_url": manifest.generated_url,
        "timestamp": manifest.timestamp,
        "manifest_sha256": content_sha256(manifest)?,
    }));
    Ok(report)
}
