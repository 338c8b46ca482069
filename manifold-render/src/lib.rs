//! Rendering helpers (markdown and console lines) for human-readable artifacts.

use manifold_types::report::{ManifoldReport, PlatformStatus, ReportStatus};
use manifold_types::{ValidationResult, ValidationSummary};

/// One-line console form of a finding:
/// `Manifest validation WARNING    - <description> (member: <member>).`
pub fn format_validation_message(result: &ValidationResult) -> String {
    format!(
        "Manifest validation {:<10} - {} (member: {}).",
        result.level.as_str().to_uppercase(),
        result.description,
        result.member
    )
}

/// Console listing of findings followed by a verdict line.
pub fn render_validation_text(results: &[ValidationResult]) -> String {
    let mut out = String::new();
    for r in results {
        out.push_str(&format!("[{}] {}\n", r.platform, format_validation_message(r)));
    }
    let summary = ValidationSummary::from_results(results);
    out.push_str(&format!(
        "{}: {} error(s), {} warning(s), {} suggestion(s)\n",
        if summary.is_valid() { "valid" } else { "invalid" },
        summary.errors,
        summary.warnings,
        summary.suggestions
    ));
    out
}

pub fn render_findings_md(results: &[ValidationResult]) -> String {
    let mut out = String::new();
    out.push_str("## Findings\n\n");
    if results.is_empty() {
        out.push_str("_No findings._\n");
        return out;
    }

    out.push_str("| Level | Platform | Member | Code | Description |\n");
    out.push_str("|-------|----------|--------|------|-------------|\n");
    for r in results {
        out.push_str(&format!(
            "| `{}` | {} | `{}` | `{}` | {} |\n",
            r.level,
            r.platform,
            r.member,
            r.code,
            escape_cell(&r.description)
        ));
    }
    out
}

pub fn render_report_md(report: &ManifoldReport) -> String {
    let mut out = String::new();
    out.push_str("# manifold report\n\n");
    out.push_str(&format!(
        "- Status: `{}`\n",
        status_label(report.verdict.status)
    ));
    let counts = &report.verdict.counts;
    out.push_str(&format!(
        "- Findings: {} ({} errors, {} warnings, {} suggestions)\n",
        counts.total(),
        counts.errors,
        counts.warnings,
        counts.suggestions
    ));
    if !report.verdict.reasons.is_empty() {
        out.push_str(&format!(
            "- Reasons: {}\n",
            report.verdict.reasons.join(", ")
        ));
    }
    if let Some(data) = &report.data {
        if let Some(url) = data.get("generated_url").and_then(|v| v.as_str()) {
            out.push_str(&format!("- Source: `{}`\n", url));
        }
        if let Some(sha) = data.get("manifest_sha256").and_then(|v| v.as_str()) {
            out.push_str(&format!("- Manifest sha256: `{}`\n", sha));
        }
    }
    out.push('\n');

    out.push_str("## Platforms\n\n");
    if report.platforms.is_empty() {
        out.push_str("_No platforms converted._\n\n");
    } else {
        for (i, p) in report.platforms.iter().enumerate() {
            out.push_str(&format!("### {}. {}\n\n", i + 1, p.platform));
            out.push_str(&format!("- Format: `{}`\n", p.format));
            out.push_str(&format!("- Status: `{}`\n", platform_label(p.status)));
            if let Some(artifact) = &p.artifact {
                out.push_str(&format!("- Artifact: `{}`\n", artifact));
            }
            if let Some(err) = &p.error {
                out.push_str(&format!("- Error: {}\n", err));
            }
            out.push('\n');
        }
    }

    out.push_str(&render_findings_md(&report.findings));
    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

fn status_label(s: ReportStatus) -> &'static str {
    match s {
        ReportStatus::Pass => "pass",
        ReportStatus::Warn => "warn",
        ReportStatus::Fail => "fail",
    }
}

fn platform_label(s: PlatformStatus) -> &'static str {
    match s {
        PlatformStatus::Converted => "converted",
        PlatformStatus::Failed => "failed",
        PlatformStatus::Skipped => "skipped",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifold_types::ValidationLevel;
    use pretty_assertions::assert_eq;

    fn finding(level: ValidationLevel) -> ValidationResult {
        ValidationResult {
            level,
            platform: "windows10".to_string(),
            member: "icons".to_string(),
            code: "missing-image-group".to_string(),
            description: "An app icon is required".to_string(),
            data: None,
        }
    }

    #[test]
    fn message_pads_level_to_ten_columns() {
        assert_eq!(
            format_validation_message(&finding(ValidationLevel::Warning)),
            "Manifest validation WARNING    - An app icon is required (member: icons)."
        );
        assert_eq!(
            format_validation_message(&finding(ValidationLevel::Suggestion)),
            "Manifest validation SUGGESTION - An app icon is required (member: icons)."
        );
    }

    #[test]
    fn validation_text_ends_with_verdict() {
        let text = render_validation_text(&[finding(ValidationLevel::Error)]);
        assert!(text.ends_with("invalid: 1 error(s), 0 warning(s), 0 suggestion(s)\n"));
        assert!(text.starts_with("[windows10] Manifest validation ERROR"));
    }

    #[test]
    fn findings_table_escapes_pipes() {
        let mut f = finding(ValidationLevel::Warning);
        f.description = "a | b".to_string();
        let md = render_findings_md(&[f]);
        assert!(md.contains("a \\| b"));
    }

    #[test]
    fn empty_findings() {
        assert_eq!(render_findings_md(&[]), "## Findings\n\n_No findings._\n");
    }
}
