//! Text tables for the `list-formats` and `list-rules` commands.

use manifold_core::platform;
use manifold_formats::FormatSummary;
use manifold_validate::{RuleCatalog, RuleSummary};

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

pub fn render_formats_text(formats: &[FormatSummary]) -> String {
    let mut out = String::from("Registered formats:\n\n");
    out.push_str(&format!(
        "  {:<12} {:<8} {:<10} SUMMARY\n",
        "ID", "TO-BASE", "FROM-BASE"
    ));
    out.push_str(&format!(
        "  {:<12} {:<8} {:<10} -------\n",
        "--", "-------", "---------"
    ));
    for f in formats {
        let id = if f.base {
            format!("{} *", f.id)
        } else {
            f.id.clone()
        };
        out.push_str(&format!(
            "  {:<12} {:<8} {:<10} {}\n",
            id,
            yes_no(f.to_base),
            yes_no(f.from_base),
            f.summary
        ));
    }
    out.push_str("\n* canonical base format\n");
    out
}

/// Rule table grouped by platform; platforms without rules are still listed.
pub fn render_rules_text(catalog: &RuleCatalog, rules: &[RuleSummary], only: Option<&str>) -> String {
    let mut out = String::new();
    for platform_id in catalog.platforms() {
        if only.is_some_and(|p| !p.eq_ignore_ascii_case(platform_id)) {
            continue;
        }
        let heading = match platform::lookup(platform_id) {
            Some(target) => format!("{} ({})", platform_id, target.display_name),
            None => platform_id.to_string(),
        };
        out.push_str(&format!("{}:\n", heading));

        let mut any = false;
        for rule in rules.iter().filter(|r| r.platform == platform_id) {
            any = true;
            out.push_str(&format!(
                "  {:<24} {:<10} {}\n",
                rule.id,
                rule.level.as_str(),
                rule.summary
            ));
        }
        if !any {
            out.push_str("  (no platform-specific rules)\n");
        }
        out.push('\n');
    }
    out
}
