//! Golden fixture tests for format detection and conversion.
//!
//! Each directory under `tests/fixtures/` contains:
//!
//! - `input.json` - a manifest in some registered format
//! - `detected.txt` - the format id the detector must report
//! - `expected.<format>.json` - the content `convert_to(<format>)` must produce

use fs_err as fs;
use manifold_formats::{Converter, FormatRegistry};
use manifold_types::{FormatId, ManifestContent, ManifestInfo};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn read_object(path: &Path) -> ManifestContent {
    let text = fs::read_to_string(path).expect("read fixture");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
    value.as_object().cloned().expect("fixture is an object")
}

fn expected_targets(dir: &Path) -> Vec<(FormatId, PathBuf)> {
    let mut targets: Vec<(FormatId, PathBuf)> = fs::read_dir(dir)
        .expect("read fixture dir")
        .filter_map(|entry| {
            let path = entry.expect("dir entry").path();
            let name = path.file_name()?.to_str()?.to_string();
            let format = name.strip_prefix("expected.")?.strip_suffix(".json")?;
            Some((FormatId::new(format), path))
        })
        .collect();
    targets.sort();
    targets
}

fn run_fixture(name: &str) {
    let dir = fixtures_dir().join(name);
    let registry = FormatRegistry::builtin();
    let converter = Converter::new(&registry);

    let input = read_object(&dir.join("input.json"));
    let detected = fs::read_to_string(dir.join("detected.txt")).expect("detected.txt");
    let format = registry.detect(&input).expect("format detected");
    assert_eq!(format, FormatId::new(detected.trim()), "fixture {name}");

    let targets = expected_targets(&dir);
    assert!(!targets.is_empty(), "fixture {name} has no expectations");

    for (target, path) in targets {
        let info = ManifestInfo::new(input.clone(), format.clone());
        let converted = converter
            .convert_to(info, &target)
            .unwrap_or_else(|e| panic!("fixture {name} -> {target}: {e}"));
        assert_eq!(converted.format, Some(target.clone()));
        assert_eq!(
            serde_json::Value::Object(converted.content),
            serde_json::Value::Object(read_object(&path)),
            "fixture {name} -> {target}"
        );
    }
}

#[test]
fn chromeos_hosted_app() {
    run_fixture("chromeos_hosted_app");
}

#[test]
fn w3c_full() {
    run_fixture("w3c_full");
}

#[test]
fn firefox_webapp() {
    run_fixture("firefox_webapp");
}

#[test]
fn empty_object_is_undetected_and_unconvertible() {
    let registry = FormatRegistry::builtin();
    let empty = ManifestContent::new();
    assert_eq!(registry.detect(&empty), None);

    let converter = Converter::new(&registry);
    for target in registry.ids() {
        let err = converter
            .convert_to(ManifestInfo::default(), &target)
            .expect_err("empty manifest");
        assert!(
            err.to_string().starts_with("invalid manifest format"),
            "{target}: {err}"
        );
    }
}

#[test]
fn w3c_to_windows10_fills_exact_icon_slots() {
    let registry = FormatRegistry::builtin();
    let input = read_object(&fixtures_dir().join("w3c_full").join("input.json"));
    let converted = Converter::new(&registry)
        .convert_to(
            ManifestInfo::new(input, FormatId::base()),
            &FormatId::new("windows10"),
        )
        .expect("convert");

    assert_eq!(
        converted.content["icons"],
        serde_json::json!({"620x300": "img/wide.png"})
    );
    let raw = converted.content["rawData"].as_str().expect("rawData");
    assert!(raw.contains("<DisplayName>Example</DisplayName>"));
    assert!(raw.contains(r#"Square44x44Logo="""#));
    assert!(raw.contains(r#"<uap:Rotation Preference="portrait" />"#));
}

#[test]
fn provenance_survives_conversion() {
    let registry = FormatRegistry::builtin();
    let input = read_object(&fixtures_dir().join("chromeos_hosted_app").join("input.json"));
    let mut info = ManifestInfo::new(input, FormatId::new("chromeos"));
    info.generated_from = Some("CLI".to_string());
    info.generated_url = Some("manifest.json".to_string());

    let converted = Converter::new(&registry)
        .convert_to(info, &FormatId::new("firefox"))
        .expect("convert");
    assert_eq!(converted.generated_from.as_deref(), Some("CLI"));
    assert_eq!(converted.generated_url.as_deref(), Some("manifest.json"));
}
