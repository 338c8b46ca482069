//! Unit tests for the manifest loader.

use camino::Utf8PathBuf;
use manifold_acquire::{
    AcquireError, load_manifest_file, manifest_to_string, parse_manifest_bytes,
    process_manifest_contents,
};
use manifold_formats::{ConvertError, FormatRegistry};
use manifold_types::{FormatId, ManifestInfo};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn write_manifest(temp: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(temp.path().join(name)).expect("utf8 path");
    fs::write(&path, contents).expect("write manifest");
    path
}

#[test]
fn test_w3c_manifest_is_returned_as_is() {
    let registry = FormatRegistry::builtin();
    let manifest = process_manifest_contents(
        br#"{"start_url": "/", "name": "App", "mjs_api_access": []}"#,
        &registry,
        None,
    )
    .expect("process");
    assert_eq!(manifest.format, Some(FormatId::base()));
    assert!(manifest.content.contains_key("mjs_api_access"));
}

#[test]
fn test_chromeos_manifest_is_converted_to_base() {
    let registry = FormatRegistry::builtin();
    let manifest = process_manifest_contents(
        br#"{
            "app": {"launch": {"web_url": "https://x.test"}},
            "name": "X",
            "version": "1",
            "manifest_version": 2
        }"#,
        &registry,
        None,
    )
    .expect("process");
    assert_eq!(manifest.format, Some(FormatId::base()));
    assert_eq!(
        serde_json::Value::Object(manifest.content),
        json!({"start_url": "https://x.test", "name": "X", "icons": []})
    );
}

#[test]
fn test_firefox_manifest_keeps_its_format() {
    let registry = FormatRegistry::builtin();
    let manifest =
        process_manifest_contents(br#"{"name": "X", "launch_path": "/"}"#, &registry, None)
            .expect("process");
    assert_eq!(manifest.format, Some(FormatId::new("firefox")));
}

#[test]
fn test_empty_object_is_undetected() {
    let registry = FormatRegistry::builtin();
    let err = process_manifest_contents(b"{}", &registry, None).expect_err("undetected");
    assert!(matches!(err, AcquireError::UndetectedFormat));
    assert!(err.to_string().starts_with("invalid manifest format"));
}

#[test]
fn test_malformed_json() {
    let registry = FormatRegistry::builtin();
    let err = process_manifest_contents(b"{not json", &registry, None).expect_err("json");
    assert!(matches!(err, AcquireError::Json { .. }));
}

#[test]
fn test_non_object_json() {
    let registry = FormatRegistry::builtin();
    let err = process_manifest_contents(b"[1, 2]", &registry, None).expect_err("array");
    assert!(matches!(err, AcquireError::NotAnObject));
}

#[test]
fn test_parse_bytes_strips_bom() {
    let content = parse_manifest_bytes(b"\xEF\xBB\xBF{\"name\": \"X\"}").expect("parse");
    assert_eq!(content.get("name"), Some(&json!("X")));
    assert!(matches!(
        parse_manifest_bytes(b"\"manifest\""),
        Err(AcquireError::NotAnObject)
    ));
}

#[test]
fn test_format_hint_skips_detection() {
    let registry = FormatRegistry::builtin();
    let manifest = process_manifest_contents(
        br#"{"start_url": "/", "custom": true}"#,
        &registry,
        Some(&FormatId::new("W3C")),
    )
    .expect("process");
    assert_eq!(manifest.format, Some(FormatId::base()));
}

#[test]
fn test_unregistered_format_hint() {
    let registry = FormatRegistry::builtin();
    let err = process_manifest_contents(
        br#"{"start_url": "/"}"#,
        &registry,
        Some(&FormatId::new("tizen")),
    )
    .expect_err("unknown hint");
    assert!(matches!(
        err,
        AcquireError::Conversion(ConvertError::FormatNotRecognized { .. })
    ));
}

#[test]
fn test_load_file_records_path() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_manifest(&temp, "manifest.json", r#"{"start_url": "/"}"#);
    let registry = FormatRegistry::builtin();

    let manifest = load_manifest_file(&path, &registry, None).expect("load");
    assert_eq!(manifest.generated_url.as_deref(), Some(path.as_str()));
}

#[test]
fn test_load_missing_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(temp.path().join("absent.json")).expect("utf8 path");
    let registry = FormatRegistry::builtin();

    let err = load_manifest_file(&path, &registry, None).expect_err("missing");
    assert!(matches!(err, AcquireError::Io { .. }));
}

#[test]
fn test_manifest_to_string_uses_four_space_indent() {
    let manifest = ManifestInfo::new(
        json!({"start_url": "/"}).as_object().cloned().expect("object"),
        FormatId::base(),
    );
    let text = manifest_to_string(&manifest).expect("serialize");
    assert_eq!(text, "{\n    \"start_url\": \"/\"\n}");

    let err = manifest_to_string(&ManifestInfo::default()).expect_err("empty");
    assert!(matches!(err, AcquireError::EmptyManifest));
}
