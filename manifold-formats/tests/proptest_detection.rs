//! Property-based tests for detection and conversion.
//!
//! These tests verify that:
//! - Detection is a pure function of its input
//! - Anything satisfying the base format's constraints is detected as the base format
//! - Conversion either fully succeeds or fails, never leaving partial content
//! - Square icons and the core members survive a base -> chromeos -> base round trip
//! - Platform manifests keep the members the base format can carry through platform -> base -> platform

use manifold_formats::{Converter, FormatRegistry};
use manifold_types::{FormatId, ManifestContent, ManifestInfo, W3cIcon, W3cManifest};
use proptest::prelude::*;
use serde_json::{Value, json};

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("name".to_string()),
        Just("short_name".to_string()),
        Just("start_url".to_string()),
        Just("version".to_string()),
        Just("manifest_version".to_string()),
        Just("app".to_string()),
        Just("launch_path".to_string()),
        Just("icons".to_string()),
        Just("display".to_string()),
        Just("hap_urlAccess".to_string()),
        "[a-z_]{1,12}",
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9:/._ -]{0,16}".prop_map(Value::String),
        Just(json!({"launch": {"web_url": "https://x.test"}})),
        Just(json!([{"src": "a.png", "sizes": "48x48"}])),
        Just(json!({"48": "a.png"})),
    ]
}

fn arb_content() -> impl Strategy<Value = ManifestContent> {
    prop::collection::btree_map(arb_key(), arb_value(), 0..8)
        .prop_map(|m| m.into_iter().collect::<ManifestContent>())
}

fn arb_edge() -> impl Strategy<Value = u32> {
    prop_oneof![Just(16u32), Just(48), Just(96), Just(128), Just(192), Just(512)]
}

/// Numeric-keyed icon map, as Firefox and Chrome OS write it.
fn edge_icons(edges: &std::collections::BTreeSet<u32>) -> Value {
    edges
        .iter()
        .map(|e| (e.to_string(), json!(format!("icons/{e}.png"))))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn select(content: &ManifestContent, names: &[&str]) -> ManifestContent {
    names
        .iter()
        .filter_map(|n| content.get(*n).map(|v| (n.to_string(), v.clone())))
        .collect()
}

fn arb_orientation() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("portrait".to_string()),
        Just("landscape".to_string()),
        Just("any".to_string()),
    ])
}

proptest! {
    /// Detection gives the same answer every time, independent of prior calls.
    #[test]
    fn detection_is_deterministic(content in arb_content(), other in arb_content()) {
        let registry = FormatRegistry::builtin();
        let first = registry.detect(&content);
        let _ = registry.detect(&other);
        prop_assert_eq!(registry.detect(&content), first);
    }

    /// A start_url plus plain base members always detects as the base format.
    #[test]
    fn base_constraints_win(
        name in "[A-Za-z ]{1,20}",
        start in "/[a-z]{0,10}",
        with_vendor in any::<bool>(),
    ) {
        let mut content = ManifestContent::new();
        content.insert("start_url".to_string(), json!(start));
        content.insert("name".to_string(), json!(name));
        if with_vendor {
            content.insert("gcm_sender_id".to_string(), json!("103953800507"));
        }
        prop_assert_eq!(FormatRegistry::builtin().detect(&content), Some(FormatId::base()));
    }

    /// Conversion returns either a tagged result or an error, for every target.
    #[test]
    fn conversion_is_complete_or_failed(content in arb_content()) {
        let registry = FormatRegistry::builtin();
        let converter = Converter::new(&registry);
        let Some(format) = registry.detect(&content) else {
            return Ok(());
        };
        for target in registry.ids() {
            let info = ManifestInfo::new(content.clone(), format.clone());
            if let Ok(out) = converter.convert_to(info, &target) {
                prop_assert_eq!(out.format, Some(target.clone()));
                prop_assert!(!out.content.is_empty());
            }
        }
    }

    /// Members both formats can represent survive base -> chromeos -> base.
    #[test]
    fn chromeos_round_trip(
        name in "[A-Za-z][A-Za-z ]{0,20}",
        path in "[a-z]{0,8}",
        edges in prop::collection::btree_set(arb_edge(), 0..4),
    ) {
        let registry = FormatRegistry::builtin();
        let converter = Converter::new(&registry);

        let icons: Vec<W3cIcon> = edges
            .iter()
            .map(|e| W3cIcon {
                src: format!("icons/{e}.png"),
                sizes: Some(format!("{e}x{e}")),
                ..W3cIcon::default()
            })
            .collect();
        let manifest = W3cManifest {
            start_url: Some(format!("https://x.test/{path}")),
            name: Some(name),
            icons: Some(icons),
            ..W3cManifest::default()
        };
        let info = ManifestInfo::new(manifest.to_content().expect("content"), FormatId::base());

        let chromeos = converter
            .convert_to(info, &FormatId::new("chromeos"))
            .expect("to chromeos");
        let back = converter.to_base(chromeos).expect("back to base");
        let back = W3cManifest::from_content(&back.content).expect("typed");
        prop_assert_eq!(back, manifest);
    }

    /// A Firefox manifest comes back unchanged from firefox -> base -> firefox.
    #[test]
    fn firefox_round_trip(
        name in "[A-Za-z][A-Za-z ]{0,20}",
        description in "[A-Za-z][A-Za-z .]{0,30}",
        launch_path in "/[a-z]{0,8}(\\.html)?",
        orientation in arb_orientation(),
        locale in prop::option::of("[a-z]{2}"),
        fullscreen in any::<bool>(),
        edges in prop::collection::btree_set(arb_edge(), 0..4),
    ) {
        let registry = FormatRegistry::builtin();
        let converter = Converter::new(&registry);
        let firefox = FormatId::new("firefox");

        let mut content = ManifestContent::new();
        content.insert("name".to_string(), json!(name));
        content.insert("description".to_string(), json!(description));
        content.insert("launch_path".to_string(), json!(launch_path));
        if let Some(orientation) = orientation {
            content.insert("orientation".to_string(), json!(orientation));
        }
        if let Some(locale) = locale {
            content.insert("default_locale".to_string(), json!(locale));
        }
        if fullscreen {
            content.insert("fullscreen".to_string(), json!("true"));
        }
        if !edges.is_empty() {
            content.insert("icons".to_string(), edge_icons(&edges));
        }
        prop_assert_eq!(registry.detect(&content), Some(firefox.clone()));

        let base = converter
            .to_base(ManifestInfo::new(content.clone(), firefox.clone()))
            .expect("to base");
        let back = converter.convert_to(base, &firefox).expect("back to firefox");
        prop_assert_eq!(back.content, content);
    }

    /// Name, description, launch URL and icons survive chromeos -> base -> chromeos.
    #[test]
    fn chromeos_platform_round_trip(
        name in "[A-Za-z][A-Za-z ]{0,20}",
        description in prop::option::of("[A-Za-z][A-Za-z .]{0,30}"),
        path in "[a-z]{0,8}",
        version in "[0-9]\\.[0-9]",
        edges in prop::collection::btree_set(arb_edge(), 1..4),
    ) {
        let registry = FormatRegistry::builtin();
        let converter = Converter::new(&registry);
        let chromeos = FormatId::new("chromeos");

        let mut content = ManifestContent::new();
        content.insert("name".to_string(), json!(name));
        if let Some(description) = description {
            content.insert("description".to_string(), json!(description));
        }
        content.insert("version".to_string(), json!(version));
        content.insert("manifest_version".to_string(), json!(2));
        content.insert(
            "app".to_string(),
            json!({"launch": {"web_url": format!("https://x.test/{path}")}}),
        );
        content.insert("icons".to_string(), edge_icons(&edges));
        prop_assert_eq!(registry.detect(&content), Some(chromeos.clone()));

        let base = converter
            .to_base(ManifestInfo::new(content.clone(), chromeos.clone()))
            .expect("to base");
        let back = converter.convert_to(base, &chromeos).expect("back to chromeos");

        let shared = ["name", "description", "app", "icons", "manifest_version"];
        prop_assert_eq!(select(&back.content, &shared), select(&content, &shared));
    }
}
