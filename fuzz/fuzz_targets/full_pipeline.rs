#![no_main]

//! Fuzz target for the generate pipeline over an in-memory manifest.

use libfuzzer_sys::fuzz_target;
use manifold_core::adapters::InMemoryManifestSource;
use manifold_core::{GenerateSettings, run_generate};
use manifold_formats::FormatRegistry;
use manifold_types::report::ToolInfo;
use manifold_validate::RuleCatalog;

fuzz_target!(|data: &[u8]| {
    let registry = FormatRegistry::builtin();
    let catalog = RuleCatalog::builtin();
    let source = InMemoryManifestSource::new(data.to_vec());
    let tool = ToolInfo {
        name: "manifold-fuzz".to_string(),
        version: None,
        commit: None,
    };

    for site_url in [None, Some("https://example.com/")] {
        let settings = GenerateSettings {
            site_url: site_url.map(str::to_string),
            ..GenerateSettings::default()
        };
        if let Ok(outcome) = run_generate(&settings, Some(&source), &registry, &catalog, tool.clone()) {
            // Conversions only ever run for a valid manifest.
            assert!(!outcome.invalid_manifest || outcome.conversions.is_empty());
        }
    }
});
