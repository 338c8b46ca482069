#![no_main]

//! Fuzz target for manifest acquisition.
//!
//! Arbitrary bytes go through BOM stripping, JSON parsing, detection and the
//! Chrome OS to base conversion. Every outcome must be a value or an error.

use libfuzzer_sys::fuzz_target;
use manifold_formats::FormatRegistry;
use manifold_types::FormatId;

fuzz_target!(|data: &[u8]| {
    let registry = FormatRegistry::builtin();

    let detected = manifold_acquire::process_manifest_contents(data, &registry, None);
    if let Ok(manifest) = &detected {
        // Anything acquired is either base or a format the registry can detect.
        let format = manifest.format_or_base();
        assert!(registry.contains(&format));
        assert!(format != FormatId::CHROMEOS);
        let _ = manifold_acquire::manifest_to_string(manifest);
    }

    for id in registry.ids() {
        let _ = manifold_acquire::process_manifest_contents(data, &registry, Some(&id));
    }
});
