#![no_main]

//! Fuzz target for conversion between every pair of registered formats.

use libfuzzer_sys::fuzz_target;
use manifold_formats::{Converter, FormatRegistry};
use manifold_types::ManifestInfo;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(Value::Object(content)) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let registry = FormatRegistry::builtin();
    let converter = Converter::new(&registry);

    for source in registry.ids() {
        for target in registry.ids() {
            let info = ManifestInfo::new(content.clone(), source.clone());
            if let Ok(converted) = converter.convert_to(info, &target) {
                assert_eq!(converted.format.as_ref(), Some(&target));
            }
        }
    }

    // Detection is a pure function of content.
    assert_eq!(registry.detect(&content), registry.detect(&content));
});
