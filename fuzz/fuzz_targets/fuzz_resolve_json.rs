//! Fuzz target for JSON configuration resolution.
//!
//! Tests that parsing and resolving arbitrary JSON never panics, and that
//! every successful resolution survives a serialize/resolve round trip.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sc_config::{resolve, RawConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    if let Ok(settings) = resolve(&RawConfig::from_value(value)) {
        let raw = RawConfig::from_value(settings.to_value().expect("settings serialize"));
        let again = resolve(&raw).expect("serialized settings resolve");
        assert_eq!(again, settings);
    }
});
