//! Fuzz target for YAML configuration parsing.
//!
//! YAML is the most permissive accepted format; parsing and resolving
//! arbitrary text should only ever return errors.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sc_config::{resolve, RawConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(raw) = RawConfig::from_yaml_str(text) {
            let _ = resolve(&raw);
        }
    }
});
