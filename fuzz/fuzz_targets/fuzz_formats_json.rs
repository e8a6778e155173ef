//! Fuzz target for the JSON format table loader.
//!
//! Tests that loading never panics and that loaded tables are usable.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wwc_validator::FormatTable;

fuzz_target!(|data: &str| {
    if let Ok(table) = FormatTable::from_json(data) {
        assert!(!table.is_empty());
        let _ = table.supported_formats();
        for format in table.formats() {
            let _ = table.find(&format.example);
        }
    }
});
