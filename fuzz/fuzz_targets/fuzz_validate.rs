//! Fuzz target for credential validation.
//!
//! Tests that validation never panics and that validity always agrees
//! with the region and status it reports.

#![no_main]

use arbitrary::Arbitrary;
use chrono::{Duration, NaiveDate};
use libfuzzer_sys::fuzz_target;
use wwc_validator::{detect::normalize, is_valid, validate, validate_at};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    number: &'a str,
    expiry: &'a str,
    day_offset: i32,
}

fuzz_target!(|input: Input<'_>| {
    let base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let today = base + Duration::days(i64::from(input.day_offset % 1_000_000));

    let result = validate_at(input.number, input.expiry, today);
    assert_eq!(
        result.is_valid,
        result.region.is_some() && result.status.is_valid()
    );
    if let Some(normalized) = &result.normalized_number {
        assert_eq!(normalize(normalized), *normalized);
    }

    let _ = validate(input.number, input.expiry);
    let _ = is_valid(input.number, None::<&str>);
    let _ = result.messages();
});
