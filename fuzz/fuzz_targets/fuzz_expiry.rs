//! Fuzz target for expiry date parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use wwc_validator::expiry::{self, ExpiryStatus};

fuzz_target!(|data: &str| {
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    // These should never panic
    let _ = expiry::parse_expiry_date(data);
    let _ = expiry::check_expiry_now(data);
    let check = expiry::check_expiry(data, today);
    let _ = expiry::check_expiry_with_window(data, today, 0);
    let _ = ExpiryStatus::from_label(data);

    // If parsing succeeds, the check must agree with it
    if let Ok(date) = expiry::parse_expiry_date(data) {
        assert_eq!(check.expiry_date, Some(date));
        assert_eq!(check.days_until_expiry, Some(expiry::days_until(date, today)));
    } else {
        assert_eq!(check.status, ExpiryStatus::Invalid);
    }
});
