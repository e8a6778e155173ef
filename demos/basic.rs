//! Basic WWC credential validation example.
//!
//! Run with: `cargo run --example basic`

use chrono::NaiveDate;
use wwc_validator::{
    detect::detect_region, is_valid, samples::samples, validate, validate_at, BatchValidator,
    ExpiryStatus, ValidationError,
};

fn main() {
    println!("=== Basic WWC Credential Validation ===\n");

    // Example 1: Validate a Victorian credential
    let number = "wwc-0123456-78";
    let expiry = "25/03/2099";
    println!("Validating: {} (expires {})", number, expiry);

    let result = validate(number, expiry);
    println!("  Valid: {}", if result.is_valid { "yes" } else { "no" });
    println!("  Region: {}", result.region_name().unwrap_or("Unknown"));
    println!("  Normalized: {}", result.normalized_number.as_deref().unwrap_or("-"));
    println!("  Status: {}", result.display());
    if let Some(days) = result.days_until_expiry {
        println!("  Days until expiry: {}", days);
    }
    println!();

    // Example 2: Quick region detection
    println!("Region detection:");
    for number in ["WWC1234567E", "blue-12345-2024-8", "1234567/12", "REG-12345678-1", "ABC123"] {
        let region = detect_region(number);
        println!(
            "  {:<20} {}",
            number,
            region.map_or("not recognized", |r| r.name())
        );
    }
    println!();

    // Example 3: Statuses against a fixed date
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
    println!("Sample credentials as of {}:", today);
    for sample in samples() {
        let result = validate_at(sample.number, sample.expiry, today);
        println!(
            "  {:<4} {:<18} {:<14} {}",
            sample.region.code(),
            sample.number,
            result.status.label(),
            result.messages().join("; ")
        );
    }
    println!();

    // Example 4: Handling validation errors
    println!("Error handling examples:");

    let error_cases = [
        ("", "2099-01-01", "Missing number"),
        ("INVALID123", "2099-01-01", "Unrecognized format"),
        ("SA12345678", "", "Missing expiry"),
        ("SA12345678", "31/31/2031", "Unparseable expiry"),
        ("SA12345678", "2019-10-24", "Expired"),
    ];

    for (number, expiry, description) in error_cases {
        let result = validate(number, expiry);
        for error in &result.errors {
            let kind = match error {
                ValidationError::MissingNumber => "MissingNumber",
                ValidationError::UnrecognizedFormat => "UnrecognizedFormat",
                ValidationError::SupportedFormats(_) => continue,
                ValidationError::MissingExpiry => "MissingExpiry",
                ValidationError::UnparseableExpiry => "UnparseableExpiry",
                ValidationError::Expired { .. } => "Expired",
                ValidationError::ExpiringSoon { .. } => "ExpiringSoon",
            };
            println!("  {}: {} - {}", description, kind, error);
        }
    }
    println!();

    // Example 5: Batch summary
    let roster = [
        ("WWC1234567E", "2099-12-31"),
        ("1234567", "2099-06-30"),
        ("REG12345678", "2001-01-15"),
        ("nope", ""),
    ];
    let summary = BatchValidator::new().summarize(&roster);
    println!(
        "Roster: {} checked, {} valid, {} invalid",
        summary.total, summary.valid, summary.invalid
    );

    let expired: Vec<_> = roster
        .iter()
        .filter(|(n, e)| !is_valid(n, *e) && validate(n, *e).status == ExpiryStatus::Expired)
        .map(|(n, _)| *n)
        .collect();
    println!("Expired: {:?}", expired);
}
