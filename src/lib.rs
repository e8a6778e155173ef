//! # wwc_validator
//!
//! Validation library for Australian Working With Children (WWC)
//! credentials.
//!
//! ## Features
//!
//! - Region detection for all eight state and territory number formats
//! - Expiry date parsing and lifecycle status (active, expiring soon, expired)
//! - Status presentation (label, colour, icon) for UIs
//! - Custom format tables, loadable from JSON
//! - Multiple interfaces: library, CLI, REST API, WASM
//!
//! ## Quick Start
//!
//! ```rust
//! use wwc_validator::{validate, is_valid, ExpiryStatus, Region};
//!
//! let result = validate("wwc-1234567-12", "2099-03-25");
//! assert!(result.is_valid);
//! assert_eq!(result.region, Some(Region::Vic));
//! assert_eq!(result.status, ExpiryStatus::Active);
//! assert_eq!(result.normalized_number.as_deref(), Some("WWC-1234567-12"));
//!
//! // Quick boolean check
//! assert!(is_valid("1234567/12", "2099-01-01"));
//! assert!(!is_valid("1234567/12", "2001-01-01"));
//! ```
//!
//! ## Fixed Dates
//!
//! Status depends on "today". Pin it for reproducible results:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use wwc_validator::{validate_at, ExpiryStatus};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//!
//! let result = validate_at("REG12345678", "15/01/2025", today);
//! assert!(result.is_valid);
//! assert_eq!(result.status, ExpiryStatus::ExpiringSoon);
//! assert_eq!(result.messages(), vec!["credential expires in 14 days"]);
//!
//! let result = validate_at("SA12345678", "2019-10-24", today);
//! assert!(!result.is_valid);
//! assert_eq!(result.status, ExpiryStatus::Expired);
//! ```
//!
//! ## Errors
//!
//! Validation never fails outright. Problems are collected in
//! [`ValidationResult::errors`], number errors first:
//!
//! ```rust
//! use wwc_validator::{validate, ValidationError};
//!
//! let result = validate("INVALID123", "");
//! assert!(!result.is_valid);
//! assert_eq!(result.errors[0], ValidationError::UnrecognizedFormat);
//! assert_eq!(result.errors.last(), Some(&ValidationError::MissingExpiry));
//! ```
//!
//! ## Batch Processing
//!
//! ```rust
//! use wwc_validator::{batch, BatchValidator};
//!
//! let credentials = [
//!     ("WWC1234567E", "2099-12-31"),
//!     ("BLUE-12345-2024-8", "2024-01-12"),
//!     ("invalid", "2099-12-31"),
//! ];
//!
//! let summary = BatchValidator::new().summarize(&credentials);
//! assert_eq!(summary.valid, 1);
//! assert_eq!(summary.expired, 1);
//!
//! let (valid_count, _) = batch::count_valid(&credentials);
//! assert_eq!(valid_count, 1);
//! ```
//!
//! ## Streaming Validation
//!
//! ```rust
//! use wwc_validator::stream::ValidateExt;
//!
//! let credentials = vec![("1234567", "2099-06-30"), ("nope", ""), ("SA12345678", "2099-01-01")];
//! let valid: Vec<_> = credentials.iter().validate_valid_only().collect();
//! assert_eq!(valid.len(), 2);
//! ```
//!
//! ## Supported Formats
//!
//! | Region | Example | Pattern |
//! |--------|---------|---------|
//! | VIC | `WWC-1234567-12` | `WWC-` 7 digits `-` 2 digits |
//! | NSW | `WWC1234567E` | `WWC` 7 digits `E` |
//! | QLD | `BLUE-12345-2024-1` | `BLUE` or `YELLOW`, 5 digits, year, 1 digit |
//! | SA | `SA12345678` | `SA` 8 digits |
//! | WA | `1234567/12` | 7 digits `/` 2 digits |
//! | TAS | `REG12345678` | `REG` 8 digits |
//! | NT | `1234567` | 7 digits |
//! | ACT | `REG-12345678-1` | `REG-` 8 digits `-` 1 digit |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize/Deserialize on public types |
//! | `formats-json` | JSON format table loader |
//! | `parallel` | Rayon-based parallelism |
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |
//! | `wasm` | WebAssembly support |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod detect;
pub mod display;
pub mod error;
pub mod expiry;
pub mod formats;
pub mod region;
pub mod samples;
pub mod stream;
pub mod validate;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use batch::{BatchSummary, BatchValidator, Credential, CredentialSource};
pub use display::{status_display, StatusDisplay};
pub use error::{FormatTableError, ValidationError};
pub use expiry::{ExpiryInput, ExpiryStatus, EXPIRING_SOON_DAYS};
pub use formats::FormatTable;
pub use region::{Region, RegionFormat, REGION_FORMATS};
pub use validate::{is_valid, validate, validate_at, ValidationResult, Validator, ValidatorConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_each_region_end_to_end() {
        let cases = [
            ("WWC-0123456-78", Region::Vic),
            ("WWC1234567E", Region::Nsw),
            ("BLUE-12345-2024-8", Region::Qld),
            ("SA12345678", Region::Sa),
            ("1234567/12", Region::Wa),
            ("REG12345678", Region::Tas),
            ("1234567", Region::Nt),
            ("REG-12345678-1", Region::Act),
        ];
        for (number, region) in cases {
            let result = validate_at(number, "2026-01-01", today());
            assert!(result.is_valid, "{}", number);
            assert_eq!(result.region, Some(region));
            assert_eq!(result.status, ExpiryStatus::Active);
        }
    }

    #[test]
    fn test_reexports_agree() {
        assert_eq!(REGION_FORMATS.len(), FormatTable::builtin().len());
        assert_eq!(EXPIRING_SOON_DAYS, ValidatorConfig::default().expiring_soon_days);
        assert_eq!(status_display(ExpiryStatus::Expired).label, "Expired");
    }

    #[test]
    fn test_error_messages() {
        let result = validate_at("", "", today());
        assert_eq!(
            result.messages(),
            vec!["credential number is required", "expiry date is required"]
        );
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationResult>();
        assert_send_sync::<ValidationError>();
        assert_send_sync::<FormatTableError>();
        assert_send_sync::<Validator>();
        assert_send_sync::<FormatTable>();
        assert_send_sync::<BatchValidator>();
    }
}
