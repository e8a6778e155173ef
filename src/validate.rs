//! Main validation orchestration for WWC credentials.
//!
//! This module combines the number matcher ([`crate::detect`]) and the
//! expiry check ([`crate::expiry`]) into a single [`ValidationResult`].
//!
//! Validation never panics and never returns `Err`: every problem is
//! reported in [`ValidationResult::errors`], number errors first.

use crate::detect::{validate_number_with, NumberCheck};
use crate::display::{status_display, StatusDisplay};
use crate::error::ValidationError;
use crate::expiry::{
    check_expiry_with_window, local_today, ExpiryCheck, ExpiryInput, ExpiryStatus,
    EXPIRING_SOON_DAYS,
};
use crate::formats::FormatTable;
use crate::region::Region;
use chrono::NaiveDate;
use std::borrow::Cow;

/// Complete outcome of validating a credential number and expiry date.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationResult {
    /// True iff the number matched a region and the status is `Active` or
    /// `ExpiringSoon`.
    pub is_valid: bool,
    /// Region of the matching format.
    pub region: Option<Region>,
    /// Lifecycle status from the expiry date.
    pub status: ExpiryStatus,
    /// Number errors followed by expiry errors and warnings.
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_messages"))]
    pub errors: Vec<ValidationError>,
    /// Trimmed, uppercased credential number.
    pub normalized_number: Option<String>,
    /// Parsed expiry date.
    pub expiry_date: Option<NaiveDate>,
    /// Whole days until expiry; negative once expired.
    pub days_until_expiry: Option<i64>,
}

#[cfg(feature = "serde")]
fn serialize_messages<S>(errors: &[ValidationError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(errors.iter().map(|e| e.to_string()))
}

impl ValidationResult {
    /// Combines a number check and an expiry check.
    pub fn from_checks(number: NumberCheck, expiry: ExpiryCheck) -> Self {
        let mut errors = number.errors;
        errors.extend(expiry.errors);

        Self {
            is_valid: number.is_valid && expiry.is_valid,
            region: number.region,
            status: expiry.status,
            errors,
            normalized_number: number.normalized_number,
            expiry_date: expiry.expiry_date,
            days_until_expiry: expiry.days_until_expiry,
        }
    }

    /// Renders every error and warning as a message string.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// Returns the full name of the matched region.
    #[inline]
    pub fn region_name(&self) -> Option<&'static str> {
        self.region.map(|r| r.name())
    }

    /// Returns true if only warnings (no blocking errors) were reported.
    pub fn has_only_warnings(&self) -> bool {
        !self.errors.is_empty() && self.errors.iter().all(|e| !e.is_blocking())
    }

    /// Returns the presentation descriptor for this result's status.
    #[inline]
    pub fn display(&self) -> StatusDisplay {
        status_display(self.status)
    }
}

/// Tunable validation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidatorConfig {
    /// Days before expiry from which a credential is `ExpiringSoon`.
    pub expiring_soon_days: u32,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: EXPIRING_SOON_DAYS,
        }
    }
}

/// A validator bound to a format table and configuration.
///
/// The default validator uses the shared built-in table, so creating one
/// is cheap.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use wwc_validator::{ExpiryStatus, Validator, ValidatorConfig};
///
/// let validator = Validator::new().with_config(ValidatorConfig { expiring_soon_days: 90 });
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
///
/// let result = validator.validate_at("SA12345678", "2025-03-01", today);
/// assert_eq!(result.status, ExpiryStatus::ExpiringSoon);
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    table: Cow<'static, FormatTable>,
    config: ValidatorConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            table: Cow::Borrowed(FormatTable::builtin()),
            config: ValidatorConfig::default(),
        }
    }
}

impl Validator {
    /// Creates a validator over the built-in formats.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the format table.
    pub fn with_table(mut self, table: FormatTable) -> Self {
        self.table = Cow::Owned(table);
        self
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the format table in use.
    #[inline]
    pub fn table(&self) -> &FormatTable {
        &self.table
    }

    /// Returns the configuration in use.
    #[inline]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Matches a credential number against this validator's table.
    #[inline]
    pub fn validate_number(&self, number: &str) -> NumberCheck {
        validate_number_with(&self.table, number)
    }

    /// Checks an expiry date against `today`.
    #[inline]
    pub fn check_expiry<'a>(
        &self,
        expiry: impl Into<ExpiryInput<'a>>,
        today: NaiveDate,
    ) -> ExpiryCheck {
        check_expiry_with_window(expiry, today, self.config.expiring_soon_days)
    }

    /// Validates a credential as of `today`.
    pub fn validate_at<'a>(
        &self,
        number: &str,
        expiry: impl Into<ExpiryInput<'a>>,
        today: NaiveDate,
    ) -> ValidationResult {
        ValidationResult::from_checks(self.validate_number(number), self.check_expiry(expiry, today))
    }

    /// Validates a credential as of the local calendar date.
    #[inline]
    pub fn validate<'a>(&self, number: &str, expiry: impl Into<ExpiryInput<'a>>) -> ValidationResult {
        self.validate_at(number, expiry, local_today())
    }
}

/// Validates a credential number and expiry date.
///
/// This is the primary validation function. It:
/// 1. Normalizes and matches the number against the built-in formats
/// 2. Parses the expiry date
/// 3. Classifies the expiry against today's local date
///
/// # Example
///
/// ```
/// use wwc_validator::{validate, ExpiryStatus, Region};
///
/// let result = validate("WWC-1234567-12", "2099-01-01");
/// assert!(result.is_valid);
/// assert_eq!(result.region, Some(Region::Vic));
/// assert_eq!(result.status, ExpiryStatus::Active);
/// assert!(result.errors.is_empty());
///
/// let result = validate("garbage", "");
/// assert!(!result.is_valid);
/// for msg in result.messages() {
///     println!("{}", msg);
/// }
/// ```
#[inline]
pub fn validate<'a>(number: &str, expiry: impl Into<ExpiryInput<'a>>) -> ValidationResult {
    validate_at(number, expiry, local_today())
}

/// Validates a credential as of a given date.
///
/// Use this when "today" must be fixed, e.g. in tests or when re-checking
/// a stored credential against a past date.
pub fn validate_at<'a>(
    number: &str,
    expiry: impl Into<ExpiryInput<'a>>,
    today: NaiveDate,
) -> ValidationResult {
    ValidationResult::from_checks(
        validate_number_with(FormatTable::builtin(), number),
        check_expiry_with_window(expiry, today, EXPIRING_SOON_DAYS),
    )
}

/// Quickly checks if a credential is currently acceptable.
///
/// ```
/// use wwc_validator::is_valid;
///
/// assert!(is_valid("REG12345678", "2099-12-31"));
/// assert!(!is_valid("REG12345678", "2000-01-01"));
/// ```
#[inline]
pub fn is_valid<'a>(number: &str, expiry: impl Into<ExpiryInput<'a>>) -> bool {
    validate(number, expiry).is_valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{RegionFormat, REGION_FORMATS};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_valid_active() {
        let result = validate_at("WWC-1234567-12", "2099-01-01", today());
        assert!(result.is_valid);
        assert_eq!(result.region, Some(Region::Vic));
        assert_eq!(result.status, ExpiryStatus::Active);
        assert!(result.errors.is_empty());
        assert_eq!(result.normalized_number.as_deref(), Some("WWC-1234567-12"));
    }

    #[test]
    fn test_every_region_with_future_expiry() {
        for format in &REGION_FORMATS {
            let result = validate_at(&format.example, "2030-01-01", today());
            assert!(result.is_valid, "{}", format.example);
            assert_eq!(result.region, Some(format.region));
        }
    }

    #[test]
    fn test_missing_number() {
        let result = validate_at("", "2025-01-01", today());
        assert!(!result.is_valid);
        assert_eq!(result.errors[0], ValidationError::MissingNumber);
        assert_eq!(result.messages()[0], "credential number is required");
        // number errors come first, then the expiry's own message
        assert_eq!(result.errors[1], ValidationError::Expired { days_ago: 165 });
    }

    #[test]
    fn test_expired_region_still_reported() {
        let result = validate_at("SA12345678", "2020-01-01", today());
        assert!(!result.is_valid);
        assert_eq!(result.region, Some(Region::Sa));
        assert_eq!(result.status, ExpiryStatus::Expired);
    }

    #[test]
    fn test_garbage_and_missing_expiry() {
        let result = validate_at("garbage", "", today());
        assert!(!result.is_valid);
        assert_eq!(result.status, ExpiryStatus::Invalid);
        assert!(result.errors.contains(&ValidationError::UnrecognizedFormat));
        assert!(result.errors.contains(&ValidationError::MissingExpiry));
        assert_eq!(result.errors.last(), Some(&ValidationError::MissingExpiry));
        assert_eq!(result.normalized_number.as_deref(), Some("GARBAGE"));
    }

    #[test]
    fn test_expiring_soon_is_valid_with_warning() {
        let result = validate_at("1234567", today() + Duration::days(5), today());
        assert!(result.is_valid);
        assert_eq!(result.status, ExpiryStatus::ExpiringSoon);
        assert!(result.has_only_warnings());
        assert_eq!(result.messages(), vec!["credential expires in 5 days"]);
    }

    #[test]
    fn test_valid_number_bad_expiry() {
        let result = validate_at("1234567/12", "31/31/2031", today());
        assert!(!result.is_valid);
        assert_eq!(result.region, Some(Region::Wa));
        assert_eq!(result.status, ExpiryStatus::Invalid);
        assert_eq!(result.errors, vec![ValidationError::UnparseableExpiry]);
        assert!(!result.has_only_warnings());
    }

    #[test]
    fn test_validity_invariant() {
        let expiries = ["", "bad", "2000-01-01", "2025-06-15", "2025-07-15", "2099-01-01"];
        let numbers = ["", "WWC1234567E", "nope", "YELLOW-00000-2023-9"];
        for number in numbers {
            for expiry in expiries {
                let r = validate_at(number, expiry, today());
                assert_eq!(
                    r.is_valid,
                    r.region.is_some() && r.status.is_valid(),
                    "{} / {}",
                    number,
                    expiry
                );
            }
        }
    }

    #[test]
    fn test_custom_table() {
        let table = FormatTable::new([RegionFormat::new(Region::Nt, r"NT-\d{4}", "NT-1234")]).unwrap();
        let validator = Validator::new().with_table(table);

        let result = validator.validate_at("nt-1234", "2099-01-01", today());
        assert!(result.is_valid);
        assert_eq!(result.region, Some(Region::Nt));

        let result = validator.validate_at("1234567", "2099-01-01", today());
        assert!(!result.is_valid);
        assert_eq!(
            result.errors[1],
            ValidationError::SupportedFormats("NT: NT-1234".into())
        );
    }

    #[test]
    fn test_custom_window() {
        let validator = Validator::new().with_config(ValidatorConfig {
            expiring_soon_days: 7,
        });
        let result = validator.validate_at("SA12345678", today() + Duration::days(10), today());
        assert_eq!(result.status, ExpiryStatus::Active);
        assert_eq!(validator.config().expiring_soon_days, 7);
    }

    #[test]
    fn test_zero_window_flags_expiry_day() {
        let validator = Validator::new().with_config(ValidatorConfig {
            expiring_soon_days: 0,
        });
        let result = validator.validate_at("1234567", today(), today());
        assert!(result.is_valid);
        assert_eq!(result.status, ExpiryStatus::ExpiringSoon);
        assert_eq!(result.messages(), vec!["credential expires today".to_string()]);
    }

    #[test]
    fn test_default_validator_matches_free_fn() {
        let validator = Validator::new();
        for (number, expiry) in [("SA12345678", "2020-01-01"), ("x", "2099-01-01")] {
            assert_eq!(
                validator.validate_at(number, expiry, today()),
                validate_at(number, expiry, today())
            );
        }
        assert_eq!(validator.table().len(), 8);
    }

    #[test]
    fn test_display_follows_status() {
        let result = validate_at("SA12345678", "2020-01-01", today());
        assert_eq!(result.display().label, "Expired");
        assert_eq!(result.region_name(), Some("South Australia"));
    }

    #[test]
    fn test_is_valid_now() {
        assert!(is_valid("BLUE-12345-2024-1", "2099-01-01"));
        assert!(!is_valid("BLUE-12345-2024-1", "2001-01-01"));
        assert!(!is_valid("", "2099-01-01"));
    }
}
