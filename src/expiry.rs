//! Credential expiry status.
//!
//! This module parses expiry dates and classifies how close a credential
//! is to expiring. Days are counted in whole calendar days; time of day is
//! ignored on both sides.
//!
//! | Days until expiry | Status |
//! |-------------------|--------|
//! | below 0 | `Expired` |
//! | 0 to 30 | `ExpiringSoon` |
//! | above 30 | `Active` |
//!
//! # Supported Formats
//!
//! - `YYYY-MM-DD`, `YYYY/MM/DD` - e.g., "2025-03-25"
//! - `DD/MM/YYYY`, `DD-MM-YYYY` - e.g., "25/03/2025" (day first, as issued in Australia)
//! - `D Month YYYY` - e.g., "25 March 2025" or "25 Mar 2025"
//! - `Month D, YYYY` - e.g., "March 25, 2025"
//! - RFC 3339 / ISO 8601 date-times - the calendar date as written is used
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use wwc_validator::expiry::{check_expiry, ExpiryStatus};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//!
//! let check = check_expiry("2025-01-11", today);
//! assert_eq!(check.status, ExpiryStatus::ExpiringSoon);
//! assert_eq!(check.days_until_expiry, Some(10));
//! assert!(check.is_valid);
//!
//! let check = check_expiry("31/12/2024", today);
//! assert_eq!(check.status, ExpiryStatus::Expired);
//! assert!(!check.is_valid);
//! ```

use crate::error::ValidationError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt;

/// Credentials expiring within this many days are `ExpiringSoon`.
pub const EXPIRING_SOON_DAYS: u32 = 30;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Lifecycle status of a credential.
///
/// Serializes as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpiryStatus {
    /// More than the warning window remains.
    Active,
    /// Expires today or within the warning window.
    #[cfg_attr(feature = "serde", serde(rename = "Expiring Soon", alias = "ExpiringSoon"))]
    ExpiringSoon,
    /// The expiry date has passed.
    Expired,
    /// The expiry date is missing or unparseable.
    Invalid,
    /// No status could be determined.
    #[default]
    Unknown,
}

impl ExpiryStatus {
    /// All statuses.
    pub const ALL: [ExpiryStatus; 5] = [
        Self::Active,
        Self::ExpiringSoon,
        Self::Expired,
        Self::Invalid,
        Self::Unknown,
    ];

    /// Returns the display label (e.g. `"Expiring Soon"`).
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
            Self::Invalid => "Invalid",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns true for statuses a credential may be accepted with.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Active | Self::ExpiringSoon)
    }

    /// Parses a status from its label or variant name.
    ///
    /// Case, spaces, hyphens and underscores are ignored, so `"Expiring
    /// Soon"`, `"ExpiringSoon"` and `"expiring_soon"` all parse.
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "active" => Some(Self::Active),
            "expiringsoon" => Some(Self::ExpiringSoon),
            "expired" => Some(Self::Expired),
            "invalid" => Some(Self::Invalid),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An expiry date as supplied by a caller.
///
/// Text is parsed with [`parse_expiry_date`]; blank text counts as
/// missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryInput<'a> {
    /// No expiry was supplied.
    Missing,
    /// Unparsed text, e.g. from a form field.
    Text(&'a str),
    /// An already parsed date.
    Date(NaiveDate),
}

impl<'a> From<&'a str> for ExpiryInput<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a String> for ExpiryInput<'a> {
    fn from(s: &'a String) -> Self {
        Self::Text(s.as_str())
    }
}

impl<'a> From<Option<&'a str>> for ExpiryInput<'a> {
    fn from(s: Option<&'a str>) -> Self {
        s.map_or(Self::Missing, Self::Text)
    }
}

impl From<NaiveDate> for ExpiryInput<'_> {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<Option<NaiveDate>> for ExpiryInput<'_> {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(Self::Missing, Self::Date)
    }
}

impl From<NaiveDateTime> for ExpiryInput<'_> {
    fn from(dt: NaiveDateTime) -> Self {
        Self::Date(dt.date())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for ExpiryInput<'_> {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::Date(dt.date_naive())
    }
}

/// Outcome of checking an expiry date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryCheck {
    /// True for `Active` and `ExpiringSoon`.
    pub is_valid: bool,
    /// Lifecycle status.
    pub status: ExpiryStatus,
    /// Problems and warnings, in order.
    pub errors: Vec<ValidationError>,
    /// Whole days from today to the expiry date; negative once expired.
    pub days_until_expiry: Option<i64>,
    /// The parsed expiry date.
    pub expiry_date: Option<NaiveDate>,
}

impl ExpiryCheck {
    fn invalid(error: ValidationError) -> Self {
        Self {
            is_valid: false,
            status: ExpiryStatus::Invalid,
            errors: vec![error],
            days_until_expiry: None,
            expiry_date: None,
        }
    }
}

/// Parses an expiry date string.
///
/// # Errors
///
/// `MissingExpiry` for blank input, `UnparseableExpiry` when no supported
/// format matches.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use wwc_validator::expiry::parse_expiry_date;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 25).unwrap();
/// assert_eq!(parse_expiry_date("2025-03-25"), Ok(date));
/// assert_eq!(parse_expiry_date("25/03/2025"), Ok(date));
/// assert_eq!(parse_expiry_date("25 March 2025"), Ok(date));
/// assert_eq!(parse_expiry_date("2025-03-25T23:59:59+10:00"), Ok(date));
/// assert!(parse_expiry_date("next tuesday").is_err());
/// ```
pub fn parse_expiry_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::MissingExpiry);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or(ValidationError::UnparseableExpiry)
}

/// Returns whole calendar days from `today` to `expiry`.
#[inline]
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    expiry.signed_duration_since(today).num_days()
}

/// Classifies days-until-expiry with a warning window.
///
/// ```
/// use wwc_validator::expiry::{classify, ExpiryStatus};
///
/// assert_eq!(classify(-1, 30), ExpiryStatus::Expired);
/// assert_eq!(classify(0, 30), ExpiryStatus::ExpiringSoon);
/// assert_eq!(classify(30, 30), ExpiryStatus::ExpiringSoon);
/// assert_eq!(classify(31, 30), ExpiryStatus::Active);
/// ```
#[inline]
pub const fn classify(days_until_expiry: i64, window_days: u32) -> ExpiryStatus {
    if days_until_expiry < 0 {
        ExpiryStatus::Expired
    } else if days_until_expiry <= window_days as i64 {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Active
    }
}

/// Checks an expiry date against `today` with the default 30 day window.
pub fn check_expiry<'a>(expiry: impl Into<ExpiryInput<'a>>, today: NaiveDate) -> ExpiryCheck {
    check_expiry_with_window(expiry, today, EXPIRING_SOON_DAYS)
}

/// Checks an expiry date against the local calendar date.
pub fn check_expiry_now<'a>(expiry: impl Into<ExpiryInput<'a>>) -> ExpiryCheck {
    check_expiry(expiry, local_today())
}

/// Checks an expiry date against `today` with a custom warning window.
pub fn check_expiry_with_window<'a>(
    expiry: impl Into<ExpiryInput<'a>>,
    today: NaiveDate,
    window_days: u32,
) -> ExpiryCheck {
    let expiry_date = match expiry.into() {
        ExpiryInput::Missing => return ExpiryCheck::invalid(ValidationError::MissingExpiry),
        ExpiryInput::Text(text) => match parse_expiry_date(text) {
            Ok(date) => date,
            Err(e) => return ExpiryCheck::invalid(e),
        },
        ExpiryInput::Date(date) => date,
    };

    let days = days_until(expiry_date, today);
    let status = classify(days, window_days);

    let errors = match status {
        ExpiryStatus::Expired => vec![ValidationError::Expired { days_ago: -days }],
        ExpiryStatus::ExpiringSoon => vec![ValidationError::ExpiringSoon { days_left: days }],
        _ => Vec::new(),
    };

    ExpiryCheck {
        is_valid: status.is_valid(),
        status,
        errors,
        days_until_expiry: Some(days),
        expiry_date: Some(expiry_date),
    }
}

/// Returns the current date in the local time zone.
#[inline]
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
