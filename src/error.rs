//! Error types for credential validation.
//!
//! Validation never fails with `Err`: every problem found is collected as a
//! [`ValidationError`] inside the returned
//! [`ValidationResult`](crate::ValidationResult). Only loading a custom
//! format table can fail, with [`FormatTableError`].

use crate::region::Region;
use std::fmt;

/// A problem found while validating a credential.
///
/// The `Display` output is the human-readable message shown to the user.
/// `ExpiringSoon` is a warning: it is reported while the credential is
/// still valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The credential number was empty or only whitespace.
    MissingNumber,

    /// The credential number matched no regional format.
    UnrecognizedFormat,

    /// Help text listing the supported formats, reported after
    /// `UnrecognizedFormat`.
    SupportedFormats(String),

    /// No expiry date was given.
    MissingExpiry,

    /// The expiry date could not be parsed.
    UnparseableExpiry,

    /// The credential has expired.
    Expired {
        /// Whole days elapsed since the expiry date.
        days_ago: i64,
    },

    /// The credential expires within the warning window.
    ExpiringSoon {
        /// Whole days left; 0 means it expires today.
        days_left: i64,
    },
}

impl ValidationError {
    /// Returns true for problems that make a credential invalid.
    ///
    /// `ExpiringSoon` is the only warning.
    #[inline]
    pub const fn is_blocking(&self) -> bool {
        !matches!(self, Self::ExpiringSoon { .. })
    }

    /// Returns true if this came from the number matcher.
    #[inline]
    pub const fn is_number_error(&self) -> bool {
        matches!(
            self,
            Self::MissingNumber | Self::UnrecognizedFormat | Self::SupportedFormats(_)
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNumber => write!(f, "credential number is required"),

            Self::UnrecognizedFormat => {
                write!(f, "credential number format not recognized for any region")
            }

            Self::SupportedFormats(list) => write!(f, "supported formats: {}", list),

            Self::MissingExpiry => write!(f, "expiry date is required"),

            Self::UnparseableExpiry => write!(f, "invalid expiry date format"),

            Self::Expired { days_ago } => {
                write!(f, "credential expired {} days ago", days_ago)
            }

            Self::ExpiringSoon { days_left: 0 } => write!(f, "credential expires today"),

            Self::ExpiringSoon { days_left } => {
                write!(f, "credential expires in {} days", days_left)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors that can occur while building or loading a format table.
#[derive(Debug)]
pub enum FormatTableError {
    /// The table had no formats.
    Empty,

    /// A format named a region code that does not exist.
    UnknownRegion(String),

    /// Two entries of a code-keyed table named the same region.
    DuplicateRegion(Region),

    /// A format's pattern failed to compile.
    InvalidPattern {
        /// Region code of the offending format.
        code: String,
        /// Compiler message from the regex engine.
        message: String,
    },

    /// The table source could not be parsed.
    Parse(String),

    /// Reading the table source failed.
    Io(std::io::Error),
}

impl fmt::Display for FormatTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "format table has no entries"),
            Self::UnknownRegion(code) => write!(f, "unknown region code '{}'", code),
            Self::DuplicateRegion(region) => {
                write!(f, "region {} is listed more than once", region.code())
            }
            Self::InvalidPattern { code, message } => {
                write!(f, "invalid pattern for {}: {}", code, message)
            }
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FormatTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FormatTableError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ValidationError::MissingNumber.to_string(),
            "credential number is required"
        );
        assert_eq!(
            ValidationError::MissingExpiry.to_string(),
            "expiry date is required"
        );
        assert_eq!(
            ValidationError::UnparseableExpiry.to_string(),
            "invalid expiry date format"
        );
        assert_eq!(
            ValidationError::Expired { days_ago: 1 }.to_string(),
            "credential expired 1 days ago"
        );
        assert_eq!(
            ValidationError::ExpiringSoon { days_left: 0 }.to_string(),
            "credential expires today"
        );
        assert_eq!(
            ValidationError::ExpiringSoon { days_left: 12 }.to_string(),
            "credential expires in 12 days"
        );
        assert_eq!(
            ValidationError::SupportedFormats("NT: 1234567".into()).to_string(),
            "supported formats: NT: 1234567"
        );
    }

    #[test]
    fn test_unrecognized_mentions_format() {
        let msg = ValidationError::UnrecognizedFormat.to_string();
        assert!(msg.contains("format not recognized"));
    }

    #[test]
    fn test_blocking() {
        assert!(ValidationError::MissingNumber.is_blocking());
        assert!(ValidationError::Expired { days_ago: 3 }.is_blocking());
        assert!(!ValidationError::ExpiringSoon { days_left: 3 }.is_blocking());
    }

    #[test]
    fn test_number_error() {
        assert!(ValidationError::UnrecognizedFormat.is_number_error());
        assert!(ValidationError::SupportedFormats(String::new()).is_number_error());
        assert!(!ValidationError::MissingExpiry.is_number_error());
    }

    #[test]
    fn test_table_error_display() {
        let err = FormatTableError::InvalidPattern {
            code: "VIC".into(),
            message: "unclosed group".into(),
        };
        assert_eq!(err.to_string(), "invalid pattern for VIC: unclosed group");
        assert_eq!(FormatTableError::Empty.to_string(), "format table has no entries");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationError>();
        assert_send_sync::<FormatTableError>();
    }
}
