//! Region detection from credential numbers.
//!
//! Credential numbers are normalized (trimmed and uppercased) and then
//! matched against the format table in order. The first matching format
//! decides the region.
//!
//! # Example
//!
//! ```
//! use wwc_validator::detect::{detect_region, normalize, validate_number};
//! use wwc_validator::Region;
//!
//! assert_eq!(normalize("  wwc-1234567-12  "), "WWC-1234567-12");
//! assert_eq!(detect_region("blue-12345-2024-1"), Some(Region::Qld));
//!
//! let check = validate_number("INVALID123");
//! assert!(!check.is_valid);
//! assert_eq!(check.normalized_number.as_deref(), Some("INVALID123"));
//! ```

use crate::error::ValidationError;
use crate::formats::FormatTable;
use crate::region::Region;

/// Outcome of matching a credential number against the format table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberCheck {
    /// True if the number matched a format.
    pub is_valid: bool,
    /// Region of the matching format.
    pub region: Option<Region>,
    /// Problems found, in order.
    pub errors: Vec<ValidationError>,
    /// Trimmed, uppercased input. `None` only when the input was blank.
    pub normalized_number: Option<String>,
}

impl NumberCheck {
    /// Returns the full name of the matched region.
    #[inline]
    pub fn region_name(&self) -> Option<&'static str> {
        self.region.map(|r| r.name())
    }
}

/// Trims surrounding whitespace and uppercases a credential number.
#[inline]
pub fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Matches a credential number against the built-in formats.
///
/// Blank input fails with `MissingNumber`. Input that matches no format
/// fails with `UnrecognizedFormat` followed by the list of supported
/// formats, and still carries its normalized form for display.
pub fn validate_number(input: &str) -> NumberCheck {
    validate_number_with(FormatTable::builtin(), input)
}

/// Matches a credential number against a specific format table.
pub fn validate_number_with(table: &FormatTable, input: &str) -> NumberCheck {
    if input.trim().is_empty() {
        return NumberCheck {
            is_valid: false,
            region: None,
            errors: vec![ValidationError::MissingNumber],
            normalized_number: None,
        };
    }

    let normalized = normalize(input);

    match table.find(&normalized) {
        Some(format) => NumberCheck {
            is_valid: true,
            region: Some(format.region),
            errors: Vec::new(),
            normalized_number: Some(normalized),
        },
        None => NumberCheck {
            is_valid: false,
            region: None,
            errors: vec![
                ValidationError::UnrecognizedFormat,
                ValidationError::SupportedFormats(table.supported_formats()),
            ],
            normalized_number: Some(normalized),
        },
    }
}

/// Detects the issuing region of a credential number.
///
/// Returns `None` for blank input or numbers matching no format.
#[inline]
pub fn detect_region(input: &str) -> Option<Region> {
    validate_number(input).region
}

/// Returns `CODE: example` lines for every built-in format.
///
/// ```
/// let help = wwc_validator::detect::examples_help();
/// assert!(help.contains("NT: 1234567"));
/// ```
#[inline]
pub fn examples_help() -> String {
    FormatTable::builtin().examples_help()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::REGION_FORMATS;

    #[test]
    fn test_every_example_detects_its_region() {
        for format in &REGION_FORMATS {
            let check = validate_number(&format.example);
            assert!(check.is_valid, "{} should be valid", format.example);
            assert_eq!(check.region, Some(format.region));
            assert!(check.errors.is_empty());
        }
    }

    #[test]
    fn test_lowercase_and_whitespace() {
        let check = validate_number("  wwc-1234567-12  ");
        assert_eq!(check.region, Some(Region::Vic));
        assert_eq!(check.normalized_number.as_deref(), Some("WWC-1234567-12"));

        assert_eq!(detect_region("wwc1234567e"), Some(Region::Nsw));
        assert_eq!(detect_region("reg-12345678-1"), Some(Region::Act));
        assert_eq!(detect_region("\tsa12345678\n"), Some(Region::Sa));
    }

    #[test]
    fn test_blank_input() {
        for input in ["", "   ", "\t\n"] {
            let check = validate_number(input);
            assert!(!check.is_valid);
            assert_eq!(check.errors, vec![ValidationError::MissingNumber]);
            assert_eq!(check.normalized_number, None);
            assert_eq!(check.region, None);
        }
    }

    #[test]
    fn test_unrecognized() {
        let check = validate_number(" invalid123 ");
        assert!(!check.is_valid);
        assert_eq!(check.region, None);
        assert_eq!(check.normalized_number.as_deref(), Some("INVALID123"));
        assert_eq!(check.errors.len(), 2);
        assert_eq!(check.errors[0], ValidationError::UnrecognizedFormat);
        match &check.errors[1] {
            ValidationError::SupportedFormats(list) => {
                assert!(list.contains("VIC: WWC-1234567-12"));
                assert!(list.contains("ACT: REG-12345678-1"));
            }
            other => panic!("Expected SupportedFormats, got {:?}", other),
        }
    }

    #[test]
    fn test_near_misses() {
        // wrong separators or lengths
        assert_eq!(detect_region("WWC-123456-12"), None);
        assert_eq!(detect_region("WWC1234567"), None);
        assert_eq!(detect_region("BLUE-1234-2024-1"), None);
        assert_eq!(detect_region("1234567-12"), None);
        assert_eq!(detect_region("REG1234567"), None);
        assert_eq!(detect_region("REG-12345678-12"), None);
        assert_eq!(detect_region("123456"), None);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(validate_number("garbage"), validate_number("garbage"));
        assert_eq!(validate_number("1234567"), validate_number("1234567"));
    }

    #[test]
    fn test_region_name() {
        assert_eq!(
            validate_number("1234567/12").region_name(),
            Some("Western Australia")
        );
        assert_eq!(validate_number("nope").region_name(), None);
    }

    #[test]
    fn test_examples_help() {
        let help = examples_help();
        assert_eq!(help.lines().next(), Some("VIC: WWC-1234567-12"));
        assert_eq!(help.lines().last(), Some("ACT: REG-12345678-1"));
    }
}
