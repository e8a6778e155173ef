//! Compiled credential format tables.
//!
//! A [`FormatTable`] is an ordered list of [`RegionFormat`]s with their
//! patterns compiled. Matching is first-match-wins in table order.
//!
//! The built-in table ([`FormatTable::builtin`]) is compiled once per
//! process and shared. The regional patterns are provisional, so callers
//! can also build their own table, or load one from JSON with the
//! `formats-json` feature.
//!
//! # Example
//!
//! ```
//! use wwc_validator::formats::FormatTable;
//! use wwc_validator::Region;
//!
//! let table = FormatTable::builtin();
//! let format = table.find("SA12345678").unwrap();
//! assert_eq!(format.region, Region::Sa);
//! assert!(table.find("SA1234").is_none());
//! ```

#[cfg(feature = "formats-json")]
mod json;

use crate::error::FormatTableError;
use crate::region::{Region, RegionFormat, REGION_FORMATS};
use once_cell::sync::Lazy;
use regex::Regex;

static BUILTIN: Lazy<FormatTable> = Lazy::new(|| {
    let entries = REGION_FORMATS
        .iter()
        .map(|format| {
            let regex = compile(&format.pattern).expect("built-in region pattern must compile");
            CompiledFormat {
                format: format.clone(),
                regex,
            }
        })
        .collect();
    FormatTable { entries }
});

/// Compiles a pattern anchored to the whole input, with ASCII-only digits.
fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&anchored(&ascii_digits(pattern)))
}

/// Wraps a pattern so it must match the whole input.
fn anchored(pattern: &str) -> String {
    format!("^(?:{})$", pattern)
}

/// Rewrites `\d` and `\D` as `[0-9]` and `[^0-9]`.
///
/// The regex crate's `\d` matches any Unicode decimal digit. Nested
/// classes keep `[\d]` valid.
fn ascii_digits(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('d') => out.push_str("[0-9]"),
            Some('D') => out.push_str("[^0-9]"),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[derive(Debug, Clone)]
struct CompiledFormat {
    format: RegionFormat,
    regex: Regex,
}

/// An ordered, compiled set of credential formats.
#[derive(Debug, Clone)]
pub struct FormatTable {
    entries: Vec<CompiledFormat>,
}

impl FormatTable {
    /// Returns the shared built-in table of the eight Australian formats.
    #[inline]
    pub fn builtin() -> &'static FormatTable {
        &BUILTIN
    }

    /// Compiles a table from formats, keeping their order.
    ///
    /// Patterns are matched against the whole normalized number whether or
    /// not they carry their own `^`/`$` anchors.
    ///
    /// # Errors
    ///
    /// Returns `FormatTableError::Empty` for an empty list and
    /// `FormatTableError::InvalidPattern` if a pattern does not compile.
    ///
    /// # Example
    ///
    /// ```
    /// use wwc_validator::formats::FormatTable;
    /// use wwc_validator::{Region, RegionFormat};
    ///
    /// let table = FormatTable::new([
    ///     RegionFormat::new(Region::Nt, r"NT\d{6}", "NT123456"),
    /// ]).unwrap();
    /// assert_eq!(table.find("NT123456").unwrap().region, Region::Nt);
    /// assert!(table.find("XNT123456").is_none());
    /// ```
    pub fn new<I>(formats: I) -> Result<Self, FormatTableError>
    where
        I: IntoIterator<Item = RegionFormat>,
    {
        let entries = formats
            .into_iter()
            .map(|format| {
                let regex = compile(&format.pattern).map_err(|e| {
                    FormatTableError::InvalidPattern {
                        code: format.code().to_string(),
                        message: e.to_string(),
                    }
                })?;
                Ok(CompiledFormat { format, regex })
            })
            .collect::<Result<Vec<_>, FormatTableError>>()?;

        if entries.is_empty() {
            return Err(FormatTableError::Empty);
        }

        Ok(Self { entries })
    }

    /// Returns the first format whose pattern matches `normalized`.
    ///
    /// The input is expected to be trimmed and uppercased already; see
    /// [`crate::detect::normalize`].
    #[inline]
    pub fn find(&self, normalized: &str) -> Option<&RegionFormat> {
        self.entries
            .iter()
            .find(|entry| entry.regex.is_match(normalized))
            .map(|entry| &entry.format)
    }

    /// Returns every region whose pattern matches `normalized`.
    ///
    /// For a well-formed table this has at most one element.
    pub fn matching_regions(&self, normalized: &str) -> Vec<Region> {
        self.entries
            .iter()
            .filter(|entry| entry.regex.is_match(normalized))
            .map(|entry| entry.format.region)
            .collect()
    }

    /// Returns the format for `region`, if the table has one.
    pub fn get(&self, region: Region) -> Option<&RegionFormat> {
        self.formats().find(|f| f.region == region)
    }

    /// Iterates over the formats in match order.
    pub fn formats(&self) -> impl Iterator<Item = &RegionFormat> + '_ {
        self.entries.iter().map(|entry| &entry.format)
    }

    /// Returns the number of formats.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no formats.
    ///
    /// Tables built through [`FormatTable::new`] are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lists `CODE: example` pairs on one line, comma separated.
    ///
    /// ```
    /// use wwc_validator::formats::FormatTable;
    ///
    /// let list = FormatTable::builtin().supported_formats();
    /// assert!(list.starts_with("VIC: WWC-1234567-12, NSW: WWC1234567E"));
    /// ```
    pub fn supported_formats(&self) -> String {
        self.formats()
            .map(|f| format!("{}: {}", f.code(), f.example))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Lists `CODE: example` pairs, one per line, for help text.
    pub fn examples_help(&self) -> String {
        self.formats()
            .map(|f| format!("{}: {}", f.code(), f.example))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for FormatTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn test_builtin_examples_match_own_region() {
        let table = FormatTable::builtin();
        assert_eq!(table.len(), 8);
        for format in table.formats() {
            let found = table.find(&format.example).unwrap();
            assert_eq!(found.region, format.region, "example {}", format.example);
        }
    }

    #[test]
    fn test_builtin_formats_are_mutually_exclusive() {
        let table = FormatTable::builtin();
        for format in table.formats() {
            assert_eq!(
                table.matching_regions(&format.example),
                vec![format.region],
                "example {} matched more than one region",
                format.example
            );
        }
    }

    #[test]
    fn test_patterns_match_whole_input() {
        let table = FormatTable::builtin();
        // NT is seven digits; longer digit runs must not match by substring
        assert!(table.find("12345678").is_none());
        assert!(table.find("X1234567").is_none());
        assert!(table.find("WWC-1234567-123").is_none());
        assert!(table.find("SA123456789").is_none());
    }

    #[test]
    fn test_qld_card_types() {
        let table = FormatTable::builtin();
        assert_eq!(table.find("BLUE-12345-2024-1").unwrap().region, Region::Qld);
        assert_eq!(table.find("YELLOW-12345-2024-1").unwrap().region, Region::Qld);
        assert!(table.find("GREEN-12345-2024-1").is_none());
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        let table = FormatTable::builtin();
        assert!(table.find("١٢٣٤٥٦٧").is_none());
        assert!(table.find("WWC-１２３４５６７-12").is_none());
        assert!(table.find("SA١٢٣٤٥٦٧٨").is_none());
    }

    #[test]
    fn test_custom_digit_classes_are_ascii() {
        let table = FormatTable::new([RegionFormat::new(Region::Wa, r"[\d]{3}\D\\d", "123-\\d")])
            .unwrap();
        assert!(table.find("123-\\d").is_some());
        assert!(table.find("١٢٣-\\d").is_none());
        assert!(table.find("1234\\d").is_none());
    }

    #[test]
    fn test_ascii_digits_rewrite() {
        assert_eq!(ascii_digits(r"SA\d{8}"), "SA[0-9]{8}");
        assert_eq!(ascii_digits(r"[^\D]"), "[^[^0-9]]");
        assert_eq!(ascii_digits(r"\\d"), r"\\d");
        assert_eq!(ascii_digits(r"\w\."), r"\w\.");
    }

    #[test]
    fn test_unanchored_custom_pattern_is_anchored() {
        let table = FormatTable::new([RegionFormat::new(Region::Wa, r"\d{4}", "1234")]).unwrap();
        assert!(table.find("1234").is_some());
        assert!(table.find("12345").is_none());
        assert!(table.find("A1234").is_none());
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let table =
            FormatTable::new([RegionFormat::new(Region::Qld, "BLUE|YELLOW", "BLUE")]).unwrap();
        assert!(table.find("BLUE").is_some());
        assert!(table.find("BLUEX").is_none());
        assert!(table.find("XYELLOW").is_none());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FormatTable::new([RegionFormat::new(Region::Act, "(REG", "REG")]).unwrap_err();
        match err {
            FormatTableError::InvalidPattern { code, .. } => assert_eq!(code, "ACT"),
            other => panic!("Expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_table() {
        let err = FormatTable::new(Vec::<RegionFormat>::new()).unwrap_err();
        assert!(matches!(err, FormatTableError::Empty));
    }

    #[test]
    fn test_first_match_wins() {
        let table = FormatTable::new([
            RegionFormat::new(Region::Nt, r"\d+", "1"),
            RegionFormat::new(Region::Wa, r"\d{3}", "123"),
        ])
        .unwrap();
        assert_eq!(table.find("123").unwrap().region, Region::Nt);
        assert_eq!(table.matching_regions("123"), vec![Region::Nt, Region::Wa]);
    }

    #[test]
    fn test_get_and_owned_strings() {
        let table = FormatTable::new([RegionFormat::new(
            Region::Tas,
            String::from(r"T\d{2}"),
            String::from("T12"),
        )
        .description("custom")])
        .unwrap();
        let format = table.get(Region::Tas).unwrap();
        assert!(matches!(format.pattern, Cow::Owned(_)));
        assert_eq!(format.description, "custom");
        assert!(table.get(Region::Vic).is_none());
    }

    #[test]
    fn test_supported_formats_lists_all() {
        let list = FormatTable::builtin().supported_formats();
        for format in &REGION_FORMATS {
            assert!(list.contains(&format!("{}: {}", format.code(), format.example)));
        }
        assert_eq!(FormatTable::builtin().examples_help().lines().count(), 8);
    }
}
