//! Jurisdictions and their credential number formats.
//!
//! This module provides the `Region` enum for identifying the issuing
//! jurisdiction of a Working With Children credential and the static
//! `REGION_FORMATS` table describing each jurisdiction's number format.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Australian states and territories that issue WWC credentials.
///
/// Each variant has its own credential number format, listed in
/// [`REGION_FORMATS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Region {
    /// Victoria - `WWC-1234567-12`
    Vic,
    /// New South Wales - `WWC1234567E`
    Nsw,
    /// Queensland blue or yellow card - `BLUE-12345-2024-1`
    Qld,
    /// South Australia - `SA12345678`
    Sa,
    /// Western Australia - `1234567/12`
    Wa,
    /// Tasmania - `REG12345678`
    Tas,
    /// Northern Territory Ochre Card - `1234567`
    Nt,
    /// Australian Capital Territory - `REG-12345678-1`
    Act,
}

impl Region {
    /// All regions, in format table order.
    pub const ALL: [Region; 8] = [
        Self::Vic,
        Self::Nsw,
        Self::Qld,
        Self::Sa,
        Self::Wa,
        Self::Tas,
        Self::Nt,
        Self::Act,
    ];

    /// Returns the short jurisdiction code (e.g. `"VIC"`).
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Vic => "VIC",
            Self::Nsw => "NSW",
            Self::Qld => "QLD",
            Self::Sa => "SA",
            Self::Wa => "WA",
            Self::Tas => "TAS",
            Self::Nt => "NT",
            Self::Act => "ACT",
        }
    }

    /// Returns the full jurisdiction name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Vic => "Victoria",
            Self::Nsw => "New South Wales",
            Self::Qld => "Queensland",
            Self::Sa => "South Australia",
            Self::Wa => "Western Australia",
            Self::Tas => "Tasmania",
            Self::Nt => "Northern Territory",
            Self::Act => "Australian Capital Territory",
        }
    }

    /// Returns the built-in format for this region.
    #[inline]
    pub fn format(&self) -> &'static RegionFormat {
        // REGION_FORMATS is in `Region::ALL` order
        &REGION_FORMATS[*self as usize]
    }

    /// Parses a region code case-insensitively (`"vic"`, `"NSW"`, ...).
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown region code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRegion(pub String);

impl fmt::Display for UnknownRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown region code '{}' (expected one of VIC, NSW, QLD, SA, WA, TAS, NT, ACT)",
            self.0
        )
    }
}

impl std::error::Error for UnknownRegion {}

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

/// Describes one jurisdiction's credential number format.
///
/// `pattern` is an anchored regular expression over the normalized
/// (trimmed, uppercased) credential number. The built-in table borrows
/// static strings; tables loaded at runtime own theirs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegionFormat {
    /// Issuing jurisdiction.
    #[cfg_attr(feature = "serde", serde(rename = "code"))]
    pub region: Region,
    /// Human-readable jurisdiction name.
    pub display_name: Cow<'static, str>,
    /// Anchored regular expression matched against normalized input.
    pub pattern: Cow<'static, str>,
    /// A number that matches `pattern`.
    pub example: Cow<'static, str>,
    /// Name of the credential scheme.
    pub description: Cow<'static, str>,
}

impl RegionFormat {
    /// Creates a format for `region`, using the region's name as display name.
    pub fn new(
        region: Region,
        pattern: impl Into<Cow<'static, str>>,
        example: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            region,
            display_name: Cow::Borrowed(region.name()),
            pattern: pattern.into(),
            example: example.into(),
            description: Cow::Borrowed(""),
        }
    }

    /// Builder method to set the description.
    pub fn description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the display name.
    pub fn display_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Returns the jurisdiction code.
    #[inline]
    pub const fn code(&self) -> &'static str {
        self.region.code()
    }
}

/// Built-in credential formats, one per jurisdiction, in match order.
///
/// The patterns are mutually exclusive; no normalized number matches
/// more than one entry.
pub static REGION_FORMATS: [RegionFormat; 8] = [
    RegionFormat {
        region: Region::Vic,
        display_name: Cow::Borrowed("Victoria"),
        pattern: Cow::Borrowed(r"^WWC-\d{7}-\d{2}$"),
        example: Cow::Borrowed("WWC-1234567-12"),
        description: Cow::Borrowed("Victoria Working with Children Check"),
    },
    RegionFormat {
        region: Region::Nsw,
        display_name: Cow::Borrowed("New South Wales"),
        pattern: Cow::Borrowed(r"^WWC\d{7}E$"),
        example: Cow::Borrowed("WWC1234567E"),
        description: Cow::Borrowed("NSW Working with Children Check"),
    },
    RegionFormat {
        region: Region::Qld,
        display_name: Cow::Borrowed("Queensland"),
        pattern: Cow::Borrowed(r"^(BLUE|YELLOW)-\d{5}-\d{4}-\d$"),
        example: Cow::Borrowed("BLUE-12345-2024-1"),
        description: Cow::Borrowed("Queensland Blue/Yellow Card"),
    },
    RegionFormat {
        region: Region::Sa,
        display_name: Cow::Borrowed("South Australia"),
        pattern: Cow::Borrowed(r"^SA\d{8}$"),
        example: Cow::Borrowed("SA12345678"),
        description: Cow::Borrowed("South Australia DHS Screening Check"),
    },
    RegionFormat {
        region: Region::Wa,
        display_name: Cow::Borrowed("Western Australia"),
        pattern: Cow::Borrowed(r"^\d{7}/\d{2}$"),
        example: Cow::Borrowed("1234567/12"),
        description: Cow::Borrowed("Western Australia Working with Children Card"),
    },
    RegionFormat {
        region: Region::Tas,
        display_name: Cow::Borrowed("Tasmania"),
        pattern: Cow::Borrowed(r"^REG\d{8}$"),
        example: Cow::Borrowed("REG12345678"),
        description: Cow::Borrowed("Tasmania Registration to Work with Vulnerable People"),
    },
    RegionFormat {
        region: Region::Nt,
        display_name: Cow::Borrowed("Northern Territory"),
        pattern: Cow::Borrowed(r"^\d{7}$"),
        example: Cow::Borrowed("1234567"),
        description: Cow::Borrowed("Northern Territory Ochre Card"),
    },
    RegionFormat {
        region: Region::Act,
        display_name: Cow::Borrowed("Australian Capital Territory"),
        pattern: Cow::Borrowed(r"^REG-\d{8}-\d$"),
        example: Cow::Borrowed("REG-12345678-1"),
        description: Cow::Borrowed("ACT Working with Vulnerable People Registration"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_region_order() {
        for (i, region) in Region::ALL.iter().enumerate() {
            assert_eq!(REGION_FORMATS[i].region, *region);
            assert_eq!(region.format().region, *region);
        }
    }

    #[test]
    fn test_display_names_agree() {
        for format in &REGION_FORMATS {
            assert_eq!(format.display_name, format.region.name());
        }
    }

    #[test]
    fn test_patterns_are_anchored() {
        for format in &REGION_FORMATS {
            assert!(format.pattern.starts_with('^'), "{}", format.code());
            assert!(format.pattern.ends_with('$'), "{}", format.code());
        }
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Region::from_code("VIC"), Some(Region::Vic));
        assert_eq!(Region::from_code("vic"), Some(Region::Vic));
        assert_eq!(Region::from_code(" act "), Some(Region::Act));
        assert_eq!(Region::from_code("XYZ"), None);
        assert_eq!(Region::from_code(""), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("qld".parse::<Region>(), Ok(Region::Qld));
        let err = "nz".parse::<Region>().unwrap_err();
        assert_eq!(err, UnknownRegion("nz".to_string()));
        assert!(err.to_string().contains("'nz'"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Region::Tas.to_string(), "TAS");
        assert_eq!(Region::Nt.name(), "Northern Territory");
    }
}
