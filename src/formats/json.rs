//! JSON format table loader.
//!
//! # Feature
//!
//! Requires the `formats-json` feature.
//!
//! # Supported Formats
//!
//! ## Array format (match order is array order)
//!
//! ```json
//! [
//!   {
//!     "code": "VIC",
//!     "pattern": "^WWC-\\d{7}-\\d{2}$",
//!     "example": "WWC-1234567-12",
//!     "description": "Victoria Working with Children Check"
//!   }
//! ]
//! ```
//!
//! ## Object format (keyed by region code, matched in region order)
//!
//! ```json
//! {
//!   "NT": { "pattern": "^\\d{7}$", "example": "1234567" }
//! }
//! ```

use super::FormatTable;
use crate::error::FormatTableError;
use crate::region::{Region, RegionFormat};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

impl FormatTable {
    /// Loads a format table from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use wwc_validator::formats::FormatTable;
    ///
    /// let table = FormatTable::from_json_file("formats.json")?;
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, FormatTableError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Loads a format table from a reader.
    pub fn from_json_reader<R: Read>(mut reader: R) -> Result<Self, FormatTableError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_json(&content)
    }

    /// Loads a format table from a JSON string.
    ///
    /// ```
    /// use wwc_validator::formats::FormatTable;
    /// use wwc_validator::Region;
    ///
    /// let table = FormatTable::from_json(
    ///     r#"[{"code": "sa", "pattern": "^SA\\d{8}$", "example": "SA12345678"}]"#,
    /// ).unwrap();
    /// assert_eq!(table.find("SA12345678").unwrap().region, Region::Sa);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, FormatTableError> {
        let trimmed = json.trim();

        if trimmed.starts_with('[') {
            Self::parse_array(trimmed)
        } else if trimmed.starts_with('{') {
            Self::parse_object(trimmed)
        } else {
            Err(FormatTableError::Parse(
                "Invalid JSON format: expected array or object".to_string(),
            ))
        }
    }

    fn parse_array(json: &str) -> Result<Self, FormatTableError> {
        let entries: Vec<JsonFormatEntry> = serde_json::from_str(json)
            .map_err(|e| FormatTableError::Parse(format!("JSON parse error: {}", e)))?;

        let formats = entries
            .into_iter()
            .map(|entry| {
                let code = entry.code.clone().unwrap_or_default();
                entry.into_format(&code)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(formats)
    }

    fn parse_object(json: &str) -> Result<Self, FormatTableError> {
        let map: HashMap<String, JsonFormatEntry> = serde_json::from_str(json)
            .map_err(|e| FormatTableError::Parse(format!("JSON parse error: {}", e)))?;

        let mut formats = map
            .into_iter()
            .map(|(code, entry)| entry.into_format(&code))
            .collect::<Result<Vec<_>, _>>()?;
        // HashMap order is arbitrary; match in region order instead
        formats.sort_by_key(|f| f.region);
        if let Some(pair) = formats.windows(2).find(|w| w[0].region == w[1].region) {
            return Err(FormatTableError::DuplicateRegion(pair[0].region));
        }

        Self::new(formats)
    }
}

/// JSON entry structure for deserialization.
#[derive(Debug, Deserialize)]
struct JsonFormatEntry {
    #[serde(default, alias = "state", alias = "region")]
    code: Option<String>,
    #[serde(default, alias = "stateName", alias = "name")]
    display_name: Option<String>,
    pattern: String,
    #[serde(default)]
    example: String,
    #[serde(default)]
    description: String,
}

impl JsonFormatEntry {
    fn into_format(self, code: &str) -> Result<RegionFormat, FormatTableError> {
        let region =
            Region::from_code(code).ok_or_else(|| FormatTableError::UnknownRegion(code.to_string()))?;

        let mut format = RegionFormat::new(region, self.pattern, self.example)
            .description(self.description);
        if let Some(name) = self.display_name {
            format.display_name = Cow::Owned(name);
        }
        Ok(format)
    }
}
