//! Sample credentials for demos, help text and manual testing.
//!
//! The catalogue holds one credential per region. Three come from
//! published verification API documentation and the rest follow each
//! region's number format. Expected statuses were recorded when the
//! samples were collected; use [`samples_with_status`] to classify them
//! against a given date instead.

use crate::expiry::ExpiryStatus;
use crate::region::Region;
use crate::validate::{validate_at, ValidationResult};
use chrono::NaiveDate;

/// A sample credential with its holder's details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SampleCredential {
    /// Issuing region.
    pub region: Region,
    /// Credential number.
    pub number: &'static str,
    /// Expiry date, `YYYY-MM-DD`.
    pub expiry: &'static str,
    /// Holder's full name.
    pub holder_name: &'static str,
    /// Holder's date of birth, `YYYY-MM-DD`.
    pub date_of_birth: &'static str,
    /// Status recorded when the sample was collected.
    pub recorded_status: ExpiryStatus,
    /// Short description.
    pub description: &'static str,
    /// Where the sample came from.
    pub source: &'static str,
}

impl SampleCredential {
    /// Validates this sample as of `today`.
    #[inline]
    pub fn validate_at(&self, today: NaiveDate) -> ValidationResult {
        validate_at(self.number, self.expiry, today)
    }
}

const PUBLISHED: &str = "Everproof API documentation";

static SAMPLES: [SampleCredential; 8] = [
    SampleCredential {
        region: Region::Vic,
        number: "WWC-0123456-78",
        expiry: "2025-03-25",
        holder_name: "Sachin Ramesh Tendulkar",
        date_of_birth: "1973-04-23",
        recorded_status: ExpiryStatus::Active,
        description: "Published test data for Victoria",
        source: PUBLISHED,
    },
    SampleCredential {
        region: Region::Nsw,
        number: "WWC1234567E",
        expiry: "2025-12-31",
        holder_name: "Jane Smith",
        date_of_birth: "1990-03-15",
        recorded_status: ExpiryStatus::Active,
        description: "NSW clearance number",
        source: "Generated from the NSW number format",
    },
    SampleCredential {
        region: Region::Qld,
        number: "BLUE-12345-2024-8",
        expiry: "2024-01-12",
        holder_name: "Test Person Queensland",
        date_of_birth: "1980-01-01",
        recorded_status: ExpiryStatus::Expired,
        description: "Published Queensland Blue Card test data",
        source: PUBLISHED,
    },
    SampleCredential {
        region: Region::Sa,
        number: "SA12345678",
        expiry: "2019-10-24",
        holder_name: "Test Person SA",
        date_of_birth: "1985-05-15",
        recorded_status: ExpiryStatus::Expired,
        description: "Published South Australia DCSI test data",
        source: PUBLISHED,
    },
    SampleCredential {
        region: Region::Wa,
        number: "1234567/12",
        expiry: "2025-02-28",
        holder_name: "John Doe",
        date_of_birth: "1985-07-20",
        recorded_status: ExpiryStatus::Active,
        description: "WA card number",
        source: "Generated from the WA number format",
    },
    SampleCredential {
        region: Region::Tas,
        number: "REG12345678",
        expiry: "2025-01-15",
        holder_name: "Mary Johnson",
        date_of_birth: "1988-11-10",
        recorded_status: ExpiryStatus::ExpiringSoon,
        description: "Tasmania registration number",
        source: "Generated from the Tasmania number format",
    },
    SampleCredential {
        region: Region::Nt,
        number: "1234567",
        expiry: "2025-06-30",
        holder_name: "Robert Brown",
        date_of_birth: "1982-09-05",
        recorded_status: ExpiryStatus::Active,
        description: "NT Ochre Card number",
        source: "Generated from the NT number format",
    },
    SampleCredential {
        region: Region::Act,
        number: "REG-12345678-1",
        expiry: "2024-12-20",
        holder_name: "Lisa Wilson",
        date_of_birth: "1987-04-12",
        recorded_status: ExpiryStatus::Expired,
        description: "ACT registration number",
        source: "Generated from the ACT number format",
    },
];

/// Returns every sample, published ones first within region order.
#[inline]
pub fn samples() -> &'static [SampleCredential] {
    &SAMPLES
}

/// Returns the sample for a region.
pub fn sample_for_region(region: Region) -> Option<&'static SampleCredential> {
    SAMPLES.iter().find(|s| s.region == region)
}

/// Returns the samples whose status is `status` as of `today`.
///
/// ```
/// use chrono::NaiveDate;
/// use wwc_validator::samples::samples_with_status;
/// use wwc_validator::ExpiryStatus;
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let expired = samples_with_status(ExpiryStatus::Expired, today);
/// assert_eq!(expired.len(), 3);
/// ```
pub fn samples_with_status(status: ExpiryStatus, today: NaiveDate) -> Vec<&'static SampleCredential> {
    SAMPLES
        .iter()
        .filter(|s| s.validate_at(today).status == status)
        .collect()
}

/// A named input pair covering one validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scenario {
    /// Short identifier, e.g. `expired`.
    pub name: &'static str,
    /// Credential number.
    pub number: &'static str,
    /// Expiry date text; empty means missing.
    pub expiry: &'static str,
    /// What the scenario demonstrates.
    pub description: &'static str,
}

static SCENARIOS: [Scenario; 5] = [
    Scenario {
        name: "valid_active",
        number: "WWC-0123456-78",
        expiry: "2025-03-25",
        description: "Valid Victoria credential (active)",
    },
    Scenario {
        name: "valid_expiring",
        number: "REG12345678",
        expiry: "2025-01-15",
        description: "Valid Tasmania credential (expiring soon)",
    },
    Scenario {
        name: "expired",
        number: "BLUE-12345-2024-8",
        expiry: "2024-01-12",
        description: "Expired Queensland Blue Card",
    },
    Scenario {
        name: "invalid_format",
        number: "INVALID123",
        expiry: "2025-06-30",
        description: "Number matching no region",
    },
    Scenario {
        name: "missing_expiry",
        number: "WWC1234567E",
        expiry: "",
        description: "Missing expiry date",
    },
];

/// Returns the quick scenarios.
#[inline]
pub fn quick_scenarios() -> &'static [Scenario] {
    &SCENARIOS
}

/// Looks up a quick scenario by name.
pub fn scenario(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}
