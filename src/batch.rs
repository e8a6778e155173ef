//! Batch processing for validating many credentials at once.
//!
//! Every credential in a batch is checked against the same "today", taken
//! once when the batch starts, so results do not straddle midnight.
//! Parallel validation is available with the `parallel` feature.

use crate::expiry::{local_today, ExpiryInput, ExpiryStatus};
use crate::validate::{ValidationResult, Validator};
use chrono::NaiveDate;

/// Anything that carries a credential number and an expiry date.
///
/// Implemented for [`Credential`] and for `(number, expiry)` string pairs.
pub trait CredentialSource {
    /// The credential number as entered.
    fn number(&self) -> &str;
    /// The expiry date as entered.
    fn expiry(&self) -> ExpiryInput<'_>;
}

/// An owned credential record, e.g. from a form submission or a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Credential {
    /// Credential number.
    pub number: String,
    /// Expiry date text; empty when not supplied.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expiry: String,
}

impl Credential {
    /// Creates a credential record.
    pub fn new(number: impl Into<String>, expiry: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            expiry: expiry.into(),
        }
    }
}

impl CredentialSource for Credential {
    fn number(&self) -> &str {
        &self.number
    }

    fn expiry(&self) -> ExpiryInput<'_> {
        ExpiryInput::Text(&self.expiry)
    }
}

impl<N: AsRef<str>, E: AsRef<str>> CredentialSource for (N, E) {
    fn number(&self) -> &str {
        self.0.as_ref()
    }

    fn expiry(&self) -> ExpiryInput<'_> {
        ExpiryInput::Text(self.1.as_ref())
    }
}

impl<T: CredentialSource + ?Sized> CredentialSource for &T {
    fn number(&self) -> &str {
        (**self).number()
    }

    fn expiry(&self) -> ExpiryInput<'_> {
        (**self).expiry()
    }
}

/// Counts of outcomes across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BatchSummary {
    /// Credentials processed.
    pub total: usize,
    /// Credentials that passed.
    pub valid: usize,
    /// Credentials that failed.
    pub invalid: usize,
    /// Results with status `Active`.
    pub active: usize,
    /// Results with status `ExpiringSoon`.
    pub expiring_soon: usize,
    /// Results with status `Expired`.
    pub expired: usize,
    /// Results whose expiry was missing or unparseable.
    pub invalid_expiry: usize,
    /// Results whose number matched no region.
    pub unrecognized_number: usize,
}

impl BatchSummary {
    /// Tallies a slice of results.
    pub fn from_results(results: &[ValidationResult]) -> Self {
        results.iter().fold(Self::default(), |mut s, r| {
            s.total += 1;
            if r.is_valid {
                s.valid += 1;
            } else {
                s.invalid += 1;
            }
            match r.status {
                ExpiryStatus::Active => s.active += 1,
                ExpiryStatus::ExpiringSoon => s.expiring_soon += 1,
                ExpiryStatus::Expired => s.expired += 1,
                ExpiryStatus::Invalid => s.invalid_expiry += 1,
                ExpiryStatus::Unknown => {}
            }
            if r.region.is_none() {
                s.unrecognized_number += 1;
            }
            s
        })
    }
}

/// Batch validator for processing many credentials.
///
/// # Example
///
/// ```
/// use wwc_validator::BatchValidator;
///
/// let batch = BatchValidator::new();
/// let credentials = [
///     ("WWC-1234567-12", "2099-01-01"),
///     ("SA12345678", "2001-01-01"),
///     ("garbage", ""),
/// ];
/// let results = batch.validate_all(&credentials);
///
/// for ((number, _), result) in credentials.iter().zip(results.iter()) {
///     println!("{}: {} {:?}", number, result.status, result.messages());
/// }
/// assert!(results[0].is_valid);
/// assert!(!results[1].is_valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchValidator {
    validator: Validator,
    today: Option<NaiveDate>,
}

impl BatchValidator {
    /// Creates a batch validator over the built-in formats.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a configured validator.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Pins "today" instead of reading the clock at each batch.
    pub fn as_of(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(local_today)
    }

    /// Validates a batch, returning results in input order.
    pub fn validate_all<C: CredentialSource>(&self, credentials: &[C]) -> Vec<ValidationResult> {
        let today = self.today();
        credentials
            .iter()
            .map(|c| self.validator.validate_at(c.number(), c.expiry(), today))
            .collect()
    }

    /// Validates a batch and returns only the passing results.
    pub fn validate_valid_only<C: CredentialSource>(
        &self,
        credentials: &[C],
    ) -> Vec<ValidationResult> {
        let today = self.today();
        credentials
            .iter()
            .map(|c| self.validator.validate_at(c.number(), c.expiry(), today))
            .filter(|r| r.is_valid)
            .collect()
    }

    /// Validates a batch and partitions it.
    ///
    /// Returns the passing results, and the failing ones with their input
    /// index.
    pub fn validate_partitioned<C: CredentialSource>(
        &self,
        credentials: &[C],
    ) -> (Vec<ValidationResult>, Vec<(usize, ValidationResult)>) {
        let today = self.today();
        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        for (i, c) in credentials.iter().enumerate() {
            let result = self.validator.validate_at(c.number(), c.expiry(), today);
            if result.is_valid {
                valid.push(result);
            } else {
                invalid.push((i, result));
            }
        }

        (valid, invalid)
    }

    /// Validates a batch and tallies the outcomes.
    pub fn summarize<C: CredentialSource>(&self, credentials: &[C]) -> BatchSummary {
        BatchSummary::from_results(&self.validate_all(credentials))
    }

    /// Validates a batch in parallel using rayon, keeping input order.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn validate_parallel<C: CredentialSource + Sync>(
        &self,
        credentials: &[C],
    ) -> Vec<ValidationResult> {
        use rayon::prelude::*;
        let today = self.today();
        credentials
            .par_iter()
            .map(|c| self.validator.validate_at(c.number(), c.expiry(), today))
            .collect()
    }
}

/// Validates a slice of credentials with the built-in formats.
///
/// ```
/// use wwc_validator::batch::validate_batch;
///
/// let results = validate_batch(&[("1234567", "2099-01-01"), ("1234567/12", "2099-01-01")]);
/// assert!(results.iter().all(|r| r.is_valid));
/// ```
#[inline]
pub fn validate_batch<C: CredentialSource>(credentials: &[C]) -> Vec<ValidationResult> {
    BatchValidator::new().validate_all(credentials)
}

/// Validates a slice of credentials in parallel.
///
/// # Feature
///
/// Requires the `parallel` feature to be enabled.
#[cfg(feature = "parallel")]
#[inline]
pub fn validate_batch_parallel<C: CredentialSource + Sync>(
    credentials: &[C],
) -> Vec<ValidationResult> {
    BatchValidator::new().validate_parallel(credentials)
}

/// Counts passing and failing credentials.
///
/// # Returns
///
/// Tuple of (valid_count, invalid_count)
///
/// ```
/// use wwc_validator::batch::count_valid;
///
/// let (valid, invalid) = count_valid(&[("SA12345678", "2099-01-01"), ("nope", "2099-01-01")]);
/// assert_eq!((valid, invalid), (1, 1));
/// ```
pub fn count_valid<C: CredentialSource>(credentials: &[C]) -> (usize, usize) {
    let validator = Validator::new();
    let today = local_today();
    let valid = credentials
        .iter()
        .filter(|c| validator.validate_at(c.number(), c.expiry(), today).is_valid)
        .count();

    (valid, credentials.len() - valid)
}

/// Counts passing and failing credentials in parallel.
///
/// # Feature
///
/// Requires the `parallel` feature to be enabled.
#[cfg(feature = "parallel")]
pub fn count_valid_parallel<C: CredentialSource + Sync>(credentials: &[C]) -> (usize, usize) {
    use rayon::prelude::*;

    let validator = Validator::new();
    let today = local_today();
    let valid = credentials
        .par_iter()
        .filter(|c| validator.validate_at(c.number(), c.expiry(), today).is_valid)
        .count();

    (valid, credentials.len() - valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVE_VIC: (&str, &str) = ("WWC-1234567-12", "2030-01-01");
    const SOON_NSW: (&str, &str) = ("WWC1234567E", "2025-06-20");
    const EXPIRED_SA: (&str, &str) = ("SA12345678", "2019-10-24");
    const BAD_NUMBER: (&str, &str) = ("INVALID123", "2030-06-30");
    const NO_EXPIRY: (&str, &str) = ("1234567", "");

    fn batch() -> BatchValidator {
        BatchValidator::new().as_of(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    #[test]
    fn test_batch_validate_all() {
        let results = batch().validate_all(&[ACTIVE_VIC, SOON_NSW, EXPIRED_SA, BAD_NUMBER]);

        assert_eq!(results.len(), 4);
        assert!(results[0].is_valid);
        assert!(results[1].is_valid);
        assert!(!results[2].is_valid);
        assert!(!results[3].is_valid);
    }

    #[test]
    fn test_batch_valid_only() {
        let valid = batch().validate_valid_only(&[ACTIVE_VIC, BAD_NUMBER, SOON_NSW]);
        assert_eq!(valid.len(), 2);
    }

    #[test]
    fn test_batch_partitioned() {
        let (valid, invalid) =
            batch().validate_partitioned(&[ACTIVE_VIC, EXPIRED_SA, SOON_NSW, NO_EXPIRY]);

        assert_eq!(valid.len(), 2);
        assert_eq!(invalid.len(), 2);
        assert_eq!(invalid[0].0, 1);
        assert_eq!(invalid[1].0, 3);
    }

    #[test]
    fn test_summary() {
        let summary =
            batch().summarize(&[ACTIVE_VIC, SOON_NSW, EXPIRED_SA, BAD_NUMBER, NO_EXPIRY]);

        assert_eq!(
            summary,
            BatchSummary {
                total: 5,
                valid: 2,
                invalid: 3,
                active: 2,
                expiring_soon: 1,
                expired: 1,
                invalid_expiry: 1,
                unrecognized_number: 1,
            }
        );
    }

    #[test]
    fn test_owned_credentials() {
        let credentials = vec![
            Credential::new("reg12345678", "2030-01-01"),
            Credential::new("REG-12345678-1", ""),
        ];
        let results = batch().validate_all(&credentials);
        assert!(results[0].is_valid);
        assert!(!results[1].is_valid);

        let refs: Vec<&Credential> = credentials.iter().collect();
        assert_eq!(batch().validate_all(&refs), results);
    }

    #[test]
    fn test_string_pairs() {
        let credentials = vec![(String::from("1234567/12"), String::from("2030-01-01"))];
        assert!(batch().validate_all(&credentials)[0].is_valid);
    }

    #[test]
    fn test_validate_batch_fn() {
        let results = validate_batch(&[("WWC-1234567-12", "2099-01-01")]);
        assert!(results[0].is_valid);
    }

    #[test]
    fn test_count_valid() {
        let (valid, invalid) = count_valid(&[
            ("WWC-1234567-12", "2099-01-01"),
            BAD_NUMBER,
            EXPIRED_SA,
            ("1234567", "2099-12-31"),
        ]);
        assert_eq!(valid, 2);
        assert_eq!(invalid, 2);
    }

    #[test]
    fn test_empty_batch() {
        let credentials: Vec<Credential> = vec![];
        assert!(batch().validate_all(&credentials).is_empty());
        assert_eq!(batch().summarize(&credentials), BatchSummary::default());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_validation() {
        let credentials: Vec<(String, String)> = (0..1000)
            .map(|i| (format!("SA{:08}", i), "2030-01-01".to_string()))
            .collect();

        let results = batch().validate_parallel(&credentials);
        assert_eq!(results.len(), 1000);
        assert!(results.iter().all(|r| r.is_valid));
        assert_eq!(results[42].normalized_number.as_deref(), Some("SA00000042"));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_count_valid_parallel() {
        let (valid, invalid) =
            count_valid_parallel(&[("WWC-1234567-12", "2099-01-01"), BAD_NUMBER]);
        assert_eq!(valid, 1);
        assert_eq!(invalid, 1);
    }
}
