//! Streaming validation for processing credentials as they arrive.
//!
//! This module provides iterator adapters for validating credentials in a
//! streaming fashion, useful for large roster files or network feeds that
//! should not be loaded into memory at once. "Today" is fixed when the
//! stream is created.
//!
//! # Example
//!
//! ```
//! use wwc_validator::stream::ValidateExt;
//!
//! let credentials = vec![
//!     ("WWC-1234567-12", "2099-01-01"),
//!     ("1234567", "2099-01-01"),
//!     ("invalid", "2099-01-01"),
//! ];
//! let valid_count = credentials
//!     .iter()
//!     .validate_credentials()
//!     .filter(|r| r.is_valid)
//!     .count();
//!
//! assert_eq!(valid_count, 2);
//! ```

use crate::batch::CredentialSource;
use crate::expiry::local_today;
use crate::validate::{ValidationResult, Validator};
use chrono::NaiveDate;

/// A streaming validator that wraps an iterator of credentials.
///
/// This struct is created by the `validate_credentials` method on iterators.
#[derive(Debug, Clone)]
pub struct ValidateStream<I> {
    inner: I,
    validator: Validator,
    today: NaiveDate,
}

impl<I> ValidateStream<I> {
    /// Creates a stream validating against the built-in formats as of the
    /// local date.
    #[inline]
    pub fn new(inner: I) -> Self {
        Self::with_validator(inner, Validator::new(), local_today())
    }

    /// Creates a stream with a specific validator and date.
    #[inline]
    pub fn with_validator(inner: I, validator: Validator, today: NaiveDate) -> Self {
        Self {
            inner,
            validator,
            today,
        }
    }

    /// Consumes the stream and returns the inner iterator.
    #[inline]
    pub fn into_inner(self) -> I {
        self.inner
    }

    #[inline]
    fn check<C: CredentialSource>(&self, credential: C) -> ValidationResult {
        self.validator
            .validate_at(credential.number(), credential.expiry(), self.today)
    }
}

impl<I, C> Iterator for ValidateStream<I>
where
    I: Iterator<Item = C>,
    C: CredentialSource,
{
    type Item = ValidationResult;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let credential = self.inner.next()?;
        Some(self.check(credential))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, C> ExactSizeIterator for ValidateStream<I>
where
    I: ExactSizeIterator<Item = C>,
    C: CredentialSource,
{
}

impl<I, C> DoubleEndedIterator for ValidateStream<I>
where
    I: DoubleEndedIterator<Item = C>,
    C: CredentialSource,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let credential = self.inner.next_back()?;
        Some(self.check(credential))
    }
}

/// A streaming validator that only yields passing results.
///
/// Failing credentials are silently skipped.
#[derive(Debug, Clone)]
pub struct ValidOnlyStream<I> {
    inner: ValidateStream<I>,
}

impl<I> ValidOnlyStream<I> {
    /// Creates a new ValidOnlyStream wrapping the given iterator.
    #[inline]
    pub fn new(inner: I) -> Self {
        Self {
            inner: ValidateStream::new(inner),
        }
    }
}

impl<I, C> Iterator for ValidOnlyStream<I>
where
    I: Iterator<Item = C>,
    C: CredentialSource,
{
    type Item = ValidationResult;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|r| r.is_valid)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.inner.size_hint();
        (0, upper)
    }
}

/// A streaming validator that yields results with their input index.
///
/// Useful for reporting which rows of a roster failed.
#[derive(Debug, Clone)]
pub struct IndexedValidateStream<I> {
    inner: ValidateStream<I>,
    index: usize,
}

impl<I> IndexedValidateStream<I> {
    /// Creates a new IndexedValidateStream.
    #[inline]
    pub fn new(inner: I) -> Self {
        Self {
            inner: ValidateStream::new(inner),
            index: 0,
        }
    }
}

impl<I, C> Iterator for IndexedValidateStream<I>
where
    I: Iterator<Item = C>,
    C: CredentialSource,
{
    type Item = (usize, ValidationResult);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let index = self.index;
        self.index += 1;
        Some((index, result))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Extension trait for adding credential validation to any iterator.
///
/// Implemented for every iterator; the adapters are usable when the items
/// are [`CredentialSource`]s such as `(number, expiry)` pairs.
pub trait ValidateExt: Iterator + Sized {
    /// Validates each credential yielded by the iterator.
    ///
    /// # Example
    ///
    /// ```
    /// use wwc_validator::stream::ValidateExt;
    ///
    /// let credentials = [("REG12345678", "2099-01-01"), ("REG12345678", "2001-01-01")];
    /// for result in credentials.iter().validate_credentials() {
    ///     println!("{}: {}", result.normalized_number.unwrap_or_default(), result.status);
    /// }
    /// ```
    fn validate_credentials(self) -> ValidateStream<Self>;

    /// Validates each credential with a configured validator as of `today`.
    fn validate_credentials_with(self, validator: Validator, today: NaiveDate) -> ValidateStream<Self>;

    /// Validates and yields only passing results.
    ///
    /// # Example
    ///
    /// ```
    /// use wwc_validator::stream::ValidateExt;
    ///
    /// let credentials = [("SA12345678", "2099-01-01"), ("bad", ""), ("1234567", "2099-01-01")];
    /// let valid: Vec<_> = credentials.iter().validate_valid_only().collect();
    /// assert_eq!(valid.len(), 2);
    /// ```
    fn validate_valid_only(self) -> ValidOnlyStream<Self>;

    /// Validates with index tracking.
    ///
    /// # Example
    ///
    /// ```
    /// use wwc_validator::stream::ValidateExt;
    ///
    /// let credentials = [("SA12345678", "2099-01-01"), ("bad", "")];
    /// for (idx, result) in credentials.iter().validate_indexed() {
    ///     if !result.is_valid {
    ///         println!("Row {} failed: {:?}", idx, result.messages());
    ///     }
    /// }
    /// ```
    fn validate_indexed(self) -> IndexedValidateStream<Self>;
}

impl<I: Iterator + Sized> ValidateExt for I {
    #[inline]
    fn validate_credentials(self) -> ValidateStream<Self> {
        ValidateStream::new(self)
    }

    #[inline]
    fn validate_credentials_with(self, validator: Validator, today: NaiveDate) -> ValidateStream<Self> {
        ValidateStream::with_validator(self, validator, today)
    }

    #[inline]
    fn validate_valid_only(self) -> ValidOnlyStream<Self> {
        ValidOnlyStream::new(self)
    }

    #[inline]
    fn validate_indexed(self) -> IndexedValidateStream<Self> {
        IndexedValidateStream::new(self)
    }
}

/// Creates a validation stream from a slice of credentials.
#[inline]
pub fn validate_stream<'a, C: CredentialSource + 'a>(
    credentials: &'a [C],
) -> ValidateStream<impl Iterator<Item = &'a C>> {
    ValidateStream::new(credentials.iter())
}
