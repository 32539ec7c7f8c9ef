//! The encoded value: a bounded integer part plus up to five terms.

use crate::error::{Error, Result};
use crate::rational::Rational;
use crate::term::{Term, Terms};

/// Largest integer part.
pub const MAX_INTEGER: i16 = 16383;

/// Smallest integer part. The 15-bit field could hold -16384; that pattern is
/// excluded so the range is symmetric.
pub const MIN_INTEGER: i16 = -16383;

/// Check that `value` fits the integer field.
///
/// # Errors
/// Returns `Error::OutOfRange` otherwise.
pub fn check_integer(value: i64) -> Result<i16> {
    if (MIN_INTEGER as i64..=MAX_INTEGER as i64).contains(&value) {
        Ok(value as i16)
    } else {
        Err(Error::OutOfRange { value })
    }
}

/// A compact rational: `integer_part + Σ numerator/denominator`.
///
/// Terms are never negative, so the integer part is the floor of the value
/// and the sign belongs to the value as a whole: `-1/2` is stored as
/// `-1 + 64/128`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EncodedValue {
    integer: i16,
    terms: Terms,
}

impl EncodedValue {
    /// Zero, with no terms.
    pub const fn zero() -> Self {
        Self {
            integer: 0,
            terms: Terms::new(),
        }
    }

    /// Build a value from raw parts without canonicalizing. Duplicate or
    /// improper terms are allowed here; [`canonicalize`](Self::canonicalize)
    /// cleans them up.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` for an out-of-bound integer part and
    /// `Error::TermCapacityExceeded` for more than five terms.
    pub fn from_terms(integer: i64, terms: &[Term]) -> Result<Self> {
        let integer = check_integer(integer)?;
        let terms = Terms::from_slice(terms)?;
        Ok(Self { integer, terms })
    }

    /// Caller guarantees `integer` is in range.
    pub(crate) fn from_parts(integer: i16, terms: Terms) -> Self {
        debug_assert!((MIN_INTEGER..=MAX_INTEGER).contains(&integer));
        Self { integer, terms }
    }

    /// Encode an integer. See [`crate::encode::from_integer`].
    pub fn from_integer(value: i32) -> Result<Self> {
        crate::encode::from_integer(value)
    }

    /// Encode a fraction exactly. See [`crate::encode::from_fraction`].
    pub fn from_fraction(numer: i32, denom: i32) -> Result<Self> {
        crate::encode::from_fraction(numer, denom)
    }

    /// The integer part, in `[-16383, 16383]`.
    pub fn integer_part(&self) -> i16 {
        self.integer
    }

    /// The fractional terms, in stored order.
    pub fn terms(&self) -> &Terms {
        &self.terms
    }

    /// Number of fractional terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// True if any fractional term is present; the wire flag bit.
    pub fn has_fractional_terms(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Size on the wire: two bytes for the integer word plus two per term.
    pub fn encoded_len(&self) -> usize {
        2 + 2 * self.terms.len()
    }

    /// Exact value. See [`crate::decode::to_rational`].
    pub fn to_rational(&self) -> Rational {
        crate::decode::to_rational(self)
    }

    /// Value as `f64`. See [`crate::decode::to_f64`].
    pub fn to_f64(&self) -> Result<f64> {
        crate::decode::to_f64(self)
    }

    /// Add with the default policy. See [`crate::arith::add`].
    pub fn add(&self, other: &Self) -> Result<Self> {
        crate::arith::add(self, other)
    }

    /// Canonical form with the default policy. See [`crate::canonical::canonicalize`].
    pub fn canonicalize(&self) -> Result<Self> {
        crate::canonical::canonicalize(self)
    }

    /// True if already canonical. See [`crate::canonical::is_canonical`].
    pub fn is_canonical(&self) -> bool {
        crate::canonical::is_canonical(self)
    }
}
