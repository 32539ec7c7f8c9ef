//! Reduced rationals over `i64`.
//!
//! This is the general-purpose side of the crate: encoded values decode into
//! a [`Rational`], the fallback addition path adds two of them, and the
//! encoder floor-splits one into an integer part and a remainder.

use num_integer::Integer;

use crate::error::{Error, Result};

/// A rational number in lowest terms with a strictly positive denominator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: i64,
    denom: i64,
}

/// Reduce `numer/denom` to lowest terms and move the sign to the numerator.
///
/// # Errors
/// Returns `Error::DivisionByZero` if `denom` is 0, and `Error::Overflow` if
/// the normalized pair does not fit `i64` (only `i64::MIN` can do this).
pub fn reduce(numer: i64, denom: i64) -> Result<(i64, i64)> {
    reduce_wide(numer as i128, denom as i128)
}

fn reduce_wide(numer: i128, denom: i128) -> Result<(i64, i64)> {
    if denom == 0 {
        return Err(Error::DivisionByZero);
    }
    let g = numer.gcd(&denom);
    let (mut n, mut d) = (numer / g, denom / g);
    if d < 0 {
        n = -n;
        d = -d;
    }
    match (i64::try_from(n), i64::try_from(d)) {
        (Ok(n), Ok(d)) => Ok((n, d)),
        _ => Err(Error::Overflow {
            numerator: n,
            denominator: d,
        }),
    }
}

impl Rational {
    /// Create a reduced rational.
    ///
    /// # Errors
    /// Returns `Error::DivisionByZero` if `denom` is 0.
    pub fn new(numer: i64, denom: i64) -> Result<Self> {
        let (numer, denom) = reduce(numer, denom)?;
        Ok(Self { numer, denom })
    }

    /// Caller guarantees `denom > 0` and `gcd(numer, denom) == 1`.
    pub(crate) fn from_reduced(numer: i64, denom: i64) -> Self {
        debug_assert!(denom > 0 && numer.gcd(&denom) == 1);
        Self { numer, denom }
    }

    /// The rational `value/1`.
    pub fn from_integer(value: i64) -> Self {
        Self {
            numer: value,
            denom: 1,
        }
    }

    /// Zero.
    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    /// Numerator; carries the sign.
    pub fn numer(&self) -> i64 {
        self.numer
    }

    /// Denominator; always positive.
    pub fn denom(&self) -> i64 {
        self.denom
    }

    /// True if the denominator is 1.
    pub fn is_integer(&self) -> bool {
        self.denom == 1
    }

    /// Exact sum, reduced.
    ///
    /// Cross products are formed in `i128` so only the reduced result has to
    /// fit `i64`.
    ///
    /// # Errors
    /// Returns `Error::Overflow` if the reduced sum does not fit `i64`.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        let numer =
            self.numer as i128 * other.denom as i128 + other.numer as i128 * self.denom as i128;
        let denom = self.denom as i128 * other.denom as i128;
        let (numer, denom) = reduce_wide(numer, denom)?;
        Ok(Self { numer, denom })
    }

    /// Split into `floor(self)` and the remainder numerator over the same
    /// denominator, so that `self == whole + rem/denom` with `0 <= rem < denom`.
    ///
    /// Because `self` is reduced, `rem/denom` is reduced too.
    pub fn split_floor(&self) -> (i64, i64) {
        self.numer.div_mod_floor(&self.denom)
    }

    /// Convert to `f64`.
    ///
    /// # Errors
    /// Returns `Error::DivisionByZero` if the denominator is 0, which the
    /// constructors never allow.
    pub fn to_f64(&self) -> Result<f64> {
        if self.denom == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(self.numer as f64 / self.denom as f64)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}
