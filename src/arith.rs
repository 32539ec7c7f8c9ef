//! Addition of encoded values.
//!
//! Operands with at most one term are added structurally, which is always
//! exact:
//!
//! | terms | result |
//! |---|---|
//! | 0 + 0 | integer parts summed |
//! | 1 + 0 | the term is carried over |
//! | 1 + 1, different denominators | both terms carried over |
//! | 1 + 1, same denominator | numerators summed, whole units moved to the integer part |
//!
//! Anything longer goes through [`Rational`]: decode both, add, reduce and
//! re-encode. That path can fail with `PrecisionLoss` when the sum needs
//! more than two terms, and with `Overflow` when the reduced sum leaves the
//! `i32` range.

use crate::canonical::Canonicalizer;
use crate::config::Config;
use crate::decode::to_rational;
use crate::encode::Encoder;
use crate::error::{Error, Result};
use crate::rational::Rational;
use crate::term::{Term, Terms};
use crate::value::EncodedValue;

/// Adder with an explicit recovery policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Adder {
    config: Config,
}

impl Adder {
    /// Create a strict adder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adder with the given policy.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Add two values.
    ///
    /// # Errors
    /// - `Error::OutOfRange` if the integer part of the sum does not fit.
    /// - `Error::Overflow` if the fallback sum leaves the `i32` range.
    /// - `Error::PrecisionLoss` if the fallback sum has no exact form.
    pub fn add(&self, a: &EncodedValue, b: &EncodedValue) -> Result<EncodedValue> {
        match (a.terms().as_slice(), b.terms().as_slice()) {
            ([], []) => {
                let integer = self.integer_sum(a, b, 0)?;
                Ok(EncodedValue::from_parts(integer, Terms::new()))
            }
            ([term], []) | ([], [term]) => {
                let integer = self.integer_sum(a, b, 0)?;
                Ok(EncodedValue::from_parts(integer, Terms::from_slice(&[*term])?))
            }
            ([x], [y]) if x.denominator() != y.denominator() => {
                let integer = self.integer_sum(a, b, 0)?;
                let pair = if x.denominator() < y.denominator() {
                    [*x, *y]
                } else {
                    [*y, *x]
                };
                Ok(EncodedValue::from_parts(integer, Terms::from_slice(&pair)?))
            }
            ([x], [y]) => {
                let denom = x.denominator() as u32;
                let total = x.numerator() as u32 + y.numerator() as u32;
                let (carry, rem) = (total / denom, total % denom);
                let integer = self.integer_sum(a, b, carry as i64)?;
                let terms = if rem == 0 {
                    Terms::new()
                } else {
                    Terms::from_slice(&[Term::new(rem, denom)?])?
                };
                Ok(EncodedValue::from_parts(integer, terms))
            }
            _ => self.add_via_rational(a, b),
        }
    }

    fn integer_sum(&self, a: &EncodedValue, b: &EncodedValue, carry: i64) -> Result<i16> {
        self.config
            .fit_integer(a.integer_part() as i64 + b.integer_part() as i64 + carry)
    }

    fn add_via_rational(&self, a: &EncodedValue, b: &EncodedValue) -> Result<EncodedValue> {
        let sum = to_rational(a).checked_add(&to_rational(b))?;
        let (numer, denom) = match (i32::try_from(sum.numer()), i32::try_from(sum.denom())) {
            (Ok(n), Ok(d)) => (n, d),
            _ => {
                return Err(Error::Overflow {
                    numerator: sum.numer() as i128,
                    denominator: sum.denom() as i128,
                })
            }
        };
        tracing::trace!(numer, denom, "multi-term addition, re-encoding");
        Encoder::with_config(self.config).encode_fraction(numer, denom)
    }

    /// Add every value in `values`, canonicalizing after each step.
    ///
    /// # Errors
    /// The first error returned by [`add`](Self::add) or by canonicalization.
    pub fn sum<'a, I>(&self, values: I) -> Result<EncodedValue>
    where
        I: IntoIterator<Item = &'a EncodedValue>,
    {
        let canonicalizer = Canonicalizer::with_config(self.config);
        values.into_iter().try_fold(EncodedValue::zero(), |acc, value| {
            canonicalizer.canonicalize(&self.add(&acc, value)?)
        })
    }
}

/// Add with the strict policy.
pub fn add(a: &EncodedValue, b: &EncodedValue) -> Result<EncodedValue> {
    Adder::new().add(a, b)
}

/// Sum with the strict policy.
pub fn sum<'a, I>(values: I) -> Result<EncodedValue>
where
    I: IntoIterator<Item = &'a EncodedValue>,
{
    Adder::new().sum(values)
}

/// Exact sum as a [`Rational`], for callers that only need the value.
pub fn sum_rational<'a, I>(values: I) -> Result<Rational>
where
    I: IntoIterator<Item = &'a EncodedValue>,
{
    values
        .into_iter()
        .try_fold(Rational::zero(), |acc, value| acc.checked_add(&to_rational(value)))
}
