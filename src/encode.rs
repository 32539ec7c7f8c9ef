//! Building encoded values from integers and fractions.

use crate::config::{Config, PrecisionPolicy};
use crate::error::{Error, Result};
use crate::rational::Rational;
use crate::select::{select, Selection};
use crate::term::{Term, Terms};
use crate::value::EncodedValue;

/// Encoder with an explicit recovery policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Encoder {
    config: Config,
}

impl Encoder {
    /// Create a strict encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with the given policy.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// The active policy.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encode an integer.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` outside `[-16383, 16383]` unless clamping
    /// was configured.
    pub fn encode_integer(&self, value: i32) -> Result<EncodedValue> {
        let integer = self.config.fit_integer(value as i64)?;
        Ok(EncodedValue::from_parts(integer, Terms::new()))
    }

    /// Encode `numer / denom`.
    ///
    /// # Errors
    /// - `Error::DivisionByZero` if `denom` is 0.
    /// - `Error::OutOfRange` if the floor of the value does not fit.
    /// - `Error::PrecisionLoss` if the remainder needs more than two terms
    ///   and approximation was not configured.
    pub fn encode_fraction(&self, numer: i32, denom: i32) -> Result<EncodedValue> {
        let value = Rational::new(numer as i64, denom as i64)?;
        self.encode_rational(&value)
    }

    /// Encode a reduced rational.
    pub fn encode_rational(&self, value: &Rational) -> Result<EncodedValue> {
        let (whole, rem) = value.split_floor();
        let integer = self.config.fit_integer(whole)?;
        if rem == 0 {
            return Ok(EncodedValue::from_parts(integer, Terms::new()));
        }

        let denom = value.denom();
        match select(rem, denom) {
            Selection::Single(term) => with_terms(integer, &[term]),
            Selection::Double(first, second) => with_terms(integer, &[first, second]),
            Selection::Approximate(approx) => match self.config.precision {
                PrecisionPolicy::Exact => Err(Error::PrecisionLoss {
                    numerator: rem,
                    denominator: denom,
                    error: approx.error,
                }),
                PrecisionPolicy::Approximate => {
                    tracing::warn!(
                        numerator = rem,
                        denominator = denom,
                        error = approx.error,
                        "no exact antichain form, approximating"
                    );
                    if approx.carries_unit() {
                        let integer = self.config.fit_integer(integer as i64 + 1)?;
                        return Ok(EncodedValue::from_parts(integer, Terms::new()));
                    }
                    match approx.term() {
                        Some(term) => with_terms(integer, &[term]),
                        None => Ok(EncodedValue::from_parts(integer, Terms::new())),
                    }
                }
            },
        }
    }
}

fn with_terms(integer: i16, terms: &[Term]) -> Result<EncodedValue> {
    Ok(EncodedValue::from_parts(integer, Terms::from_slice(terms)?))
}

/// Encode an integer with the strict policy.
pub fn from_integer(value: i32) -> Result<EncodedValue> {
    Encoder::new().encode_integer(value)
}

/// Encode a fraction with the strict policy.
pub fn from_fraction(numer: i32, denom: i32) -> Result<EncodedValue> {
    Encoder::new().encode_fraction(numer, denom)
}
