//! Recovery policies.
//!
//! Every operation fails loudly by default. A caller that prefers a lossy
//! result over an error opts in here, and each time a lossy path is taken a
//! `tracing` warning is emitted.

use crate::error::{Error, Result};
use crate::value::{MAX_INTEGER, MIN_INTEGER};

/// What to do with an integer part outside `[-16383, 16383]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RangePolicy {
    /// Fail with `Error::OutOfRange`.
    #[default]
    Reject,
    /// Saturate to the nearest bound.
    Clamp,
}

/// What to do when a remainder has no exact one- or two-term form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrecisionPolicy {
    /// Fail with `Error::PrecisionLoss`.
    #[default]
    Exact,
    /// Substitute the closest single term.
    Approximate,
}

/// Policy bundle passed to the encoder, adder and canonicalizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Integer-part overflow handling.
    pub range: RangePolicy,
    /// Inexact-remainder handling.
    pub precision: PrecisionPolicy,
}

impl Config {
    /// The strict default: reject and never approximate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept every lossy recovery.
    pub fn lossy() -> Self {
        Self {
            range: RangePolicy::Clamp,
            precision: PrecisionPolicy::Approximate,
        }
    }

    /// Set the range policy.
    pub fn with_range(mut self, range: RangePolicy) -> Self {
        self.range = range;
        self
    }

    /// Set the precision policy.
    pub fn with_precision(mut self, precision: PrecisionPolicy) -> Self {
        self.precision = precision;
        self
    }

    /// Fit `value` into the integer field according to the range policy.
    pub(crate) fn fit_integer(&self, value: i64) -> Result<i16> {
        if (MIN_INTEGER as i64..=MAX_INTEGER as i64).contains(&value) {
            return Ok(value as i16);
        }
        match self.range {
            RangePolicy::Reject => Err(Error::OutOfRange { value }),
            RangePolicy::Clamp => {
                let clamped = value.clamp(MIN_INTEGER as i64, MAX_INTEGER as i64) as i16;
                tracing::warn!(value, clamped, "integer part out of range, clamping");
                Ok(clamped)
            }
        }
    }
}
