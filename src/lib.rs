//! # Compact Rationals over Antichain Denominators
//!
//! *Two bytes for an integer, two more per simple fraction.*
//!
//! ## Intuition First
//!
//! Most scores and grades are whole numbers. The rest are halves, thirds,
//! quarters, the odd fifth. A general rational type spends sixteen bytes on
//! `7`, and sixteen more on `7 1/3`. This crate spends two and four.
//!
//! The trick is to pick the denominators in advance. Every fractional part is
//! written as a sum of terms `N/D` with `D` in `128..=255`. Anything with a
//! small denominator has a multiple in that window: `1/3` is `43/129`,
//! `1/7` is `19/133`, `1/100` is `2/200`. And because no number in the window
//! divides another (it is an *antichain* under divisibility), a fraction that
//! fits the window never has two competing spellings at `D` and `2D`.
//!
//! ## The Problem
//!
//! Packing a value into a few bits is easy; keeping arithmetic on it exact is
//! not:
//! - **Sums of terms** are only exact while the term list has room. Adding
//!   `1/2` and `1/3` fits in two terms; adding the result to something else
//!   may not.
//! - **Re-encoding** a general rational can need more than the supported
//!   one or two terms. The reference design approximated silently; here that
//!   is `Error::PrecisionLoss` unless the caller opts in.
//! - **Bit aliasing**: the "terms follow" flag sits where an `i16` keeps its
//!   sign, so the wire word is never read as a native integer.
//!
//! ## Layout
//!
//! ```text
//! F iiiiiiiiiiiiiii | nnnnnnnn L ooooooo | ... up to 5 terms
//! F: terms follow   | n: numerator, L: last term, o: denominator - 128
//! ```
//!
//! ## Mathematical Formulation
//!
//! A value is
//!
//! ```text
//! v = i + Σ_k n_k / d_k      i ∈ [-16383, 16383], n_k ∈ [1, 255], d_k ∈ [128, 255]
//! ```
//!
//! with `i = floor(v)` for canonical values. Terms are never negative, so
//! `-7/2` is `-4 + 64/128`.
//!
//! For a reduced remainder `r/d`, a single term exists exactly when `d`
//! divides some `D` in the window; two terms `n1/D1 + n2/D2` exist when the
//! leftover `r/d - n1/D1` reduces to a denominator that divides some
//! `D2 > D1`.
//!
//! ## Complexity Analysis
//!
//! - **Encode**: `O(128)` for a single term, `O(128 · 255)` worst case for
//!   the two-term search.
//! - **Add**: `O(1)` for operands with at most one term.
//! - **Canonicalize**: `O(128)` with a stack array of buckets.
//!
//! ## Failure Modes
//!
//! 1. **Precision Loss**: remainders like `1/256` or `256/257` have no exact
//!    one- or two-term form.
//! 2. **Overflow**: repeated uncanonicalized multi-term sums can push the
//!    reduced denominator past `i32`.
//! 3. **Range**: the integer part saturates at ±16383.
//!
//! ## Implementation Notes
//!
//! Every fallible operation returns [`Result`]. Clamping and approximation
//! are opt-in through [`Config`], and each time one is applied a `tracing`
//! warning is emitted.
//!
//! ```
//! use compact_rational::EncodedValue;
//!
//! let a = EncodedValue::from_fraction(22, 3)?;
//! assert_eq!(a.integer_part(), 7);
//! assert_eq!(a.encoded_len(), 4);
//!
//! let b = EncodedValue::from_fraction(1, 2)?;
//! let sum = a.add(&b)?.canonicalize()?;
//! assert_eq!(sum.to_rational(), compact_rational::Rational::new(47, 6)?);
//!
//! let bytes = compact_rational::wire::pack(&sum);
//! let (back, _) = compact_rational::wire::unpack(&bytes)?;
//! assert_eq!(back, sum);
//! # Ok::<(), compact_rational::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arith;
pub mod canonical;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod rational;
pub mod select;
pub mod term;
pub mod value;
pub mod wire;

pub use arith::{add, sum, Adder};
pub use canonical::{canonicalize, Canonicalizer};
pub use config::{Config, PrecisionPolicy, RangePolicy};
pub use encode::{from_fraction, from_integer, Encoder};
pub use error::{Error, Result};
pub use rational::Rational;
pub use select::{Approximation, Selection};
pub use term::{Term, Terms};
pub use value::EncodedValue;
