//! Canonical form.
//!
//! A canonical value has no two terms over the same denominator, every
//! numerator strictly below its denominator, and terms in ascending
//! denominator order. Whole units hidden in the terms live in the integer
//! part instead.
//!
//! Terms are merged per denominator only. Terms over different denominators
//! that happen to add up to a whole (`64/128 + 43/129 + 22/132`) are left
//! alone: combining them is a job for the encoder, not for this pass.

use crate::config::Config;
use crate::error::Result;
use crate::term::{Term, Terms, DENOMINATOR_COUNT, MIN_DENOMINATOR};
use crate::value::EncodedValue;

/// Canonicalizer with an explicit recovery policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Canonicalizer {
    config: Config,
}

impl Canonicalizer {
    /// Create a strict canonicalizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canonicalizer with the given policy.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Canonical form of `value`.
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` if absorbing whole units pushes the
    /// integer part past the bound and clamping was not configured.
    pub fn canonicalize(&self, value: &EncodedValue) -> Result<EncodedValue> {
        // five numerators of at most 255 each: a bucket never exceeds 1275
        let mut buckets = [0u16; DENOMINATOR_COUNT];
        for term in value.terms() {
            buckets[term.offset() as usize] += term.numerator() as u16;
        }

        let mut whole = value.integer_part() as i64;
        let mut terms = Terms::new();
        for (offset, &bucket) in buckets.iter().enumerate() {
            if bucket == 0 {
                continue;
            }
            let denom = MIN_DENOMINATOR as u16 + offset as u16;
            whole += (bucket / denom) as i64;
            let rem = bucket % denom;
            if rem != 0 {
                terms.push(Term::new(rem as u32, denom as u32)?)?;
            }
        }

        let integer = self.config.fit_integer(whole)?;
        tracing::trace!(
            before = value.term_count(),
            after = terms.len(),
            "canonicalized"
        );
        Ok(EncodedValue::from_parts(integer, terms))
    }
}

/// Canonicalize with the strict policy.
pub fn canonicalize(value: &EncodedValue) -> Result<EncodedValue> {
    Canonicalizer::new().canonicalize(value)
}

/// True if `value` is already canonical.
pub fn is_canonical(value: &EncodedValue) -> bool {
    value.terms().is_strictly_ascending() && value.terms().iter().all(|t| !t.is_improper())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RangePolicy;
    use crate::error::Error;
    use crate::term::MAX_TERMS;
    use proptest::prelude::*;

    fn term(n: u32, d: u32) -> Term {
        Term::new(n, d).unwrap()
    }

    fn value(integer: i64, terms: &[Term]) -> EncodedValue {
        EncodedValue::from_terms(integer, terms).unwrap()
    }

    #[test]
    fn test_merge_duplicates() {
        let v = value(0, &[term(64, 128), term(32, 128)]);
        let c = canonicalize(&v).unwrap();
        assert_eq!(c, value(0, &[term(96, 128)]));
        assert_eq!(c.to_f64().unwrap(), 0.75);
    }

    #[test]
    fn test_numerator_overflow() {
        // 200/128 + 100/128 = 2 + 44/128
        let v = value(0, &[term(200, 128), term(100, 128)]);
        let c = canonicalize(&v).unwrap();
        assert_eq!(c, value(2, &[term(44, 128)]));
        assert_eq!(c.to_f64().unwrap(), 2.34375);
    }

    #[test]
    fn test_full_absorption() {
        let v = value(5, &[term(128, 128)]);
        let c = canonicalize(&v).unwrap();
        assert_eq!(c, value(6, &[]));
        assert!(!c.has_fractional_terms());
    }

    #[test]
    fn test_distinct_denominators_are_sorted_not_merged() {
        let v = value(0, &[term(22, 132), term(64, 128), term(43, 129)]);
        let c = canonicalize(&v).unwrap();
        assert_eq!(c, value(0, &[term(64, 128), term(43, 129), term(22, 132)]));
        assert_eq!(c.to_rational(), v.to_rational());
    }

    #[test]
    fn test_already_canonical_is_unchanged() {
        let v = value(7, &[term(43, 129)]);
        assert!(is_canonical(&v));
        assert_eq!(canonicalize(&v).unwrap(), v);
    }

    #[test]
    fn test_five_terms_collapse() {
        let v = value(1, &[term(255, 255); MAX_TERMS]);
        assert!(!is_canonical(&v));
        assert_eq!(canonicalize(&v).unwrap(), value(6, &[]));

        let v = value(0, &[term(200, 200), term(100, 200), term(100, 200), term(1, 200), term(99, 200)]);
        assert_eq!(canonicalize(&v).unwrap(), value(2, &[term(100, 200)]));
    }

    #[test]
    fn test_negative_integer_part() {
        // -3 + 3/4 + 3/4 = -2 + 1/2
        let v = value(-3, &[term(96, 128), term(96, 128)]);
        assert_eq!(canonicalize(&v).unwrap(), value(-2, &[term(64, 128)]));
    }

    #[test]
    fn test_absorption_out_of_range() {
        let v = value(16383, &[term(255, 128)]);
        assert!(matches!(
            canonicalize(&v),
            Err(Error::OutOfRange { value: 16384 })
        ));
        let clamped = Canonicalizer::with_config(Config::new().with_range(RangePolicy::Clamp))
            .canonicalize(&v)
            .unwrap();
        assert_eq!(clamped, value(16383, &[term(127, 128)]));
    }

    fn arb_value() -> impl Strategy<Value = EncodedValue> {
        // a narrow denominator window makes bucket collisions common
        let term = (1u32..=255, 128u32..136).prop_map(|(n, d)| Term::new(n, d).unwrap());
        (-10_000i64..10_000, prop::collection::vec(term, 0..=MAX_TERMS))
            .prop_map(|(i, terms)| EncodedValue::from_terms(i, &terms).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_idempotent(v in arb_value()) {
            let once = canonicalize(&v).unwrap();
            prop_assert!(is_canonical(&once));
            prop_assert_eq!(canonicalize(&once).unwrap(), once);
        }

        #[test]
        fn prop_value_preserving(v in arb_value()) {
            let c = canonicalize(&v).unwrap();
            prop_assert_eq!(c.to_rational(), v.to_rational());
            prop_assert!((c.to_f64().unwrap() - v.to_f64().unwrap()).abs() < 1e-9);
            prop_assert!(c.term_count() <= v.term_count());
        }
    }
}
