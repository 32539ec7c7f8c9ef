//! Decoding encoded values back to general rationals.

use crate::error::Result;
use crate::rational::Rational;
use crate::value::EncodedValue;

/// Exact value of `value` as a reduced rational.
///
/// Folds `acc + numerator/denominator` term by term, reducing after each
/// step. With at most five denominators below 256 and an integer part
/// below 2^14, every intermediate stays far inside `i64`.
pub fn to_rational(value: &EncodedValue) -> Rational {
    let mut numer = value.integer_part() as i64;
    let mut denom = 1i64;
    for term in value.terms() {
        let (n, d) = (term.numerator() as i64, term.denominator() as i64);
        numer = numer * d + n * denom;
        denom *= d;
        let g = num_integer::gcd(numer, denom);
        numer /= g;
        denom /= g;
    }
    Rational::from_reduced(numer, denom)
}

/// Value of `value` as `f64`.
///
/// # Errors
/// Returns `Error::DivisionByZero` if the decoded denominator is 0, which
/// cannot happen for a value that satisfies the invariants.
pub fn to_f64(value: &EncodedValue) -> Result<f64> {
    to_rational(value).to_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    fn term(n: u32, d: u32) -> Term {
        Term::new(n, d).unwrap()
    }

    #[test]
    fn test_integer_only() {
        let v = EncodedValue::from_terms(-42, &[]).unwrap();
        let r = to_rational(&v);
        assert_eq!((r.numer(), r.denom()), (-42, 1));
        assert_eq!(to_f64(&v).unwrap(), -42.0);
    }

    #[test]
    fn test_terms_are_added_to_the_floor() {
        // -4 + 1/2 = -7/2
        let v = EncodedValue::from_terms(-4, &[term(64, 128)]).unwrap();
        let r = to_rational(&v);
        assert_eq!((r.numer(), r.denom()), (-7, 2));
    }

    #[test]
    fn test_fold_reduces() {
        // 1/2 + 1/3 + 1/6 = 1
        let v = EncodedValue::from_terms(0, &[term(64, 128), term(43, 129), term(22, 132)]).unwrap();
        let r = to_rational(&v);
        assert_eq!((r.numer(), r.denom()), (1, 1));
    }

    #[test]
    fn test_largest_magnitude_fits() {
        let terms = [
            term(255, 251),
            term(255, 252),
            term(255, 253),
            term(255, 254),
            term(255, 255),
        ];
        let v = EncodedValue::from_terms(16383, &terms).unwrap();
        let expected = 16383.0 + terms.iter().map(Term::to_f64).sum::<f64>();
        assert!((to_f64(&v).unwrap() - expected).abs() < 1e-9);

        let v = EncodedValue::from_terms(-16383, &terms).unwrap();
        let expected = -16383.0 + terms.iter().map(Term::to_f64).sum::<f64>();
        assert!((to_f64(&v).unwrap() - expected).abs() < 1e-9);
    }
}
