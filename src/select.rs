//! Antichain denominator selection.
//!
//! Given a reduced remainder `r/d` with `0 < r < d`, find terms over
//! `128..=255` that spell it:
//!
//! 1. **Single exact**: `N/D == r/d`. Because `r/d` is reduced this happens
//!    exactly when `d` divides `D`, so the first multiple of `d` in range wins.
//! 2. **Double exact**: `N1/D1 + N2/D2 == r/d` with `D1 < D2`.
//! 3. **Approximate**: the single `N/D` closest to `r/d`.
//!
//! The first stage that succeeds is used. Searches are ascending in the
//! denominator, so results are deterministic.

use num_integer::Integer;

use crate::term::{Term, MAX_DENOMINATOR, MAX_NUMERATOR, MIN_DENOMINATOR};

const DENOMINATORS: std::ops::RangeInclusive<i64> = MIN_DENOMINATOR as i64..=MAX_DENOMINATOR as i64;

// lcm of the two largest window denominators; a two-term sum reduces to a
// divisor of some lcm(D1, D2) <= 255 * 254
const MAX_PAIR_DENOMINATOR: i64 = MAX_DENOMINATOR as i64 * (MAX_DENOMINATOR as i64 - 1);

/// Best single-term approximation of a remainder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Approximation {
    /// Rounded numerator, in `0..=denominator`. `0` means the closest
    /// spelling is "no term", `denominator` means "one whole unit".
    pub numerator: u8,
    /// Chosen denominator.
    pub denominator: u8,
    /// `|numerator/denominator - r/d|`.
    pub error: f64,
}

impl Approximation {
    /// The approximation as a storable term, unless it rounded to 0 or 1.
    pub fn term(&self) -> Option<Term> {
        if self.numerator == 0 || self.numerator >= self.denominator {
            return None;
        }
        Term::new(self.numerator as u32, self.denominator as u32).ok()
    }

    /// True if the approximation rounded up to a whole unit.
    pub fn carries_unit(&self) -> bool {
        self.numerator >= self.denominator
    }
}

/// Outcome of [`select`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selection {
    /// One exact term.
    Single(Term),
    /// Two exact terms, ascending denominators.
    Double(Term, Term),
    /// No exact form with one or two terms.
    Approximate(Approximation),
}

impl Selection {
    /// True for `Single` and `Double`.
    pub fn is_exact(&self) -> bool {
        !matches!(self, Selection::Approximate(_))
    }
}

fn exact_term(numer: i64, denom: i64) -> Option<Term> {
    Term::new(u32::try_from(numer).ok()?, u32::try_from(denom).ok()?).ok()
}

/// First `D` ascending with `r/d == N/D` for an integral `N` in `1..=255`.
pub fn single_exact(r: i64, d: i64) -> Option<Term> {
    debug_assert!(0 < r && r < d);
    // an exact term needs d | D
    if d > MAX_DENOMINATOR as i64 {
        return None;
    }
    DENOMINATORS
        .filter(|&den| (r * den) % d == 0)
        .find_map(|den| exact_term(r * den / d, den))
}

/// Two terms with distinct denominators whose sum is exactly `r/d`.
///
/// `D1` ascends; for each `D1`, `N1` descends from the largest value not
/// exceeding `r/d`; for each `N1` the leftover must be a single term over
/// the smallest admissible `D2 > D1`. Larger `D2` would only raise `N2`, so
/// the smallest multiple is the only candidate per `N1`.
///
/// Searching `D2` before `N1` can return a different pair for remainders
/// with several two-term spellings; both orders find one whenever one exists.
pub fn double_exact(r: i64, d: i64) -> Option<(Term, Term)> {
    debug_assert!(0 < r && r < d);
    if d > MAX_PAIR_DENOMINATOR {
        return None;
    }
    for d1 in DENOMINATORS {
        let max_n1 = (r * d1 / d).min(MAX_NUMERATOR as i64);
        for n1 in (1..=max_n1).rev() {
            // r/d - n1/d1 = (r*d1 - n1*d) / (d*d1)
            let leftover = r * d1 - n1 * d;
            if leftover <= 0 {
                continue;
            }
            let span = d * d1;
            let g = leftover.gcd(&span);
            let (rem_num, rem_den) = (leftover / g, span / g);

            let d2 = (d1 / rem_den + 1) * rem_den;
            if d2 > MAX_DENOMINATOR as i64 {
                continue;
            }
            let n2 = rem_num * (d2 / rem_den);
            if let (Some(first), Some(second)) = (exact_term(n1, d1), exact_term(n2, d2)) {
                tracing::trace!(%first, %second, r, d, "double exact match");
                return Some((first, second));
            }
        }
    }
    None
}

/// Single term minimising `|N/D - r/d|`, ties to the smallest `D`.
///
/// Errors are compared as exact cross products so ties are real ties.
pub fn approximate(r: i64, d: i64) -> Approximation {
    debug_assert!(0 < r && r < d);
    // (numerator, denominator, |n*d - r*den|)
    let mut best: Option<(i64, i64, i128)> = None;
    for den in DENOMINATORS {
        let n = ((2 * r as i128 * den as i128 + d as i128) / (2 * d as i128)) as i64;
        let n = n.min(MAX_NUMERATOR as i64);
        let err = (n as i128 * d as i128 - r as i128 * den as i128).abs();
        let better = match best {
            None => true,
            // err/(den*d) < best_err/(best_den*d)
            Some((_, best_den, best_err)) => err * (best_den as i128) < best_err * (den as i128),
        };
        if better {
            best = Some((n, den, err));
        }
    }
    let (numerator, denominator, err) = best.unwrap_or((0, MIN_DENOMINATOR as i64, r as i128));
    Approximation {
        numerator: numerator as u8,
        denominator: denominator as u8,
        error: err as f64 / (denominator as f64 * d as f64),
    }
}

/// Single exact, then double exact, then approximate.
pub fn select(r: i64, d: i64) -> Selection {
    if let Some(term) = single_exact(r, d) {
        return Selection::Single(term);
    }
    if let Some((first, second)) = double_exact(r, d) {
        return Selection::Double(first, second);
    }
    Selection::Approximate(approximate(r, d))
}
