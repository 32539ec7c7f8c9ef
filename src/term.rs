//! Fractional terms and the bounded term list.
//!
//! A term is one `numerator/denominator` pair with the denominator drawn from
//! the antichain range `128..=255`. No denominator in that range divides
//! another, so a fraction that fits one of them never has a second,
//! redundant spelling at a multiple.

use std::fmt;

use crate::error::{Error, Result};

/// Smallest antichain denominator.
pub const MIN_DENOMINATOR: u8 = 128;

/// Largest antichain denominator.
pub const MAX_DENOMINATOR: u8 = 255;

/// Largest storable numerator (one byte on the wire).
pub const MAX_NUMERATOR: u8 = 255;

/// Number of distinct antichain denominators.
pub const DENOMINATOR_COUNT: usize = (MAX_DENOMINATOR - MIN_DENOMINATOR) as usize + 1;

/// Maximum number of terms a value can carry.
pub const MAX_TERMS: usize = 5;

/// One fractional term: `numerator / denominator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    numerator: u8,
    denominator: u8,
}

impl Term {
    /// Create a term, checking `numerator` in `1..=255` and `denominator` in `128..=255`.
    ///
    /// # Errors
    /// Returns `Error::InvalidTerm` if either field is out of range.
    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        let num_ok = (1..=MAX_NUMERATOR as u32).contains(&numerator);
        let den_ok = (MIN_DENOMINATOR as u32..=MAX_DENOMINATOR as u32).contains(&denominator);
        if !num_ok || !den_ok {
            return Err(Error::InvalidTerm {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator: numerator as u8,
            denominator: denominator as u8,
        })
    }

    /// Rebuild a term from its wire fields. `offset` is masked to 7 bits.
    pub(crate) fn from_wire(numerator: u8, offset: u8) -> Option<Self> {
        if numerator == 0 {
            return None;
        }
        Some(Self {
            numerator,
            denominator: MIN_DENOMINATOR + (offset & 0x7F),
        })
    }

    /// The numerator, in `1..=255`.
    pub fn numerator(&self) -> u8 {
        self.numerator
    }

    /// The denominator, in `128..=255`.
    pub fn denominator(&self) -> u8 {
        self.denominator
    }

    /// Distance of the denominator from [`MIN_DENOMINATOR`]; the 7-bit wire field.
    pub fn offset(&self) -> u8 {
        self.denominator - MIN_DENOMINATOR
    }

    /// True if the numerator is at least the denominator, i.e. the term is
    /// worth one or more whole units and is not canonical.
    pub fn is_improper(&self) -> bool {
        self.numerator >= self.denominator
    }

    /// Approximate value as `f64`.
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// Fills unused slots so the array can be `Copy` without `Option`.
const VACANT: Term = Term {
    numerator: 1,
    denominator: MIN_DENOMINATOR,
};

/// A fixed-capacity list of at most [`MAX_TERMS`] terms that carries its own length.
#[derive(Clone, Copy)]
pub struct Terms {
    slots: [Term; MAX_TERMS],
    len: u8,
}

impl Terms {
    /// An empty list.
    pub const fn new() -> Self {
        Self {
            slots: [VACANT; MAX_TERMS],
            len: 0,
        }
    }

    /// Copy terms from a slice.
    ///
    /// # Errors
    /// Returns `Error::TermCapacityExceeded` if the slice is longer than [`MAX_TERMS`].
    pub fn from_slice(terms: &[Term]) -> Result<Self> {
        if terms.len() > MAX_TERMS {
            return Err(Error::TermCapacityExceeded {
                needed: terms.len(),
            });
        }
        let mut out = Self::new();
        out.slots[..terms.len()].copy_from_slice(terms);
        out.len = terms.len() as u8;
        Ok(out)
    }

    /// Append a term.
    ///
    /// # Errors
    /// Returns `Error::TermCapacityExceeded` if the list is already full.
    pub fn push(&mut self, term: Term) -> Result<()> {
        let len = self.len();
        if len == MAX_TERMS {
            return Err(Error::TermCapacityExceeded { needed: len + 1 });
        }
        self.slots[len] = term;
        self.len += 1;
        Ok(())
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The terms as a slice.
    pub fn as_slice(&self) -> &[Term] {
        &self.slots[..self.len()]
    }

    /// Iterate over the terms in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.as_slice().iter()
    }

    /// True if denominators are strictly ascending (hence also distinct).
    pub fn is_strictly_ascending(&self) -> bool {
        self.as_slice()
            .windows(2)
            .all(|w| w[0].denominator < w[1].denominator)
    }
}

impl Default for Terms {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Terms {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Terms {}

impl std::hash::Hash for Terms {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for Terms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Terms {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
