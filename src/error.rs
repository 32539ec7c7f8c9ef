//! Error types for compact rational encoding.

use thiserror::Error;

/// Error variants for compact rational operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An integer part does not fit the 15-bit field.
    #[error("integer part {value} outside [-16383, 16383]")]
    OutOfRange {
        /// The offending value, widened so over-range inputs survive.
        value: i64,
    },

    /// A fraction was constructed with a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// An intermediate sum left the signed 32-bit range.
    #[error("overflow: {numerator}/{denominator} exceeds the i32 range")]
    Overflow {
        /// Numerator of the offending intermediate.
        numerator: i128,
        /// Denominator of the offending intermediate.
        denominator: i128,
    },

    /// No exact single or double antichain term matches the remainder.
    #[error("no exact antichain representation for {numerator}/{denominator} (best error {error:e})")]
    PrecisionLoss {
        /// Numerator of the fractional remainder.
        numerator: i64,
        /// Denominator of the fractional remainder.
        denominator: i64,
        /// Absolute error of the best single-term approximation.
        error: f64,
    },

    /// A term list would need more than the fixed number of slots.
    #[error("{needed} terms requested, at most 5 fit")]
    TermCapacityExceeded {
        /// How many terms were requested.
        needed: usize,
    },

    /// A term field lies outside its permitted range.
    #[error("invalid term {numerator}/{denominator}")]
    InvalidTerm {
        /// Numerator supplied.
        numerator: u32,
        /// Denominator supplied.
        denominator: u32,
    },

    /// The input ended before the encoded value did.
    #[error("buffer too short: need {need} bytes, have {have}")]
    Truncated {
        /// Bytes required to finish the value.
        need: usize,
        /// Bytes available.
        have: usize,
    },

    /// A term word on the wire carries a zero numerator.
    #[error("malformed term at index {index}: zero numerator")]
    MalformedTerm {
        /// Position of the term within the value.
        index: usize,
    },

    /// An I/O error occurred during stream encoding or decoding.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for compact rational operations.
pub type Result<T> = std::result::Result<T, Error>;
