//! Error types.

use thiserror::Error;

/// Error constructing a ULID from a field value wider than its bit width.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Error)]
pub enum RangeError {
    /// The timestamp does not fit in 48 bits.
    #[error("timestamp {0} exceeds 48 bits")]
    Timestamp(u64),

    /// The random field does not fit in 80 bits.
    #[error("randomness {0:#x} exceeds 80 bits")]
    Randomness(u128),
}

/// Error parsing an invalid string representation of ULID.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Error)]
pub enum ParseError {
    /// The input has the wrong number of bytes.
    #[error("invalid length: {0}")]
    InvalidLength(usize),

    /// The input contains a byte outside the accepted digit set.
    #[error("invalid digit at index {index}")]
    InvalidChar {
        /// Byte offset of the offending character.
        index: usize,
    },

    /// A dash is missing or misplaced in the GUID form.
    #[error("misplaced separator at index {index}")]
    InvalidSeparator {
        /// Byte offset where a dash was expected.
        index: usize,
    },

    /// The leading base32 digit would push the value past 128 bits.
    #[error("value exceeds 128 bits")]
    Overflow,
}

/// Error returned by the ULID factories.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Error)]
pub enum Error {
    /// The requested timestamp is out of range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// The random field overflowed at the maximum timestamp, so no greater ULID exists.
    #[error("random field exhausted at the maximum timestamp")]
    Exhausted,
}
