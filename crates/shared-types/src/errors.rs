//! # Error Types
//!
//! Defines error types used by the consensus data model.

use thiserror::Error;

/// Errors raised while encoding or decoding consensus structures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Input ended before the structure was complete.
    #[error("Unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },

    /// A CompactSize value was not encoded in its shortest form.
    #[error("Non-canonical CompactSize encoding for {0}")]
    NonCanonicalCompactSize(u64),

    /// A length prefix exceeded `MAX_SIZE`.
    #[error("Size too large: {0}")]
    SizeTooLarge(u64),

    /// Bytes were left over after decoding a complete value.
    #[error("Trailing data: {0} bytes left after decoding")]
    TrailingBytes(usize),

    /// Hex text could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

/// Result alias for codec operations.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Errors raised by `Proof` accessors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProofError {
    /// Index past the end of the proof.
    #[error("Index out of range: {index} >= {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
