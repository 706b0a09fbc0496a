//! Key and address encoding errors.

use shared_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyIoError {
    /// Not valid Base58, or the checksum does not match.
    #[error("Invalid Base58Check string: {0}")]
    InvalidBase58(String),

    /// Decoded payload has an unexpected prefix or length.
    #[error("Unrecognized payload ({len} bytes)")]
    UnrecognizedPayload { len: usize },

    #[error("Invalid secret key: {0}")]
    InvalidSecret(#[from] CryptoError),

    /// `Destination::None` has no textual form.
    #[error("Destination has no address")]
    NoDestination,
}

pub type KeyIoResult<T> = Result<T, KeyIoError>;
