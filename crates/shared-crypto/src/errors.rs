//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Public key bytes are not a valid SEC1 point
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Secret key is zero or not below the curve order
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}
