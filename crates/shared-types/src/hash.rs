//! # 256-bit Hashes
//!
//! `Hash256` stores digest bytes in the order the hash function produced them.
//! Textual forms (`Display`, `to_hex`, `from_hex`) use the reversed byte order
//! that block explorers and RPC interfaces have always shown.

use crate::errors::{EncodingError, EncodingResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A 32-byte hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    /// The all-zero hash (previous-block hash of a genesis block).
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    /// Wrap raw digest bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// SHA-256 applied twice.
    pub fn double_sha256(data: &[u8]) -> Self {
        let first = Sha256::digest(data);
        Self(Sha256::digest(first).into())
    }

    /// Whether every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Reversed-order hex, as displayed by RPC.
    pub fn to_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }

    /// Parse reversed-order hex.
    pub fn from_hex(s: &str) -> EncodingResult<Self> {
        let bytes = hex::decode(s).map_err(|e| EncodingError::InvalidHex(e.to_string()))?;
        let mut array: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| EncodingError::InvalidHex(format!("expected 32 bytes, got {}", v.len())))?;
        array.reverse();
        Ok(Self(array))
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}
