//! # Digests
//!
//! SHA-256 based digests used across the chain.
//!
//! | Function | Definition | Used for |
//! |----------|------------|----------|
//! | `sha256d` | SHA-256(SHA-256(x)) | block, transaction and merkle hashes |
//! | `hash160` | RIPEMD-160(SHA-256(x)) | public key and script hashes in addresses |

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// 32-byte digest.
pub type Hash = [u8; 32];

/// 20-byte digest.
pub type Hash160 = [u8; 20];

/// Single SHA-256.
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Double SHA-256.
pub fn sha256d(data: &[u8]) -> Hash {
    Sha256::digest(Sha256::digest(data)).into()
}

/// RIPEMD-160 of SHA-256.
pub fn hash160(data: &[u8]) -> Hash160 {
    Ripemd160::digest(Sha256::digest(data)).into()
}
