//! # Shared Crypto - Signing and Hashing Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `ecdsa` | secp256k1 | Block proof signatures, address keys |
//! | `hashing` | SHA-256d, HASH160 | Block/tx ids, address payloads |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization
//! - **Verification**: total over its input; malformed signatures are `false`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey};
pub use errors::CryptoError;
pub use hashing::{hash160, sha256, sha256d};
