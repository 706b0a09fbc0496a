//! # ECDSA Signatures (secp256k1)
//!
//! Block signatures are DER-encoded ECDSA signatures over a 32-byte message
//! hash. The hash is signed as-is (no further hashing).
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Signatures are produced low-S; high-S inputs are normalized before
//!   verification
//! - Lax DER parsing on verification, matching what signing nodes accept.
//!   Padding and long-form lengths are tolerated and trailing bytes after S
//!   are ignored. Anything unparseable is `false`
//! - Secret keys are zeroized on drop by `SigningKey`

use crate::CryptoError;
use k256::ecdsa::{
    signature::hazmat::{PrehashSigner, PrehashVerifier},
    Signature, SigningKey, VerifyingKey,
};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a compressed SEC1 public key.
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

/// Length of an uncompressed SEC1 public key.
pub const PUBLIC_KEY_SIZE: usize = 65;

/// secp256k1 public key in compressed (33 byte) or uncompressed (65 byte) form.
///
/// Equality and ordering follow the serialized bytes, so the same point in
/// two forms compares unequal.
#[derive(Clone)]
pub struct Secp256k1PublicKey {
    key: VerifyingKey,
    bytes: Vec<u8>,
}

impl Secp256k1PublicKey {
    /// Parse a SEC1 encoding, keeping its compressed/uncompressed form.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let compressed = match bytes.len() {
            COMPRESSED_PUBLIC_KEY_SIZE => true,
            PUBLIC_KEY_SIZE => false,
            actual => {
                return Err(CryptoError::InvalidKeyLength {
                    expected: COMPRESSED_PUBLIC_KEY_SIZE,
                    actual,
                })
            }
        };
        let key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self::from_verifying_key(key, compressed))
    }

    /// Parse a hex-encoded SEC1 public key.
    pub fn from_hex(text: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(text.trim()).map_err(|_| CryptoError::InvalidPublicKey)?;
        Self::from_slice(&bytes)
    }

    fn from_verifying_key(key: VerifyingKey, compressed: bool) -> Self {
        let bytes = key.to_encoded_point(compressed).as_bytes().to_vec();
        Self { key, bytes }
    }

    /// Serialized SEC1 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether this is the 33-byte form.
    pub fn is_compressed(&self) -> bool {
        self.bytes.len() == COMPRESSED_PUBLIC_KEY_SIZE
    }

    /// The same point in compressed form.
    pub fn to_compressed(&self) -> Self {
        Self::from_verifying_key(self.key.clone(), true)
    }

    /// Verify a DER signature over a 32-byte message hash.
    ///
    /// Returns `false` for malformed DER instead of an error.
    pub fn verify_prehash(&self, message_hash: &[u8; 32], der_signature: &[u8]) -> bool {
        let Some(signature) = parse_der_lax(der_signature) else {
            return false;
        };
        let signature = signature.normalize_s().unwrap_or(signature);
        self.key.verify_prehash(message_hash, &signature).is_ok()
    }

    /// Lowercase hex of the serialized bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl PartialEq for Secp256k1PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Secp256k1PublicKey {}

impl PartialOrd for Secp256k1PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Secp256k1PublicKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl Hash for Secp256k1PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secp256k1PublicKey({})", self.to_hex())
    }
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
    compressed: bool,
}

impl Secp256k1KeyPair {
    /// Generate random keypair with a compressed public key.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self {
            signing_key,
            compressed: true,
        }
    }

    /// Create from secret key bytes (32 bytes) with a compressed public key.
    pub fn from_bytes(mut bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let result = Self::from_secret(&bytes, true);
        bytes.zeroize();
        result
    }

    /// Create from a 32-byte secret slice with a compressed public key.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        Self::from_secret(bytes, true)
    }

    /// Create from a 32-byte secret; `compressed` selects the form
    /// `public_key` returns.
    pub fn from_secret(bytes: &[u8], compressed: bool) -> Result<Self, CryptoError> {
        if bytes.len() != 32 {
            return Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let signing_key =
            SigningKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self {
            signing_key,
            compressed,
        })
    }

    /// Whether `public_key` returns the compressed form.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Public key in the selected form.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey::from_verifying_key(
            self.signing_key.verifying_key().clone(),
            self.compressed,
        )
    }

    /// Sign a 32-byte message hash, returning a low-S DER signature.
    pub fn sign_prehash(&self, message_hash: &[u8; 32]) -> Result<Vec<u8>, CryptoError> {
        let signature: Signature = self
            .signing_key
            .sign_prehash(message_hash)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);
        Ok(signature.to_der().as_bytes().to_vec())
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

// The only secret field is a `SigningKey`, which zeroizes itself.
impl ZeroizeOnDrop for Secp256k1KeyPair {}

/// Parse a DER-like signature the way the reference node's lax parser does.
///
/// `None` when the structure is unreadable or either integer does not fit in
/// 32 bytes or is out of range.
fn parse_der_lax(input: &[u8]) -> Option<Signature> {
    if *input.first()? != 0x30 {
        return None;
    }
    let mut pos = 1;
    // Sequence length: long-form bytes are skipped, the value is not checked.
    let len_byte = *input.get(pos)?;
    pos += 1;
    if len_byte & 0x80 != 0 {
        let skip = usize::from(len_byte & 0x7f);
        if skip > input.len() - pos {
            return None;
        }
        pos += skip;
    }

    let r = read_integer(input, &mut pos)?;
    let s = read_integer(input, &mut pos)?;
    Signature::from_scalars(r, s).ok()
}

/// One `INTEGER` at `pos`, right-aligned into 32 bytes.
fn read_integer(input: &[u8], pos: &mut usize) -> Option<[u8; 32]> {
    if *input.get(*pos)? != 0x02 {
        return None;
    }
    *pos += 1;

    let len_byte = *input.get(*pos)?;
    *pos += 1;
    let len = if len_byte & 0x80 == 0 {
        usize::from(len_byte)
    } else {
        let width = usize::from(len_byte & 0x7f);
        let field = input.get(*pos..*pos + width)?;
        *pos += width;
        let digits: Vec<u8> = field.iter().copied().skip_while(|b| *b == 0).collect();
        if digits.len() >= std::mem::size_of::<usize>() {
            return None;
        }
        digits
            .iter()
            .fold(0usize, |acc, b| (acc << 8) | usize::from(*b))
    };

    let value = input.get(*pos..*pos + len)?;
    *pos += len;

    let leading = value.iter().take_while(|b| **b == 0).count();
    let digits = &value[leading..];
    if digits.len() > 32 {
        return None;
    }
    let mut out = [0u8; 32];
    out[32 - digits.len()..].copy_from_slice(digits);
    Some(out)
}
