//! Driven ports (Outbound dependencies)

use shared_crypto::Secp256k1PublicKey;
use shared_types::Hash256;
use std::sync::Arc;

/// Signature check used by the absorption engine.
///
/// Implementations must be pure: the same inputs always give the same
/// answer. The engine may call `verify` from several threads at once.
pub trait SignatureVerifier: Send + Sync {
    /// Whether `signature` is a valid signature by `pubkey` over `message_hash`.
    ///
    /// Malformed signature bytes return `false`; this never panics.
    fn verify(&self, pubkey: &Secp256k1PublicKey, message_hash: &Hash256, signature: &[u8]) -> bool;
}

impl<T: SignatureVerifier + ?Sized> SignatureVerifier for Arc<T> {
    fn verify(&self, pubkey: &Secp256k1PublicKey, message_hash: &Hash256, signature: &[u8]) -> bool {
        (**self).verify(pubkey, message_hash, signature)
    }
}
