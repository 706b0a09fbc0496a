//! secp256k1 adapter for the `SignatureVerifier` port

use crate::ports::SignatureVerifier;
use shared_crypto::Secp256k1PublicKey;
use shared_types::Hash256;

/// Verifies DER-encoded secp256k1 signatures over the raw message hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdsaVerifier;

impl EcdsaVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl SignatureVerifier for EcdsaVerifier {
    fn verify(&self, pubkey: &Secp256k1PublicKey, message_hash: &Hash256, signature: &[u8]) -> bool {
        pubkey.verify_prehash(message_hash.as_bytes(), signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::Secp256k1KeyPair;

    #[test]
    fn test_verifies_own_signature() {
        let kp = Secp256k1KeyPair::generate();
        let message = Hash256::double_sha256(b"header");
        let sig = kp.sign_prehash(message.as_bytes()).unwrap();

        let verifier = EcdsaVerifier::new();
        assert!(verifier.verify(&kp.public_key(), &message, &sig));
        assert!(!verifier.verify(
            &Secp256k1KeyPair::generate().public_key(),
            &message,
            &sig
        ));
    }

    #[test]
    fn test_garbage_is_false() {
        let kp = Secp256k1KeyPair::generate();
        let message = Hash256::double_sha256(b"header");
        let verifier = EcdsaVerifier::new();
        assert!(!verifier.verify(&kp.public_key(), &message, &[]));
        assert!(!verifier.verify(&kp.public_key(), &message, &[0xff; 72]));
    }
}
