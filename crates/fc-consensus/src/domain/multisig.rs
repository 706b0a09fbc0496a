//! Signer quorum
//!
//! The ordered signer list is fixed by network configuration. A signer's
//! position decides where its signature lands in every block proof.

use super::{ConsensusError, ConsensusResult};
use shared_crypto::Secp256k1PublicKey;
use std::collections::HashSet;

/// Ordered signer public keys plus the number of signatures a block needs.
///
/// Invariant: `1 <= threshold <= signers.len()` and no signer appears twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultisigCondition {
    signers: Vec<Secp256k1PublicKey>,
    threshold: usize,
}

impl MultisigCondition {
    /// Build a quorum, keeping `signers` in the given order.
    ///
    /// Two encodings of the same point count as a repeated signer.
    pub fn new(signers: Vec<Secp256k1PublicKey>, threshold: usize) -> ConsensusResult<Self> {
        if threshold == 0 {
            return Err(ConsensusError::InvalidQuorum(
                "threshold must be at least 1".into(),
            ));
        }
        if threshold > signers.len() {
            return Err(ConsensusError::InvalidQuorum(format!(
                "threshold {} exceeds signer count {}",
                threshold,
                signers.len()
            )));
        }

        let mut seen = HashSet::with_capacity(signers.len());
        for signer in &signers {
            if !seen.insert(signer.to_compressed()) {
                return Err(ConsensusError::InvalidQuorum(format!(
                    "repeated signer {}",
                    signer.to_hex()
                )));
            }
        }

        Ok(Self { signers, threshold })
    }

    pub fn signer_count(&self) -> usize {
        self.signers.len()
    }

    /// Public key of the signer at `index`.
    pub fn pubkey_at(&self, index: usize) -> ConsensusResult<&Secp256k1PublicKey> {
        self.signers
            .get(index)
            .ok_or(ConsensusError::IndexOutOfRange {
                index,
                len: self.signers.len(),
            })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn signers(&self) -> &[Secp256k1PublicKey] {
        &self.signers
    }

    /// Position of `pubkey` in the signer order.
    pub fn position(&self, pubkey: &Secp256k1PublicKey) -> Option<usize> {
        self.signers.iter().position(|s| s == pubkey)
    }
}
