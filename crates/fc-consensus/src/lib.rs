//! # fc-consensus
//!
//! Federated block-signing consensus.
//!
//! ## Architecture
//!
//! A block is valid when it carries signatures from at least `threshold` of a
//! fixed, ordered list of signer keys. Signatures are collected in any order
//! and then absorbed into the block:
//!
//! ```text
//! candidate proof ──→ [ProofAbsorber] ──→ canonical proof on the header
//!                         │    ↑
//!          SignatureVerifier   MultisigCondition (from chain parameters)
//! ```
//!
//! The canonical proof lists exactly the verified signatures in signer order,
//! so every node serializes an accepted block to the same bytes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fc_consensus::{EcdsaVerifier, MultisigCondition, ProofAbsorber};
//!
//! let quorum = MultisigCondition::new(signer_keys, 2)?;
//! let absorber = ProofAbsorber::new(EcdsaVerifier::new());
//! if absorber.absorb(&mut block.header, &candidate, &quorum) {
//!     // block.header.proof is now canonical
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-export main types
pub use adapters::EcdsaVerifier;
pub use domain::{
    Absorption, AbsorptionConfig, ConsensusError, ConsensusResult, MultisigCondition,
    ProofAbsorber,
};
pub use ports::SignatureVerifier;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorption_config_default() {
        let config = AbsorptionConfig::default();
        assert!(config.parallel_min_work > 0);
    }
}
