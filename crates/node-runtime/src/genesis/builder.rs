//! # Genesis Block Builder
//!
//! Creates and validates the genesis block for chain initialization.

use std::time::{SystemTime, UNIX_EPOCH};

use fc_consensus::{MultisigCondition, ProofAbsorber, SignatureVerifier};
use shared_crypto::{CryptoError, Secp256k1KeyPair};
use shared_types::{
    Block, BlockHeader, Hash256, OutPoint, Proof, Script, Transaction, TxIn, TxOut,
    SEQUENCE_FINAL,
};
use thiserror::Error;
use tracing::info;

/// Genesis block creation errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// No keys were supplied to sign the block.
    #[error("No signing keys supplied")]
    NoSigningKeys,

    /// A signing key, payout address or coinbase message is unusable.
    #[error("Invalid genesis configuration: {0}")]
    InvalidConfig(String),

    #[error("Signing failed: {0}")]
    Signing(#[from] CryptoError),

    /// The proof does not satisfy the quorum.
    #[error("Genesis proof has {accepted} of {threshold} required signatures")]
    InsufficientSignatures { accepted: usize, threshold: usize },

    /// The stored proof is not in canonical signer order.
    #[error("Genesis proof is not canonical")]
    NonCanonicalProof,

    #[error("Genesis merkle root {stored} does not match transactions ({computed})")]
    MerkleMismatch { stored: Hash256, computed: Hash256 },
}

/// Coinbase reward of the genesis block.
pub const GENESIS_REWARD: i64 = 50 * 100_000_000;

/// Builder for creating genesis blocks.
///
/// The genesis block holds a single coinbase transaction paying
/// `payout` and is signed by the supplied federation keys.
#[derive(Debug, Clone)]
pub struct GenesisBuilder {
    payout: Script,
    time: u32,
    version: i32,
    reward: i64,
    message: Vec<u8>,
}

impl GenesisBuilder {
    pub fn new(payout: Script) -> Self {
        Self {
            payout,
            time: current_time(),
            version: 1,
            reward: GENESIS_REWARD,
            message: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: u32) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_reward(mut self, reward: i64) -> Self {
        self.reward = reward;
        self
    }

    /// Bytes pushed in the coinbase input script.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Vec<u8>>) -> Self {
        self.message = message.into();
        self
    }

    /// The genesis block with an empty proof.
    pub fn unsigned_block(&self) -> Result<Block, GenesisError> {
        let coinbase = Transaction {
            features: Transaction::CURRENT_FEATURES,
            inputs: vec![TxIn {
                prevout: OutPoint::NULL,
                script_sig: coinbase_script(&self.message)?,
                sequence: SEQUENCE_FINAL,
            }],
            outputs: vec![TxOut {
                value: self.reward,
                script_pubkey: self.payout.clone(),
            }],
            lock_time: 0,
        };

        let mut block = Block {
            header: BlockHeader {
                version: self.version,
                prev_block_hash: Hash256::ZERO,
                merkle_root: Hash256::ZERO,
                time: self.time,
                proof: Proof::new(),
            },
            transactions: vec![coinbase],
        };
        block.header.merkle_root = block.compute_merkle_root();
        Ok(block)
    }

    /// Build, sign with every key, and absorb the signatures against `quorum`.
    pub fn build<V: SignatureVerifier>(
        &self,
        keys: &[Secp256k1KeyPair],
        quorum: &MultisigCondition,
        absorber: &ProofAbsorber<V>,
    ) -> Result<Block, GenesisError> {
        if keys.is_empty() {
            return Err(GenesisError::NoSigningKeys);
        }

        let mut block = self.unsigned_block()?;
        let message = block.signing_hash();
        let candidate = keys
            .iter()
            .map(|key| key.sign_prehash(message.as_bytes()))
            .collect::<Result<Proof, _>>()?;

        if !absorber.absorb(&mut block.header, &candidate, quorum) {
            let outcome = absorber.evaluate_message(&message, &candidate, quorum);
            return Err(GenesisError::InsufficientSignatures {
                accepted: outcome.accepted,
                threshold: outcome.threshold,
            });
        }

        info!(
            hash = %block.hash(),
            signatures = block.header.proof.len(),
            "Built genesis block"
        );
        Ok(block)
    }
}

/// Check a loaded genesis block against the active quorum.
///
/// The merkle root must match the transactions and the proof must already be
/// the canonical absorption of itself.
pub fn verify_genesis<V: SignatureVerifier>(
    block: &Block,
    quorum: &MultisigCondition,
    absorber: &ProofAbsorber<V>,
) -> Result<(), GenesisError> {
    let computed = block.compute_merkle_root();
    if computed != block.header.merkle_root {
        return Err(GenesisError::MerkleMismatch {
            stored: block.header.merkle_root,
            computed,
        });
    }

    let outcome = absorber.evaluate(&block.header, &block.header.proof, quorum);
    if !outcome.is_sufficient() {
        return Err(GenesisError::InsufficientSignatures {
            accepted: outcome.accepted,
            threshold: outcome.threshold,
        });
    }
    if outcome.proof != block.header.proof {
        return Err(GenesisError::NonCanonicalProof);
    }
    Ok(())
}

/// Longest coinbase message a single `OP_PUSHDATA2` can carry.
pub const MAX_COINBASE_MESSAGE: usize = u16::MAX as usize;

/// `<push message>`; a lone `OP_0` for an empty message.
fn coinbase_script(message: &[u8]) -> Result<Script, GenesisError> {
    let mut out = Vec::with_capacity(message.len() + 3);
    match message.len() {
        0 => out.push(0x00),
        n @ 1..=75 => out.push(n as u8),
        n @ 76..=255 => out.extend_from_slice(&[0x4c, n as u8]),
        n => {
            let n = u16::try_from(n).map_err(|_| {
                GenesisError::InvalidConfig(format!(
                    "coinbase message is {} bytes, limit is {}",
                    n, MAX_COINBASE_MESSAGE
                ))
            })?;
            out.push(0x4d);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
    out.extend_from_slice(message);
    Ok(Script(out))
}

fn current_time() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u32::try_from(d.as_secs()).unwrap_or(u32::MAX))
        .unwrap_or(0)
}
