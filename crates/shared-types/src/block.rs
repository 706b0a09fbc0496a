//! # Blocks
//!
//! ## Header Layout
//!
//! ```text
//! version:i32 || prev_block_hash:32 || merkle_root:32 || time:u32 || proof
//! ```
//!
//! Two hashes are derived from a header:
//!
//! - **Signing hash**: SHA-256d over the header without its proof. Signers
//!   sign this, so it does not change as signatures are collected.
//! - **Block hash**: SHA-256d over the full header, proof included.

use crate::encoding::{serialize, Decodable, Encodable, Reader};
use crate::errors::EncodingResult;
use crate::hash::Hash256;
use crate::proof::Proof;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Serialized size of a header without its proof.
pub const HEADER_SIZE_WITHOUT_PROOF: usize = 4 + 32 + 32 + 4;

/// Block header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block_hash: Hash256,
    pub merkle_root: Hash256,
    pub time: u32,
    /// Federation signatures over `signing_hash()`.
    pub proof: Proof,
}

impl BlockHeader {
    /// Serialize every field except the proof.
    pub fn encode_without_proof(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(self.prev_block_hash.as_bytes());
        out.extend_from_slice(self.merkle_root.as_bytes());
        out.extend_from_slice(&self.time.to_le_bytes());
    }

    /// Message hash signed by the federation.
    ///
    /// Depends on every header field except `proof`.
    pub fn signing_hash(&self) -> Hash256 {
        let mut out = Vec::with_capacity(HEADER_SIZE_WITHOUT_PROOF);
        self.encode_without_proof(&mut out);
        Hash256::double_sha256(&out)
    }

    /// Block identifier; covers the proof.
    pub fn hash(&self) -> Hash256 {
        Hash256::double_sha256(&serialize(self))
    }
}

impl Encodable for BlockHeader {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.encode_without_proof(out);
        self.proof.consensus_encode(out);
    }
}

impl Decodable for BlockHeader {
    fn consensus_decode(reader: &mut Reader<'_>) -> EncodingResult<Self> {
        Ok(Self {
            version: reader.read_i32_le()?,
            prev_block_hash: Hash256::from_bytes(reader.read_array()?),
            merkle_root: Hash256::from_bytes(reader.read_array()?),
            time: reader.read_u32_le()?,
            proof: Proof::consensus_decode(reader)?,
        })
    }
}

/// A header plus its transactions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }

    pub fn signing_hash(&self) -> Hash256 {
        self.header.signing_hash()
    }

    /// Merkle root over the transaction ids.
    pub fn compute_merkle_root(&self) -> Hash256 {
        let txids: Vec<Hash256> = self.transactions.iter().map(Transaction::txid).collect();
        merkle_root(&txids)
    }
}

impl Encodable for Block {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.header.consensus_encode(out);
        self.transactions.consensus_encode(out);
    }
}

impl Decodable for Block {
    fn consensus_decode(reader: &mut Reader<'_>) -> EncodingResult<Self> {
        Ok(Self {
            header: BlockHeader::consensus_decode(reader)?,
            transactions: Vec::<Transaction>::consensus_decode(reader)?,
        })
    }
}

/// Merkle root of `leaves`. Odd levels duplicate their last node.
///
/// Returns `Hash256::ZERO` for an empty slice.
pub fn merkle_root(leaves: &[Hash256]) -> Hash256 {
    if leaves.is_empty() {
        return Hash256::ZERO;
    }
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            if let Some(last) = level.last().copied() {
                level.push(last);
            }
        }
        level = level
            .chunks(2)
            .map(|pair| {
                let mut buf = [0u8; 64];
                buf[..32].copy_from_slice(pair[0].as_bytes());
                buf[32..].copy_from_slice(pair[1].as_bytes());
                Hash256::double_sha256(&buf)
            })
            .collect();
    }
    level[0]
}
