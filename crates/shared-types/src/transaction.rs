//! # Transactions
//!
//! Legacy (non-witness) transaction layout:
//!
//! ```text
//! features:i32 || inputs || outputs || lock_time:u32
//! ```
//!
//! Outpoints reference the previous transaction by its malleability-fixed
//! hash, which is computed with every input's `script_sig` left out.

use crate::encoding::{
    read_var_bytes, serialize, write_compact_size, write_var_bytes, Decodable, Encodable, Reader,
};
use crate::errors::EncodingResult;
use crate::hash::Hash256;
use serde::{Deserialize, Serialize};

/// Sequence number that disables lock-time checks for an input.
pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;

/// Raw script bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Script(pub Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Encodable for Script {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        write_var_bytes(out, &self.0);
    }
}

impl Decodable for Script {
    fn consensus_decode(reader: &mut Reader<'_>) -> EncodingResult<Self> {
        Ok(Self(read_var_bytes(reader)?))
    }
}

/// Reference to an output of a previous transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Malleability-fixed hash of the funding transaction.
    pub hash_malfix: Hash256,
    /// Output index within the funding transaction.
    pub index: u32,
}

impl OutPoint {
    /// The outpoint spent by a coinbase input.
    pub const NULL: OutPoint = OutPoint {
        hash_malfix: Hash256::ZERO,
        index: u32::MAX,
    };

    pub fn new(hash_malfix: Hash256, index: u32) -> Self {
        Self { hash_malfix, index }
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl Default for OutPoint {
    fn default() -> Self {
        Self::NULL
    }
}

impl Encodable for OutPoint {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.hash_malfix.as_bytes());
        out.extend_from_slice(&self.index.to_le_bytes());
    }
}

impl Decodable for OutPoint {
    fn consensus_decode(reader: &mut Reader<'_>) -> EncodingResult<Self> {
        let hash_malfix = Hash256::from_bytes(reader.read_array()?);
        let index = reader.read_u32_le()?;
        Ok(Self { hash_malfix, index })
    }
}

/// Transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

impl TxIn {
    fn encode_fields(&self, out: &mut Vec<u8>, with_script_sig: bool) {
        self.prevout.consensus_encode(out);
        if with_script_sig {
            self.script_sig.consensus_encode(out);
        }
        out.extend_from_slice(&self.sequence.to_le_bytes());
    }
}

impl Encodable for TxIn {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.encode_fields(out, true);
    }
}

impl Decodable for TxIn {
    fn consensus_decode(reader: &mut Reader<'_>) -> EncodingResult<Self> {
        Ok(Self {
            prevout: OutPoint::consensus_decode(reader)?,
            script_sig: Script::consensus_decode(reader)?,
            sequence: reader.read_u32_le()?,
        })
    }
}

/// Transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    /// Amount in base units.
    pub value: i64,
    pub script_pubkey: Script,
}

impl Encodable for TxOut {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.value.to_le_bytes());
        self.script_pubkey.consensus_encode(out);
    }
}

impl Decodable for TxOut {
    fn consensus_decode(reader: &mut Reader<'_>) -> EncodingResult<Self> {
        Ok(Self {
            value: reader.read_i64_le()?,
            script_pubkey: Script::consensus_decode(reader)?,
        })
    }
}

/// A transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub features: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// Default transaction features.
    pub const CURRENT_FEATURES: i32 = 1;

    /// SHA-256d of the full serialization.
    pub fn txid(&self) -> Hash256 {
        Hash256::double_sha256(&serialize(self))
    }

    /// SHA-256d of the serialization with every `script_sig` omitted.
    pub fn hash_malfix(&self) -> Hash256 {
        let mut out = Vec::new();
        self.encode_fields(&mut out, false);
        Hash256::double_sha256(&out)
    }

    /// A coinbase has exactly one input spending the null outpoint.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }

    fn encode_fields(&self, out: &mut Vec<u8>, with_script_sig: bool) {
        out.extend_from_slice(&self.features.to_le_bytes());
        write_compact_size(out, self.inputs.len() as u64);
        for input in &self.inputs {
            input.encode_fields(out, with_script_sig);
        }
        self.outputs.consensus_encode(out);
        out.extend_from_slice(&self.lock_time.to_le_bytes());
    }
}

impl Encodable for Transaction {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        self.encode_fields(out, true);
    }
}

impl Decodable for Transaction {
    fn consensus_decode(reader: &mut Reader<'_>) -> EncodingResult<Self> {
        Ok(Self {
            features: reader.read_i32_le()?,
            inputs: Vec::<TxIn>::consensus_decode(reader)?,
            outputs: Vec::<TxOut>::consensus_decode(reader)?,
            lock_time: reader.read_u32_le()?,
        })
    }
}
