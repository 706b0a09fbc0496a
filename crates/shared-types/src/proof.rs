//! # Block Proof
//!
//! The consensus proof carried by every block header: an ordered list of raw
//! signature byte strings. Appending performs no validation. Ordering and
//! filtering happen when a candidate proof is absorbed against the active
//! quorum.
//!
//! ## Wire Format
//!
//! ```text
//! count:CompactSize || (len:CompactSize || sig_bytes) * count
//! ```
//!
//! An empty proof is the single byte `0x00`.

use crate::encoding::{
    compact_size_len, read_compact_size, read_var_bytes, write_compact_size, write_var_bytes,
    Decodable, Encodable, Reader, MAX_SIZE,
};
use crate::errors::{EncodingResult, ProofError};
use serde::{Deserialize, Serialize};

/// Ordered sequence of signature byte strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Proof {
    signatures: Vec<Vec<u8>>,
}

impl Proof {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a signature. Duplicates and malformed entries are accepted.
    pub fn append(&mut self, signature: impl Into<Vec<u8>>) {
        self.signatures.push(signature.into());
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Signature at `index`.
    pub fn get(&self, index: usize) -> Result<&[u8], ProofError> {
        self.signatures
            .get(index)
            .map(Vec::as_slice)
            .ok_or(ProofError::IndexOutOfRange {
                index,
                len: self.signatures.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.signatures.iter().map(Vec::as_slice)
    }

    pub fn as_slice(&self) -> &[Vec<u8>] {
        &self.signatures
    }

    pub fn clear(&mut self) {
        self.signatures.clear();
    }

    /// Size of the wire encoding in bytes.
    pub fn encoded_len(&self) -> usize {
        compact_size_len(self.signatures.len() as u64)
            + self
                .signatures
                .iter()
                .map(|s| compact_size_len(s.len() as u64) + s.len())
                .sum::<usize>()
    }
}

impl From<Vec<Vec<u8>>> for Proof {
    fn from(signatures: Vec<Vec<u8>>) -> Self {
        Self { signatures }
    }
}

impl FromIterator<Vec<u8>> for Proof {
    fn from_iter<I: IntoIterator<Item = Vec<u8>>>(iter: I) -> Self {
        Self {
            signatures: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Proof {
    type Item = Vec<u8>;
    type IntoIter = std::vec::IntoIter<Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.signatures.into_iter()
    }
}

impl Encodable for Proof {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        write_compact_size(out, self.signatures.len() as u64);
        for signature in &self.signatures {
            write_var_bytes(out, signature);
        }
    }
}

impl Decodable for Proof {
    fn consensus_decode(reader: &mut Reader<'_>) -> EncodingResult<Self> {
        let count = read_compact_size(reader)?;
        // Every entry costs at least its one-byte length prefix.
        let capacity = count.min(reader.remaining() as u64).min(MAX_SIZE) as usize;
        let mut signatures = Vec::with_capacity(capacity);
        for _ in 0..count {
            signatures.push(read_var_bytes(reader)?);
        }
        Ok(Self { signatures })
    }
}
