//! # Consensus Wire Codec
//!
//! Byte-exact serialization shared by every node on the network. Integers are
//! little-endian; lengths and counts use the CompactSize varint:
//!
//! | Value | Encoding |
//! |-------|----------|
//! | `< 0xfd` | 1 byte |
//! | `<= 0xffff` | `0xfd` + u16 |
//! | `<= 0xffff_ffff` | `0xfe` + u32 |
//! | otherwise | `0xff` + u64 |
//!
//! Decoding rejects non-canonical CompactSize forms so that one value has
//! exactly one encoding.

use crate::errors::{EncodingError, EncodingResult};

/// Largest length prefix accepted when decoding.
pub const MAX_SIZE: u64 = 0x0200_0000;

/// Upper bound on speculative preallocation while decoding vectors.
const MAX_PREALLOC: usize = 4096;

/// A value with a consensus wire encoding.
pub trait Encodable {
    /// Append the encoding of `self` to `out`.
    fn consensus_encode(&self, out: &mut Vec<u8>);
}

/// A value that can be read back from its consensus wire encoding.
pub trait Decodable: Sized {
    /// Read one value from `reader`.
    fn consensus_decode(reader: &mut Reader<'_>) -> EncodingResult<Self>;
}

/// Serialize a value to a fresh buffer.
pub fn serialize<T: Encodable + ?Sized>(value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    value.consensus_encode(&mut out);
    out
}

/// Deserialize a value, requiring that every input byte is consumed.
pub fn deserialize<T: Decodable>(bytes: &[u8]) -> EncodingResult<T> {
    let mut reader = Reader::new(bytes);
    let value = T::consensus_decode(&mut reader)?;
    if !reader.is_empty() {
        return Err(EncodingError::TrailingBytes(reader.remaining()));
    }
    Ok(value)
}

/// Deserialize a value from hex text.
pub fn deserialize_hex<T: Decodable>(text: &str) -> EncodingResult<T> {
    let bytes = hex::decode(text.trim()).map_err(|e| EncodingError::InvalidHex(e.to_string()))?;
    deserialize(&bytes)
}

/// Cursor over a byte slice.
#[derive(Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> EncodingResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(EncodingError::UnexpectedEnd {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> EncodingResult<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> EncodingResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16_le(&mut self) -> EncodingResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> EncodingResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32_le(&mut self) -> EncodingResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> EncodingResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64_le(&mut self) -> EncodingResult<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }
}

// =============================================================================
// CompactSize
// =============================================================================

/// Append a CompactSize varint.
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    if n < 0xfd {
        out.push(n as u8);
    } else if n <= 0xffff {
        out.push(0xfd);
        out.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= 0xffff_ffff {
        out.push(0xfe);
        out.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&n.to_le_bytes());
    }
}

/// Number of bytes `write_compact_size` emits for `n`.
pub fn compact_size_len(n: u64) -> usize {
    match n {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Read a CompactSize varint, rejecting non-canonical forms and values above `MAX_SIZE`.
pub fn read_compact_size(reader: &mut Reader<'_>) -> EncodingResult<u64> {
    let marker = reader.read_u8()?;
    let value = match marker {
        0xfd => {
            let v = u64::from(reader.read_u16_le()?);
            if v < 0xfd {
                return Err(EncodingError::NonCanonicalCompactSize(v));
            }
            v
        }
        0xfe => {
            let v = u64::from(reader.read_u32_le()?);
            if v <= 0xffff {
                return Err(EncodingError::NonCanonicalCompactSize(v));
            }
            v
        }
        0xff => {
            let v = reader.read_u64_le()?;
            if v <= 0xffff_ffff {
                return Err(EncodingError::NonCanonicalCompactSize(v));
            }
            v
        }
        small => u64::from(small),
    };
    if value > MAX_SIZE {
        return Err(EncodingError::SizeTooLarge(value));
    }
    Ok(value)
}

/// Append a length-prefixed byte string.
pub fn write_var_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_compact_size(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

/// Read a length-prefixed byte string.
pub fn read_var_bytes(reader: &mut Reader<'_>) -> EncodingResult<Vec<u8>> {
    let len = read_compact_size(reader)? as usize;
    Ok(reader.read_bytes(len)?.to_vec())
}

impl<T: Encodable> Encodable for Vec<T> {
    fn consensus_encode(&self, out: &mut Vec<u8>) {
        write_compact_size(out, self.len() as u64);
        for item in self {
            item.consensus_encode(out);
        }
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn consensus_decode(reader: &mut Reader<'_>) -> EncodingResult<Self> {
        let count = read_compact_size(reader)? as usize;
        let mut items = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            items.push(T::consensus_decode(reader)?);
        }
        Ok(items)
    }
}
