//! # Shared Types Crate
//!
//! The consensus data model used by every crate in the node: hashes, the
//! wire codec, blocks, transactions and the block proof.
//!
//! ## Design Principles
//!
//! - **Byte-exact encoding**: every `Encodable` type serializes identically on
//!   every node. Peers reject anything else.
//! - **Proof outside the signed message**: `BlockHeader::signing_hash` never
//!   depends on the proof, so signatures can be collected in any order.

pub mod block;
pub mod encoding;
pub mod errors;
pub mod hash;
pub mod proof;
pub mod transaction;

pub use block::{merkle_root, Block, BlockHeader};
pub use encoding::{deserialize, deserialize_hex, serialize, Decodable, Encodable};
pub use errors::*;
pub use hash::Hash256;
pub use proof::Proof;
pub use transaction::{OutPoint, Script, Transaction, TxIn, TxOut, SEQUENCE_FINAL};
