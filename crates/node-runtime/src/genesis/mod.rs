//! # Genesis Module
//!
//! Genesis block creation and verification.
//!
//! The genesis block is the foundation of the chain with special properties:
//!
//! - Parent hash: 32 zero bytes
//! - One coinbase transaction, merkle root over its txid
//! - A proof satisfying the network's signed-blocks quorum
//!
//! ## Initialization Sequence
//!
//! 1. Load `genesis.<network_id>` from the data directory
//! 2. In dev mode with signing keys and no file: build, sign and write it
//! 3. Verify the proof against the active quorum

pub mod builder;

pub use builder::{
    verify_genesis, GenesisBuilder, GenesisError, GENESIS_REWARD, MAX_COINBASE_MESSAGE,
};
