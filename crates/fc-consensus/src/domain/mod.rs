//! Domain layer for federated block signing
//!
//! - multisig: the signer quorum
//! - absorb: matching and ordering candidate signatures into a block proof

mod absorb;
mod error;
mod multisig;

pub use absorb::*;
pub use error::*;
pub use multisig::*;
