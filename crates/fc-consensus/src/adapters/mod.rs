//! Adapters layer (Hexagonal Architecture)

mod ecdsa;

pub use ecdsa::*;
