//! # Integration Tests
//!
//! - `signed_block_vector` - a 3-of-3 signed block with nine transactions
//! - `absorption_properties` - ordering and threshold properties under proptest
//! - `addresses` - signer keys through chain parameters and address encoding

pub mod absorption_properties;
pub mod addresses;
pub mod signed_block_vector;
