//! # Key and Address Encoding
//!
//! Non-consensus text forms of keys and destinations.
//!
//! ## Components
//!
//! | Module | Contents |
//! |--------|----------|
//! | `color` | `ColorIdentifier` and token types |
//! | `destination` | `Destination` sum type and its standard output scripts |
//! | `base58` | Base58Check addresses and WIF secrets |
//!
//! Prefixes always come from the caller's `ChainParams`:
//!
//! ```ignore
//! let params = fc_chainparams::params()?;
//! let address = encode_destination(&dest, params.base58_prefixes())?;
//! ```

pub mod base58;
pub mod color;
pub mod destination;
pub mod error;

pub use base58::{
    decode_base58check, decode_destination, decode_secret, encode_base58check,
    encode_destination, encode_secret, is_valid_destination_string,
};
pub use color::{ColorIdentifier, TokenType, COLOR_ID_SIZE};
pub use destination::{extract_destination, script_for_destination, Destination, OP_COLOR};
pub use error::{KeyIoError, KeyIoResult};
