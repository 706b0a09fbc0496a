//! # Color Identifiers
//!
//! A color identifier names a colored-coin token. Uncolored value uses the
//! `None` type and serializes as the single byte `0x00`; every colored id is
//! 33 bytes: `type || SHA256(source)`.
//!
//! | Type | Byte | Source of the payload |
//! |------|------|-----------------------|
//! | `Reissuable` | `0xC1` | issuing script |
//! | `NonReissuable` | `0xC2` | serialized outpoint spent by the issue |
//! | `Nft` | `0xC3` | serialized outpoint spent by the issue |

use serde::{Deserialize, Serialize};
use shared_crypto::sha256;
use shared_types::{serialize, OutPoint, Script};

/// Serialized length of a colored identifier.
pub const COLOR_ID_SIZE: usize = 33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TokenType {
    #[default]
    None,
    Reissuable,
    NonReissuable,
    Nft,
}

impl TokenType {
    pub fn to_byte(self) -> u8 {
        match self {
            TokenType::None => 0x00,
            TokenType::Reissuable => 0xC1,
            TokenType::NonReissuable => 0xC2,
            TokenType::Nft => 0xC3,
        }
    }

    /// Colored token type for `byte`; `None` for anything unrecognized.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0xC1 => TokenType::Reissuable,
            0xC2 => TokenType::NonReissuable,
            0xC3 => TokenType::Nft,
            _ => TokenType::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorIdentifier {
    token_type: TokenType,
    payload: [u8; 32],
}

impl ColorIdentifier {
    /// The uncolored identifier.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn reissuable(script: &Script) -> Self {
        Self {
            token_type: TokenType::Reissuable,
            payload: sha256(&script.0),
        }
    }

    pub fn non_reissuable(outpoint: &OutPoint) -> Self {
        Self::from_outpoint(TokenType::NonReissuable, outpoint)
    }

    pub fn nft(outpoint: &OutPoint) -> Self {
        Self::from_outpoint(TokenType::Nft, outpoint)
    }

    fn from_outpoint(token_type: TokenType, outpoint: &OutPoint) -> Self {
        Self {
            token_type,
            payload: sha256(&serialize(outpoint)),
        }
    }

    /// Parse a serialized identifier.
    ///
    /// Anything other than 33 bytes with a known colored type byte yields the
    /// uncolored identifier.
    pub fn from_slice(bytes: &[u8]) -> Self {
        if bytes.len() != COLOR_ID_SIZE {
            return Self::none();
        }
        match TokenType::from_byte(bytes[0]) {
            TokenType::None => Self::none(),
            token_type => {
                let mut payload = [0u8; 32];
                payload.copy_from_slice(&bytes[1..]);
                Self {
                    token_type,
                    payload,
                }
            }
        }
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn payload(&self) -> &[u8; 32] {
        &self.payload
    }

    pub fn is_colored(&self) -> bool {
        self.token_type != TokenType::None
    }

    pub fn to_vec(&self) -> Vec<u8> {
        if !self.is_colored() {
            return vec![TokenType::None.to_byte()];
        }
        let mut out = Vec::with_capacity(COLOR_ID_SIZE);
        out.push(self.token_type.to_byte());
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_vec())
    }
}
