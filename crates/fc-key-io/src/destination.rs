//! # Destinations
//!
//! Where an output pays: a public key hash or script hash, optionally
//! colored with a token identifier.
//!
//! ## Output Scripts
//!
//! | Destination | Script |
//! |-------------|--------|
//! | `PubKeyHash` | `OP_DUP OP_HASH160 <h> OP_EQUALVERIFY OP_CHECKSIG` |
//! | `ScriptHash` | `OP_HASH160 <h> OP_EQUAL` |
//! | `ColoredPubKeyHash` | `<colorid> OP_COLOR OP_DUP OP_HASH160 <h> OP_EQUALVERIFY OP_CHECKSIG` |
//! | `ColoredScriptHash` | `<colorid> OP_COLOR OP_HASH160 <h> OP_EQUAL` |

use crate::color::{ColorIdentifier, COLOR_ID_SIZE};
use serde::{Deserialize, Serialize};
use shared_crypto::hashing::Hash160;
use shared_crypto::{hash160, Secp256k1PublicKey};
use shared_types::Script;

pub const OP_DUP: u8 = 0x76;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_COLOR: u8 = 0xbc;

const PUSH_20: u8 = 0x14;
const PUSH_33: u8 = 0x21;

/// Output destination.
///
/// Build colored variants with [`Destination::with_color`]. A colored variant
/// holding an uncolored identifier is treated as its uncolored counterpart
/// when encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Destination {
    /// No standard destination.
    #[default]
    None,
    PubKeyHash(Hash160),
    ScriptHash(Hash160),
    ColoredPubKeyHash {
        color: ColorIdentifier,
        hash: Hash160,
    },
    ColoredScriptHash {
        color: ColorIdentifier,
        hash: Hash160,
    },
}

impl Destination {
    /// Pay-to-pubkey-hash for `pubkey` in its stored encoding.
    pub fn for_pubkey(pubkey: &Secp256k1PublicKey) -> Self {
        Destination::PubKeyHash(hash160(pubkey.as_bytes()))
    }

    /// Pay-to-script-hash for `script`.
    pub fn for_script(script: &Script) -> Self {
        Destination::ScriptHash(hash160(script.as_bytes()))
    }

    /// Attach `color`, or strip the color when `color` is uncolored.
    pub fn with_color(self, color: ColorIdentifier) -> Self {
        let colored = color.is_colored();
        match self {
            Destination::PubKeyHash(hash) | Destination::ColoredPubKeyHash { hash, .. } => {
                if colored {
                    Destination::ColoredPubKeyHash { color, hash }
                } else {
                    Destination::PubKeyHash(hash)
                }
            }
            Destination::ScriptHash(hash) | Destination::ColoredScriptHash { hash, .. } => {
                if colored {
                    Destination::ColoredScriptHash { color, hash }
                } else {
                    Destination::ScriptHash(hash)
                }
            }
            Destination::None => Destination::None,
        }
    }

    /// The same destination with an uncolored identifier stripped.
    pub fn normalized(self) -> Self {
        self.with_color(self.color())
    }

    pub fn color(&self) -> ColorIdentifier {
        match self {
            Destination::ColoredPubKeyHash { color, .. }
            | Destination::ColoredScriptHash { color, .. } => *color,
            _ => ColorIdentifier::none(),
        }
    }

    pub fn hash(&self) -> Option<&Hash160> {
        match self {
            Destination::None => None,
            Destination::PubKeyHash(hash)
            | Destination::ScriptHash(hash)
            | Destination::ColoredPubKeyHash { hash, .. }
            | Destination::ColoredScriptHash { hash, .. } => Some(hash),
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Destination::None)
    }
}

/// Standard output script paying to `destination`. Empty for `None`.
pub fn script_for_destination(destination: &Destination) -> Script {
    let mut out = Vec::new();
    match &destination.normalized() {
        Destination::None => {}
        Destination::PubKeyHash(hash) => push_p2pkh(&mut out, hash),
        Destination::ScriptHash(hash) => push_p2sh(&mut out, hash),
        Destination::ColoredPubKeyHash { color, hash } => {
            push_color(&mut out, color);
            push_p2pkh(&mut out, hash);
        }
        Destination::ColoredScriptHash { color, hash } => {
            push_color(&mut out, color);
            push_p2sh(&mut out, hash);
        }
    }
    Script(out)
}

/// Recognize a standard output script. Anything else is `None`.
pub fn extract_destination(script: &Script) -> Destination {
    let bytes = script.as_bytes();
    if let Some(hash) = match_p2pkh(bytes) {
        return Destination::PubKeyHash(hash);
    }
    if let Some(hash) = match_p2sh(bytes) {
        return Destination::ScriptHash(hash);
    }

    let prefix = 2 + COLOR_ID_SIZE;
    if bytes.len() <= prefix || bytes[0] != PUSH_33 || bytes[prefix - 1] != OP_COLOR {
        return Destination::None;
    }
    let color = ColorIdentifier::from_slice(&bytes[1..prefix - 1]);
    if !color.is_colored() {
        return Destination::None;
    }
    let rest = &bytes[prefix..];
    if let Some(hash) = match_p2pkh(rest) {
        Destination::ColoredPubKeyHash { color, hash }
    } else if let Some(hash) = match_p2sh(rest) {
        Destination::ColoredScriptHash { color, hash }
    } else {
        Destination::None
    }
}

fn push_color(out: &mut Vec<u8>, color: &ColorIdentifier) {
    out.push(PUSH_33);
    out.extend_from_slice(&color.to_vec());
    out.push(OP_COLOR);
}

fn push_p2pkh(out: &mut Vec<u8>, hash: &Hash160) {
    out.extend_from_slice(&[OP_DUP, OP_HASH160, PUSH_20]);
    out.extend_from_slice(hash);
    out.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
}

fn push_p2sh(out: &mut Vec<u8>, hash: &Hash160) {
    out.extend_from_slice(&[OP_HASH160, PUSH_20]);
    out.extend_from_slice(hash);
    out.push(OP_EQUAL);
}

fn match_p2pkh(bytes: &[u8]) -> Option<Hash160> {
    match bytes {
        [OP_DUP, OP_HASH160, PUSH_20, hash @ .., OP_EQUALVERIFY, OP_CHECKSIG] if hash.len() == 20 => {
            hash.try_into().ok()
        }
        _ => None,
    }
}

fn match_p2sh(bytes: &[u8]) -> Option<Hash160> {
    match bytes {
        [OP_HASH160, PUSH_20, hash @ .., OP_EQUAL] if hash.len() == 20 => hash.try_into().ok(),
        _ => None,
    }
}
