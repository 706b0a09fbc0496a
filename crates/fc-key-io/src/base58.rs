//! # Base58Check Encoding
//!
//! Textual addresses and WIF secrets. Every function takes the network's
//! `Base58Prefixes` explicitly.
//!
//! ## Address Payloads
//!
//! | Destination | Payload |
//! |-------------|---------|
//! | `PubKeyHash` | `pubkey prefix || hash160` |
//! | `ScriptHash` | `script prefix || hash160` |
//! | `ColoredPubKeyHash` | `colored pubkey prefix || colorid(33) || hash160` |
//! | `ColoredScriptHash` | `colored script prefix || colorid(33) || hash160` |
//!
//! A colored payload whose color type byte is unknown decodes to the
//! uncolored destination.

use crate::color::{ColorIdentifier, COLOR_ID_SIZE};
use crate::destination::Destination;
use crate::error::{KeyIoError, KeyIoResult};
use fc_chainparams::{Base58Prefixes, Base58Type};
use shared_crypto::hashing::Hash160;
use shared_crypto::Secp256k1KeyPair;
use zeroize::Zeroize;

const HASH160_SIZE: usize = 20;
const SECRET_SIZE: usize = 32;
const COMPRESSED_FLAG: u8 = 0x01;

pub fn encode_base58check(data: &[u8]) -> String {
    bs58::encode(data).with_check().into_string()
}

/// Decode and strip the 4-byte checksum.
pub fn decode_base58check(text: &str) -> KeyIoResult<Vec<u8>> {
    bs58::decode(text)
        .with_check(None)
        .into_vec()
        .map_err(|e| KeyIoError::InvalidBase58(e.to_string()))
}

/// Address for `destination`.
pub fn encode_destination(
    destination: &Destination,
    prefixes: &Base58Prefixes,
) -> KeyIoResult<String> {
    let destination = destination.normalized();
    let (kind, color, hash) = match &destination {
        Destination::None => return Err(KeyIoError::NoDestination),
        Destination::PubKeyHash(hash) => (Base58Type::PubkeyAddress, None, hash),
        Destination::ScriptHash(hash) => (Base58Type::ScriptAddress, None, hash),
        Destination::ColoredPubKeyHash { color, hash } => {
            (Base58Type::ColoredPubkeyAddress, Some(color), hash)
        }
        Destination::ColoredScriptHash { color, hash } => {
            (Base58Type::ColoredScriptAddress, Some(color), hash)
        }
    };

    let mut data = prefixes.get(kind).to_vec();
    if let Some(color) = color {
        data.extend_from_slice(&color.to_vec());
    }
    data.extend_from_slice(hash);
    Ok(encode_base58check(&data))
}

/// Parse an address. Unrecognized or corrupt input is `Destination::None`.
pub fn decode_destination(text: &str, prefixes: &Base58Prefixes) -> Destination {
    let Ok(data) = decode_base58check(text) else {
        return Destination::None;
    };

    if let Some(hash) = strip_prefix(&data, prefixes.get(Base58Type::PubkeyAddress), 0) {
        return Destination::PubKeyHash(hash);
    }
    if let Some(hash) = strip_prefix(&data, prefixes.get(Base58Type::ScriptAddress), 0) {
        return Destination::ScriptHash(hash);
    }

    let colored_pubkey = prefixes.get(Base58Type::ColoredPubkeyAddress);
    if let Some(hash) = strip_prefix(&data, colored_pubkey, COLOR_ID_SIZE) {
        let color = color_after(&data, colored_pubkey.len());
        return Destination::PubKeyHash(hash).with_color(color);
    }
    let colored_script = prefixes.get(Base58Type::ColoredScriptAddress);
    if let Some(hash) = strip_prefix(&data, colored_script, COLOR_ID_SIZE) {
        let color = color_after(&data, colored_script.len());
        return Destination::ScriptHash(hash).with_color(color);
    }

    Destination::None
}

pub fn is_valid_destination_string(text: &str, prefixes: &Base58Prefixes) -> bool {
    decode_destination(text, prefixes).is_valid()
}

/// Hash160 at the end of `data` when it is exactly
/// `prefix || <gap bytes> || hash160`.
fn strip_prefix(data: &[u8], prefix: &[u8], gap: usize) -> Option<Hash160> {
    if data.len() != prefix.len() + gap + HASH160_SIZE || !data.starts_with(prefix) {
        return None;
    }
    data[prefix.len() + gap..].try_into().ok()
}

fn color_after(data: &[u8], offset: usize) -> ColorIdentifier {
    ColorIdentifier::from_slice(&data[offset..offset + COLOR_ID_SIZE])
}

/// WIF for `key`, with the compression flag when the key is compressed.
pub fn encode_secret(key: &Secp256k1KeyPair, prefixes: &Base58Prefixes) -> String {
    let mut secret = key.to_bytes();
    let mut data = prefixes.get(Base58Type::SecretKey).to_vec();
    data.extend_from_slice(&secret);
    if key.is_compressed() {
        data.push(COMPRESSED_FLAG);
    }
    let text = encode_base58check(&data);
    data.zeroize();
    secret.zeroize();
    text
}

/// Parse a WIF secret.
pub fn decode_secret(text: &str, prefixes: &Base58Prefixes) -> KeyIoResult<Secp256k1KeyPair> {
    let mut data = decode_base58check(text)?;
    let result = parse_secret(&data, prefixes.get(Base58Type::SecretKey));
    data.zeroize();
    result
}

fn parse_secret(data: &[u8], prefix: &[u8]) -> KeyIoResult<Secp256k1KeyPair> {
    let body = data
        .strip_prefix(prefix)
        .ok_or(KeyIoError::UnrecognizedPayload { len: data.len() })?;
    let compressed = match body.len() {
        SECRET_SIZE => false,
        n if n == SECRET_SIZE + 1 && body[SECRET_SIZE] == COMPRESSED_FLAG => true,
        _ => return Err(KeyIoError::UnrecognizedPayload { len: data.len() }),
    };
    Ok(Secp256k1KeyPair::from_secret(&body[..SECRET_SIZE], compressed)?)
}
