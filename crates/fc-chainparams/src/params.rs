//! # Chain Parameters
//!
//! Per-network constants derived from a `ChainParamsConfig`: magic bytes,
//! data directory, ports, Base58 prefixes, the signed-blocks quorum and the
//! genesis block.

use crate::config::ChainParamsConfig;
use crate::error::{ChainParamsError, ChainParamsResult};
use crate::genesis::genesis_file_name;
use crate::mode::NetworkMode;
use fc_consensus::MultisigCondition;
use shared_crypto::Secp256k1PublicKey;
use shared_types::Block;
use std::path::{Path, PathBuf};

/// Offset added to the network id to form the message start bytes.
pub const MAGIC_OFFSET: u32 = 33_550_335;

/// Message start bytes for `network_id`.
///
/// Id 0 and ids whose sum with the offset overflows are rejected.
pub fn network_magic(network_id: u32) -> ChainParamsResult<[u8; 4]> {
    if network_id == 0 {
        return Err(ChainParamsError::InvalidNetworkId(network_id));
    }
    network_id
        .checked_add(MAGIC_OFFSET)
        .map(u32::to_be_bytes)
        .ok_or(ChainParamsError::InvalidNetworkId(network_id))
}

/// Directory name for a network: the mode name, plus `-<id>` when the id is
/// not the mode default.
pub fn data_dir_name(mode: NetworkMode, network_id: u32) -> String {
    if network_id == mode.default_network_id() {
        mode.name().to_string()
    } else {
        format!("{}-{}", mode.name(), network_id)
    }
}

/// Kinds of Base58Check payload prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
    ColoredPubkeyAddress,
    ColoredScriptAddress,
}

/// Version bytes prepended to each kind of Base58Check payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base58Prefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
    pub colored_pubkey_address: Vec<u8>,
    pub colored_script_address: Vec<u8>,
}

impl Base58Prefixes {
    pub fn for_mode(mode: NetworkMode) -> Self {
        match mode {
            NetworkMode::Prod => Self {
                pubkey_address: vec![0x00],
                script_address: vec![0x05],
                secret_key: vec![0x80],
                ext_public_key: vec![0x04, 0x88, 0xB2, 0x1E],
                ext_secret_key: vec![0x04, 0x88, 0xAD, 0xE4],
                colored_pubkey_address: vec![0x01],
                colored_script_address: vec![0x06],
            },
            NetworkMode::Dev => Self {
                pubkey_address: vec![0x6f],
                script_address: vec![0xc4],
                secret_key: vec![0xef],
                ext_public_key: vec![0x04, 0x35, 0x87, 0xCF],
                ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
                colored_pubkey_address: vec![0x70],
                colored_script_address: vec![0xc5],
            },
        }
    }

    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
            Base58Type::ColoredPubkeyAddress => &self.colored_pubkey_address,
            Base58Type::ColoredScriptAddress => &self.colored_script_address,
        }
    }
}

/// Parameters of the selected network.
#[derive(Debug, Clone)]
pub struct ChainParams {
    mode: NetworkMode,
    network_id: u32,
    magic: [u8; 4],
    data_dir: String,
    data_root: PathBuf,
    rpc_port: u16,
    p2p_port: u16,
    prefixes: Base58Prefixes,
    quorum: MultisigCondition,
    genesis: Option<Block>,
}

impl ChainParams {
    /// Build parameters from configuration. The genesis block is not loaded.
    ///
    /// Signer keys are sorted by their serialized bytes, which fixes signer
    /// positions independently of configuration order.
    pub fn from_config(config: &ChainParamsConfig) -> ChainParamsResult<Self> {
        let mode = config.mode;
        let network_id = config.effective_network_id();
        let magic = network_magic(network_id)?;

        let mut signers = config
            .signer_pubkeys
            .iter()
            .map(|key| {
                Secp256k1PublicKey::from_hex(key).map_err(|e| ChainParamsError::InvalidSignerKey {
                    key: key.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<ChainParamsResult<Vec<_>>>()?;
        signers.sort();
        let quorum = MultisigCondition::new(signers, config.threshold)?;

        Ok(Self {
            mode,
            network_id,
            magic,
            data_dir: data_dir_name(mode, network_id),
            data_root: config.data_root.clone(),
            rpc_port: mode.rpc_port(),
            p2p_port: mode.p2p_port(),
            prefixes: Base58Prefixes::for_mode(mode),
            quorum,
            genesis: None,
        })
    }

    pub fn with_genesis(mut self, genesis: Block) -> Self {
        self.genesis = Some(genesis);
        self
    }

    pub fn mode(&self) -> NetworkMode {
        self.mode
    }

    pub fn network_id(&self) -> u32 {
        self.network_id
    }

    pub fn magic(&self) -> [u8; 4] {
        self.magic
    }

    /// Data directory name, without the root.
    pub fn data_dir(&self) -> &str {
        &self.data_dir
    }

    /// `<data_root>/<data_dir>`.
    pub fn data_path(&self) -> PathBuf {
        self.data_root.join(&self.data_dir)
    }

    pub fn genesis_path(&self) -> PathBuf {
        self.data_path().join(genesis_file_name(self.network_id))
    }

    pub fn rpc_port(&self) -> u16 {
        self.rpc_port
    }

    pub fn p2p_port(&self) -> u16 {
        self.p2p_port
    }

    pub fn base58_prefixes(&self) -> &Base58Prefixes {
        &self.prefixes
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.prefixes.get(kind)
    }

    pub fn signed_blocks_condition(&self) -> &MultisigCondition {
        &self.quorum
    }

    pub fn genesis(&self) -> ChainParamsResult<&Block> {
        self.genesis.as_ref().ok_or(ChainParamsError::MissingGenesis)
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }
}
