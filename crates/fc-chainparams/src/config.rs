//! # Chain Configuration
//!
//! Inputs from which `ChainParams` are built. Values come from the `[chain]`
//! section of the node's TOML file and are then overridden by environment
//! variables.
//!
//! ```toml
//! [chain]
//! mode = "dev"
//! network_id = 1905960821
//! data_dir = "./data"
//! signed_blocks_pubkeys = ["02...", "03..."]
//! signed_blocks_threshold = 2
//! ```
//!
//! | Variable | Field |
//! |----------|-------|
//! | `FC_MODE` | `mode` (`prod` or `dev`) |
//! | `FC_NETWORK_ID` | `network_id` |
//! | `FC_DATA_DIR` | `data_root` |
//! | `FC_SIGNED_BLOCKS_PUBKEYS` | `signer_pubkeys`, comma separated hex |
//! | `FC_SIGNED_BLOCKS_THRESHOLD` | `threshold` |
//!
//! Unparseable values are logged and ignored.

use crate::mode::NetworkMode;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

pub const ENV_MODE: &str = "FC_MODE";
pub const ENV_NETWORK_ID: &str = "FC_NETWORK_ID";
pub const ENV_DATA_DIR: &str = "FC_DATA_DIR";
pub const ENV_SIGNED_BLOCKS_PUBKEYS: &str = "FC_SIGNED_BLOCKS_PUBKEYS";
pub const ENV_SIGNED_BLOCKS_THRESHOLD: &str = "FC_SIGNED_BLOCKS_THRESHOLD";

/// Chain parameter inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParamsConfig {
    pub mode: NetworkMode,
    /// Overrides the mode's default network id.
    pub network_id: Option<u32>,
    /// Parent of the per-network data directory.
    pub data_root: PathBuf,
    /// Hex-encoded signer public keys, in any order.
    pub signer_pubkeys: Vec<String>,
    pub threshold: usize,
}

impl Default for ChainParamsConfig {
    fn default() -> Self {
        Self {
            mode: NetworkMode::Prod,
            network_id: None,
            data_root: PathBuf::from("./data"),
            signer_pubkeys: Vec::new(),
            threshold: 0,
        }
    }
}

/// `[chain]` section of the configuration file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ChainSection {
    pub mode: Option<NetworkMode>,
    pub network_id: Option<u32>,
    pub data_dir: Option<PathBuf>,
    pub signed_blocks_pubkeys: Option<Vec<String>>,
    pub signed_blocks_threshold: Option<usize>,
}

impl ChainParamsConfig {
    /// Overlay the values present in a file section.
    pub fn apply_section(&mut self, section: ChainSection) {
        if let Some(mode) = section.mode {
            self.mode = mode;
        }
        if section.network_id.is_some() {
            self.network_id = section.network_id;
        }
        if let Some(dir) = section.data_dir {
            self.data_root = dir;
        }
        if let Some(keys) = section.signed_blocks_pubkeys {
            self.signer_pubkeys = keys;
        }
        if let Some(threshold) = section.signed_blocks_threshold {
            self.threshold = threshold;
        }
    }

    /// Overlay environment variables read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MODE) {
            match value.parse() {
                Ok(mode) => self.mode = mode,
                Err(e) => warn!("Ignoring {}: {}", ENV_MODE, e),
            }
        }
        if let Some(value) = lookup(ENV_NETWORK_ID) {
            match value.trim().parse() {
                Ok(id) => self.network_id = Some(id),
                Err(_) => warn!("Ignoring {}: not a number: {}", ENV_NETWORK_ID, value),
            }
        }
        if let Some(value) = lookup(ENV_DATA_DIR) {
            self.data_root = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_SIGNED_BLOCKS_PUBKEYS) {
            self.signer_pubkeys = split_list(&value);
        }
        if let Some(value) = lookup(ENV_SIGNED_BLOCKS_THRESHOLD) {
            match value.trim().parse() {
                Ok(threshold) => self.threshold = threshold,
                Err(_) => warn!(
                    "Ignoring {}: not a number: {}",
                    ENV_SIGNED_BLOCKS_THRESHOLD, value
                ),
            }
        }
    }

    /// Network id in effect: the configured one or the mode default.
    pub fn effective_network_id(&self) -> u32 {
        self.network_id
            .unwrap_or_else(|| self.mode.default_network_id())
    }
}

/// Split a comma separated list, dropping empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
