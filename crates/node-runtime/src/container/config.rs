//! # Node Configuration
//!
//! Configuration for the node runtime, loaded in three layers:
//!
//! 1. Built-in defaults
//! 2. The TOML file named by `FC_CONFIG`, if set
//! 3. `FC_*` environment variables
//!
//! ## Config File Format
//!
//! ```toml
//! [chain]
//! mode = "dev"
//! signed_blocks_pubkeys = ["02...", "03..."]
//! signed_blocks_threshold = 2
//!
//! [consensus]
//! parallel_min_work = 16
//!
//! [genesis]
//! time = 1562925929
//! payout_address = "mq..."
//! coinbase_message = "Federation-Chain Genesis"
//! ```
//!
//! ## Security Requirements
//!
//! - Dev signing keys are only honored in dev mode.

use fc_chainparams::{config::split_list, ChainParamsConfig, ChainSection};
use fc_consensus::AbsorptionConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Names the TOML configuration file.
pub const ENV_CONFIG: &str = "FC_CONFIG";
/// Comma separated hex secrets used to sign a dev genesis block.
pub const ENV_DEV_SIGNING_KEYS: &str = "FC_DEV_SIGNING_KEYS";

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Network selection and signer quorum.
    pub chain: ChainParamsConfig,
    /// Proof absorption tuning.
    pub consensus: AbsorptionConfig,
    /// Genesis creation for dev networks.
    pub genesis: GenesisConfig,
}

/// Inputs for building a dev genesis block.
#[derive(Clone, Default)]
pub struct GenesisConfig {
    /// Block time; the current time when unset.
    pub time: Option<u32>,
    /// Address paid by the coinbase; the first signing key when unset.
    pub payout_address: Option<String>,
    pub coinbase_message: Option<String>,
    /// Hex-encoded signer secrets.
    pub signing_keys: Vec<String>,
}

impl std::fmt::Debug for GenesisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenesisConfig")
            .field("time", &self.time)
            .field("payout_address", &self.payout_address)
            .field("coinbase_message", &self.coinbase_message)
            .field("signing_keys", &format_args!("[{} redacted]", self.signing_keys.len()))
            .finish()
    }
}

/// Configuration loading errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },
    /// TOML parse error.
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    chain: ChainSection,
    #[serde(default)]
    consensus: ConsensusSection,
    #[serde(default)]
    genesis: GenesisSection,
}

#[derive(Debug, Deserialize, Default)]
struct ConsensusSection {
    parallel_min_work: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
struct GenesisSection {
    time: Option<u32>,
    payout_address: Option<String>,
    coinbase_message: Option<String>,
}

impl NodeConfig {
    /// Parse a TOML document on top of the defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut config = Self::default();
        config.chain.apply_section(file.chain);
        if let Some(work) = file.consensus.parallel_min_work {
            config.consensus.parallel_min_work = work;
        }
        config.genesis.time = file.genesis.time;
        config.genesis.payout_address = file.genesis.payout_address;
        config.genesis.coinbase_message = file.genesis.coinbase_message;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Overlay `FC_*` variables read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.chain.apply_env(&lookup);
        if let Some(value) = lookup(ENV_DEV_SIGNING_KEYS) {
            self.genesis.signing_keys = split_list(&value);
        }
    }

    /// Dev signing keys, if they may be used on the configured network.
    pub fn dev_signing_keys(&self) -> &[String] {
        if self.chain.mode == fc_chainparams::NetworkMode::Dev {
            &self.genesis.signing_keys
        } else {
            &[]
        }
    }
}

/// Load configuration from the file named by `FC_CONFIG` and the
/// environment, both read through `lookup`.
pub fn load_config<F>(lookup: F) -> Result<NodeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup(ENV_CONFIG) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            NodeConfig::load(&path)?
        }
        None => NodeConfig::default(),
    };
    config.apply_env(&lookup);

    if !config.genesis.signing_keys.is_empty() && config.dev_signing_keys().is_empty() {
        warn!(
            "{} ignored outside dev mode ({} configured)",
            ENV_DEV_SIGNING_KEYS, config.chain.mode
        );
    }
    Ok(config)
}
