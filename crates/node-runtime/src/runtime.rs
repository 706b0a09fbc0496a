//! # Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Select chain parameters from configuration
//! 2. Load the genesis block, or build one on a dev network with signing keys
//! 3. Verify the genesis proof against the active quorum
//! 4. Signal ready

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use fc_chainparams::{install, select_params, write_genesis_block, ChainParams};
use fc_consensus::{EcdsaVerifier, ProofAbsorber};
use fc_key_io::{decode_destination, script_for_destination, Destination};
use shared_crypto::Secp256k1KeyPair;
use shared_types::Block;
use tracing::info;
use zeroize::Zeroize;

use crate::container::NodeConfig;
use crate::genesis::{verify_genesis, GenesisBuilder, GenesisError};

/// The node runtime.
pub struct NodeRuntime {
    config: NodeConfig,
    absorber: ProofAbsorber<EcdsaVerifier>,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig) -> Self {
        let absorber = ProofAbsorber::with_config(EcdsaVerifier, config.consensus.clone());
        Self { config, absorber }
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Run the startup sequence and return the active parameters.
    pub fn start(&self) -> Result<Arc<ChainParams>> {
        info!("===========================================");
        info!("  Federation-Chain Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let params =
            select_params(&self.config.chain).context("Failed to select chain parameters")?;
        let params = self.initialize_genesis(params)?;

        info!("Network: {} (id {})", params.mode(), params.network_id());
        info!("P2P Port: {}", params.p2p_port());
        info!("RPC Port: {}", params.rpc_port());
        info!("Data Dir: {:?}", params.data_path());
        Ok(params)
    }

    fn initialize_genesis(&self, params: Arc<ChainParams>) -> Result<Arc<ChainParams>> {
        let quorum = params.signed_blocks_condition();

        if let Ok(genesis) = params.genesis() {
            verify_genesis(genesis, quorum, &self.absorber)
                .context("Genesis block failed verification")?;
            info!(hash = %genesis.hash(), "Genesis block verified");
            return Ok(params);
        }

        let path = params.genesis_path();
        if self.config.dev_signing_keys().is_empty() {
            bail!("No genesis block at {}", path.display());
        }

        info!("No genesis block found, creating...");
        let block = self
            .build_dev_genesis(&params)
            .context("Failed to build genesis block")?;
        write_genesis_block(&path, &block).context("Failed to store genesis block")?;
        verify_genesis(&block, quorum, &self.absorber)
            .context("Genesis block failed verification")?;

        Ok(install(params.as_ref().clone().with_genesis(block)))
    }

    fn build_dev_genesis(&self, params: &ChainParams) -> Result<Block, GenesisError> {
        let keys = self
            .config
            .dev_signing_keys()
            .iter()
            .map(String::as_str)
            .map(parse_secret)
            .collect::<Result<Vec<_>, _>>()?;
        let first = keys.first().ok_or(GenesisError::NoSigningKeys)?;

        let destination = match &self.config.genesis.payout_address {
            Some(address) => {
                let destination = decode_destination(address, params.base58_prefixes());
                if !destination.is_valid() {
                    return Err(GenesisError::InvalidConfig(format!(
                        "invalid payout address {}",
                        address
                    )));
                }
                destination
            }
            None => Destination::for_pubkey(&first.public_key()),
        };

        let mut builder = GenesisBuilder::new(script_for_destination(&destination));
        if let Some(time) = self.config.genesis.time {
            builder = builder.with_time(time);
        }
        if let Some(message) = &self.config.genesis.coinbase_message {
            builder = builder.with_message(message.as_bytes());
        }
        builder.build(&keys, params.signed_blocks_condition(), &self.absorber)
    }
}

fn parse_secret(text: &str) -> Result<Secp256k1KeyPair, GenesisError> {
    let mut bytes = hex::decode(text.trim())
        .map_err(|e| GenesisError::InvalidConfig(format!("signing key is not hex: {}", e)))?;
    let key = Secp256k1KeyPair::from_slice(&bytes);
    bytes.zeroize();
    Ok(key?)
}

/// Install a tracing subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init_logging(default_filter: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to install logger: {}", e))
}
