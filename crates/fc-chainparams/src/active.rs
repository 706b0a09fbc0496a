//! # Active Parameters
//!
//! Process-wide handle to the selected `ChainParams`. Set once at startup by
//! `select_params`; test harnesses may install a different set at any time.
//! Readers get a shared `Arc`, so a reselect never changes parameters a
//! caller already holds.

use crate::config::ChainParamsConfig;
use crate::error::{ChainParamsError, ChainParamsResult};
use crate::genesis::read_genesis_block;
use crate::params::ChainParams;
use fc_consensus::MultisigCondition;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use shared_types::Block;
use std::sync::Arc;
use tracing::info;

lazy_static! {
    static ref ACTIVE: RwLock<Option<Arc<ChainParams>>> = RwLock::new(None);
}

/// Replace the active parameters.
pub fn install(params: ChainParams) -> Arc<ChainParams> {
    let params = Arc::new(params);
    *ACTIVE.write() = Some(Arc::clone(&params));
    params
}

/// Build parameters from `config`, load the genesis file if one exists, and
/// make them active.
pub fn select_params(config: &ChainParamsConfig) -> ChainParamsResult<Arc<ChainParams>> {
    let mut params = ChainParams::from_config(config)?;
    let genesis_path = params.genesis_path();
    if genesis_path.exists() {
        params = params.with_genesis(read_genesis_block(&genesis_path)?);
    }

    let quorum = params.signed_blocks_condition();
    info!(
        mode = %params.mode(),
        network_id = params.network_id(),
        magic = %hex::encode(params.magic()),
        signers = quorum.signer_count(),
        threshold = quorum.threshold(),
        "Selected chain parameters"
    );
    Ok(install(params))
}

/// Currently active parameters.
pub fn params() -> ChainParamsResult<Arc<ChainParams>> {
    ACTIVE.read().clone().ok_or(ChainParamsError::NotSelected)
}

pub fn get_active_quorum() -> ChainParamsResult<MultisigCondition> {
    Ok(params()?.signed_blocks_condition().clone())
}

pub fn network_magic_bytes() -> ChainParamsResult<[u8; 4]> {
    Ok(params()?.magic())
}

pub fn genesis_block() -> ChainParamsResult<Block> {
    params()?.genesis().cloned()
}
