//! Genesis block files.
//!
//! A genesis file holds one hex-encoded serialized block. Surrounding
//! whitespace is ignored on read; a trailing newline is written.

use crate::error::{ChainParamsError, ChainParamsResult};
use shared_types::{deserialize_hex, serialize, Block};
use std::fs;
use std::path::Path;
use tracing::info;

/// File name of the genesis block for `network_id`.
pub fn genesis_file_name(network_id: u32) -> String {
    format!("genesis.{}", network_id)
}

pub fn read_genesis_block(path: &Path) -> ChainParamsResult<Block> {
    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let block = deserialize_hex::<Block>(&text).map_err(|source| {
        ChainParamsError::InvalidGenesis {
            path: path.display().to_string(),
            source,
        }
    })?;
    info!(path = %path.display(), hash = %block.hash(), "Loaded genesis block");
    Ok(block)
}

/// Write `block` to `path`, creating parent directories.
pub fn write_genesis_block(path: &Path, block: &Block) -> ChainParamsResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    let mut text = hex::encode(serialize(block));
    text.push('\n');
    fs::write(path, text).map_err(|e| io_error(path, e))?;
    info!(path = %path.display(), hash = %block.hash(), "Wrote genesis block");
    Ok(())
}

fn io_error(path: &Path, error: std::io::Error) -> ChainParamsError {
    ChainParamsError::Io {
        path: path.display().to_string(),
        error: error.to_string(),
    }
}
