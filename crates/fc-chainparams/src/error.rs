//! Chain parameter errors.

use fc_consensus::ConsensusError;
use shared_types::EncodingError;
use thiserror::Error;

/// Errors raised while building, loading or reading chain parameters.
#[derive(Debug, Error)]
pub enum ChainParamsError {
    /// Unrecognized network mode name.
    #[error("Unknown network mode: {0}")]
    UnknownMode(String),

    /// Network id outside the accepted range.
    #[error("Invalid network id: {0}")]
    InvalidNetworkId(u32),

    /// A configured signer key could not be parsed.
    #[error("Invalid signer public key {key}: {reason}")]
    InvalidSignerKey { key: String, reason: String },

    /// The signer set and threshold do not form a valid quorum.
    #[error("Invalid signed-blocks quorum: {0}")]
    Quorum(#[from] ConsensusError),

    /// Configuration file could not be parsed.
    #[error("Config parse error: {0}")]
    Parse(String),

    /// File I/O failure.
    #[error("I/O error at {path}: {error}")]
    Io { path: String, error: String },

    /// Genesis file contents are not a valid block.
    #[error("Invalid genesis block in {path}: {source}")]
    InvalidGenesis {
        path: String,
        #[source]
        source: EncodingError,
    },

    /// No genesis block has been loaded.
    #[error("Genesis block not loaded")]
    MissingGenesis,

    /// `params()` called before `select_params`.
    #[error("Chain parameters not selected")]
    NotSelected,
}

/// Result alias for chain parameter operations.
pub type ChainParamsResult<T> = Result<T, ChainParamsError>;
