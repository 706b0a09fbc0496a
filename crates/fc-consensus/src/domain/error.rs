//! Error types for the federation consensus crate

/// Consensus error types
///
/// An under-signed block is not an error: absorption reports it as a
/// `false` outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsensusError {
    /// Quorum parameters rejected at construction.
    #[error("Invalid quorum: {0}")]
    InvalidQuorum(String),

    #[error("Signer index out of range: {index} >= {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for consensus operations
pub type ConsensusResult<T> = Result<T, ConsensusError>;
