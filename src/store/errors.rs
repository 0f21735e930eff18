//! Store error types.

use thiserror::Error;

use crate::tournament::{BracketError, TournamentId};

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),

    /// Snapshot is not the successor of the stored version
    #[error("Version conflict: expected version {expected}, got {actual}")]
    VersionConflict { expected: u64, actual: u64 },

    /// Snapshot failed structural validation
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] BracketError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
