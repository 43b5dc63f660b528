//! Error types for bucketbench
//!
//! Provides a unified error type for all harness operations. Every phase
//! returns its failure up to the single top-level handler in the binary.

use std::path::PathBuf;

use thiserror::Error;

use crate::harness::Phase;

/// Result type alias using BenchError
pub type Result<T> = std::result::Result<T, BenchError>;

/// Unified error type for bucketbench operations
#[derive(Debug, Error)]
pub enum BenchError {
    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("failed to open store at {}: {source}", path.display())]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: redb::DatabaseError,
    },

    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("commit failed: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    // -------------------------------------------------------------------------
    // Bucket Errors
    // -------------------------------------------------------------------------
    #[error("bucket error: {0}")]
    Table(#[from] redb::TableError),

    #[error("bucket {0:?} does not exist")]
    BucketMissing(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Reporting Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A failure tagged with the harness phase it happened in
    #[error("{phase} failed: {source}")]
    Phase {
        phase: Phase,
        source: Box<BenchError>,
    },
}

impl BenchError {
    /// Tag this error with the phase that produced it
    pub fn in_phase(self, phase: Phase) -> Self {
        match self {
            // Keep the innermost phase, it names the operation that broke
            BenchError::Phase { .. } => self,
            other => BenchError::Phase {
                phase,
                source: Box::new(other),
            },
        }
    }

    /// The phase this error was raised in, if it was tagged
    pub fn phase(&self) -> Option<Phase> {
        match self {
            BenchError::Phase { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// Strip the phase tag and return the underlying cause
    pub fn root(&self) -> &BenchError {
        match self {
            BenchError::Phase { source, .. } => source.root(),
            other => other,
        }
    }
}
