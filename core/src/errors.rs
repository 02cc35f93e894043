//! Error definitions for the intake core.
//!
//! Callers need to tell "unknown txid" apart from client-input problems, so
//! the variants map one-to-one onto the distinctions the hosting service
//! surfaces (404 vs 400 vs 409).

use fhzec_transaction::TxId;
use thiserror::Error;

/// Errors surfaced by ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No tracked transaction under this id
    #[error("transaction {0} not found")]
    NotFound(TxId),

    /// Burn amount must be a positive zatoshi value
    #[error("invalid amount: {0} zatoshis (must be positive)")]
    InvalidAmount(u64),

    /// A resubmission carried a different value for an immutable field
    #[error("conflicting resubmission for {txid}: {field} differs from the tracked record")]
    Conflict { txid: TxId, field: &'static str },
}

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
