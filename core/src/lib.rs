//! fhzec intake core
//!
//! The intake and proof-input-preparation layer of the fhzec bridge. An
//! off-chain watcher reports ZEC burns; this crate tracks them through a
//! confirmation-driven status machine and turns a tracked record plus an
//! encrypted-amount blob into the fixed-width witness and 7-element public
//! input tuple the on-chain Groth16 verifier expects.
//!
//! ```text
//! watcher ──► SharedLedger::submit ──► confirmation updates
//!                  │
//!    poller ──► AmountMatcher::find_pending_by_amount ──► caller fetches record
//!                  │
//!    record + EncryptedAmount ──► witness::assemble
//!                  │
//!    public_inputs::extract_public_inputs ──► external prover / verifier
//! ```
//!
//! Transport, authentication, the FHE client and the proving algorithm all
//! live outside this crate; hosts own retry and polling policy.

pub mod encrypted;
pub mod errors;
pub mod ledger;
pub mod matcher;
pub mod public_inputs;
pub mod units;
pub mod witness;

pub use encrypted::{EncryptedAmount, EncryptionSource};
pub use errors::LedgerError;
pub use ledger::{LedgerStats, SharedLedger, TransactionLedger, TransactionRecord};
pub use matcher::AmountMatcher;
pub use public_inputs::extract_public_inputs;
pub use witness::{AssembledWitness, assemble, assemble_for_record};
