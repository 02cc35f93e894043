//! Amount Matcher
//!
//! Polling-based discovery for callers that know only the burn amount, not
//! the txid: after asking the user to send exactly N zatoshis to the burn
//! address, the bridge frontend polls until a matching burn shows up.
//!
//! Matching is exact-integer only, no tolerance or rounding. The watcher and
//! the poller must both derive the integer through
//! [`crate::units::zec_to_zatoshis`]; any other conversion on either side
//! means legitimate matches are never found.

use crate::ledger::{SharedLedger, TransactionRecord};

/// Read-only query over the ledger's amount index.
#[derive(Clone)]
pub struct AmountMatcher {
    ledger: SharedLedger,
}

impl AmountMatcher {
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    /// The most recent burn of exactly `zatoshis` that has not yet been
    /// processed, if any.
    pub fn find_pending_by_amount(&self, zatoshis: u64) -> Option<TransactionRecord> {
        self.ledger
            .find_by_amount(zatoshis)
            .into_iter()
            .find(|record| !record.status.is_processed())
    }
}
