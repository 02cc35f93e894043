//! Transaction Ledger
//!
//! In-memory ledger for burn transactions submitted by the watcher. The
//! watcher monitors the Zcash chain and submits transaction details when a
//! transfer to the burn address is detected; records then advance through a
//! confirmation-driven status machine:
//!
//! ```text
//! submit ──► pending ──(confirmations ≥ threshold)──► confirmed ──► processed
//! ```
//!
//! Alongside the primary map the ledger keeps two secondary indices (by
//! recipient, by amount). Every mutation updates the primary map and both
//! indices inside one critical section, so a reader never observes a record
//! present in one structure and absent in another. The ledger is volatile;
//! nothing survives a restart.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use fhzec_transaction::{EthAddress, SubmitTransaction, TransactionStatus, TxId, ZecTxData};

use crate::errors::{LedgerError, Result};

/// A tracked burn transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub txid: TxId,
    /// Amount in zatoshis
    pub amount: u64,
    /// Destination-chain recipient (case-normalized at parse time)
    pub recipient: EthAddress,
    pub confirmations: u32,
    pub status: TransactionStatus,
    /// Raw chain data consumed later by witness assembly
    pub tx_data: ZecTxData,
    /// Insertion counter; orders equal-timestamp records deterministically
    pub(crate) seq: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ledger counters, grouped by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub processed: usize,
}

/// The ledger state proper. Not thread-safe on its own; hosts either own it
/// exclusively or go through [`SharedLedger`].
pub struct TransactionLedger {
    /// Confirmations required before a burn counts as finalized
    threshold: u32,
    next_seq: u64,
    transactions: HashMap<TxId, TransactionRecord>,
    by_recipient: HashMap<EthAddress, Vec<TxId>>,
    by_amount: HashMap<u64, Vec<TxId>>,
}

impl TransactionLedger {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            next_seq: 0,
            transactions: HashMap::new(),
            by_recipient: HashMap::new(),
            by_amount: HashMap::new(),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Submit a new transaction from the watcher.
    ///
    /// Resubmitting a known txid with matching amount and recipient degrades
    /// to a confirmation update rather than a duplicate-creation error. A
    /// resubmission where either immutable field differs is rejected as a
    /// conflict instead of silently overwriting the tracked record.
    pub fn submit(&mut self, input: SubmitTransaction) -> Result<TransactionRecord> {
        if input.amount == 0 {
            return Err(LedgerError::InvalidAmount(input.amount));
        }

        if let Some(existing) = self.transactions.get(&input.txid) {
            if existing.amount != input.amount {
                return Err(LedgerError::Conflict {
                    txid: input.txid,
                    field: "amount",
                });
            }
            if existing.recipient != input.recipient {
                return Err(LedgerError::Conflict {
                    txid: input.txid,
                    field: "recipient",
                });
            }
            warn!(
                "Transaction {} already exists, updating confirmations instead",
                input.txid
            );
            return self.update_confirmations(&input.txid, input.confirmations);
        }

        let now = Utc::now();
        let status = if input.confirmations >= self.threshold {
            TransactionStatus::Confirmed
        } else {
            TransactionStatus::Pending
        };
        let seq = self.next_seq;
        self.next_seq += 1;

        let record = TransactionRecord {
            txid: input.txid,
            amount: input.amount,
            recipient: input.recipient,
            confirmations: input.confirmations,
            status,
            tx_data: input.tx_data,
            seq,
            created_at: now,
            updated_at: now,
        };

        // Primary map and both indices move together.
        self.transactions
            .insert(record.txid.clone(), record.clone());
        self.by_recipient
            .entry(record.recipient.clone())
            .or_default()
            .push(record.txid.clone());
        self.by_amount
            .entry(record.amount)
            .or_default()
            .push(record.txid.clone());

        info!(
            "Transaction submitted: {} ({} zatoshis to {})",
            record.txid, record.amount, record.recipient
        );

        Ok(record)
    }

    /// Update the confirmation count for a tracked transaction.
    ///
    /// A count below the previously recorded one is accepted and stored
    /// (chain reorgs on the source side report whatever the node sees);
    /// the status machine never moves backwards because of it.
    pub fn update_confirmations(
        &mut self,
        txid: &TxId,
        confirmations: u32,
    ) -> Result<TransactionRecord> {
        let threshold = self.threshold;
        let record = self
            .transactions
            .get_mut(txid)
            .ok_or_else(|| LedgerError::NotFound(txid.clone()))?;

        if confirmations < record.confirmations {
            warn!(
                "Confirmations for {} decreased: {} -> {} (status kept)",
                txid, record.confirmations, confirmations
            );
        }
        record.confirmations = confirmations;
        record.updated_at = Utc::now();

        if confirmations >= threshold && record.status == TransactionStatus::Pending {
            record.status = TransactionStatus::Confirmed;
            info!(
                "Transaction {} confirmed with {} confirmations",
                txid, confirmations
            );
        }

        Ok(record.clone())
    }

    /// Mark a transaction as processed (after the destination-chain mint).
    pub fn mark_processed(&mut self, txid: &TxId) -> Result<TransactionRecord> {
        let record = self
            .transactions
            .get_mut(txid)
            .ok_or_else(|| LedgerError::NotFound(txid.clone()))?;

        record.status = TransactionStatus::Processed;
        record.updated_at = Utc::now();

        info!("Transaction {} marked as processed", txid);

        Ok(record.clone())
    }

    pub fn get(&self, txid: &TxId) -> Option<TransactionRecord> {
        self.transactions.get(txid).cloned()
    }

    /// Transactions sent to a recipient, most recently created first.
    pub fn find_by_recipient(&self, recipient: &EthAddress) -> Vec<TransactionRecord> {
        self.collect_bucket(self.by_recipient.get(recipient))
    }

    /// Transactions with an exact zatoshi amount, most recently created first.
    pub fn find_by_amount(&self, amount: u64) -> Vec<TransactionRecord> {
        self.collect_bucket(self.by_amount.get(&amount))
    }

    fn collect_bucket(&self, txids: Option<&Vec<TxId>>) -> Vec<TransactionRecord> {
        let mut records: Vec<TransactionRecord> = txids
            .into_iter()
            .flatten()
            .filter_map(|id| self.transactions.get(id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.seq.cmp(&a.seq));
        records
    }

    /// All tracked transactions, most recently created first.
    pub fn all(&self) -> Vec<TransactionRecord> {
        let mut records: Vec<TransactionRecord> = self.transactions.values().cloned().collect();
        records.sort_by(|a, b| b.seq.cmp(&a.seq));
        records
    }

    /// Transactions still below the confirmation threshold.
    pub fn pending(&self) -> Vec<TransactionRecord> {
        self.all()
            .into_iter()
            .filter(|r| r.status == TransactionStatus::Pending)
            .collect()
    }

    /// Confirmed transactions ready for processing.
    pub fn confirmed(&self) -> Vec<TransactionRecord> {
        self.all()
            .into_iter()
            .filter(|r| r.status == TransactionStatus::Confirmed)
            .collect()
    }

    /// Remove a transaction and both of its index entries.
    ///
    /// Returns whether anything was removed. Empty index buckets are dropped
    /// so the indices only ever hold live entries.
    pub fn delete(&mut self, txid: &TxId) -> bool {
        let Some(record) = self.transactions.remove(txid) else {
            return false;
        };

        if let Some(bucket) = self.by_recipient.get_mut(&record.recipient) {
            bucket.retain(|id| id != txid);
            if bucket.is_empty() {
                self.by_recipient.remove(&record.recipient);
            }
        }
        if let Some(bucket) = self.by_amount.get_mut(&record.amount) {
            bucket.retain(|id| id != txid);
            if bucket.is_empty() {
                self.by_amount.remove(&record.amount);
            }
        }

        info!("Transaction {} deleted", txid);

        true
    }

    pub fn stats(&self) -> LedgerStats {
        let mut stats = LedgerStats {
            total: self.transactions.len(),
            pending: 0,
            confirmed: 0,
            processed: 0,
        };
        for record in self.transactions.values() {
            match record.status {
                TransactionStatus::Pending => stats.pending += 1,
                TransactionStatus::Confirmed => stats.confirmed += 1,
                TransactionStatus::Processed => stats.processed += 1,
            }
        }
        stats
    }

    /// Drop every tracked transaction (cleanup/testing).
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.by_recipient.clear();
        self.by_amount.clear();
        warn!("Transaction ledger cleared");
    }
}

/// Thread-safe handle around [`TransactionLedger`].
///
/// Each mutating operation holds the write lock for its full duration, so
/// concurrent watcher submissions and poller reads serialize cleanly; reads
/// take the read lock and return owned clones (a snapshot, never a
/// half-applied mutation). Cloning the handle shares the underlying ledger.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<TransactionLedger>>,
}

impl SharedLedger {
    pub fn new(threshold: u32) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TransactionLedger::new(threshold))),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, TransactionLedger> {
        self.inner.read().expect("ledger lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, TransactionLedger> {
        self.inner.write().expect("ledger lock poisoned")
    }

    pub fn threshold(&self) -> u32 {
        self.read().threshold()
    }

    pub fn submit(&self, input: SubmitTransaction) -> Result<TransactionRecord> {
        self.write().submit(input)
    }

    pub fn update_confirmations(
        &self,
        txid: &TxId,
        confirmations: u32,
    ) -> Result<TransactionRecord> {
        self.write().update_confirmations(txid, confirmations)
    }

    pub fn mark_processed(&self, txid: &TxId) -> Result<TransactionRecord> {
        self.write().mark_processed(txid)
    }

    pub fn get(&self, txid: &TxId) -> Option<TransactionRecord> {
        self.read().get(txid)
    }

    pub fn find_by_recipient(&self, recipient: &EthAddress) -> Vec<TransactionRecord> {
        self.read().find_by_recipient(recipient)
    }

    pub fn find_by_amount(&self, amount: u64) -> Vec<TransactionRecord> {
        self.read().find_by_amount(amount)
    }

    pub fn all(&self) -> Vec<TransactionRecord> {
        self.read().all()
    }

    pub fn pending(&self) -> Vec<TransactionRecord> {
        self.read().pending()
    }

    pub fn confirmed(&self) -> Vec<TransactionRecord> {
        self.read().confirmed()
    }

    pub fn delete(&self, txid: &TxId) -> bool {
        self.write().delete(txid)
    }

    pub fn stats(&self) -> LedgerStats {
        self.read().stats()
    }

    pub fn clear(&self) {
        self.write().clear()
    }
}
