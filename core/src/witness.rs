//! Witness assembly for the ZEC burn circuit.
//!
//! Maps a tracked record's raw chain payload plus an encrypted-amount blob
//! into the exact fixed-width layout the circuit and its verifier expect.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        Burn Witness                            │
//! │                                                                │
//! │  Public inputs (order pinned in `public_inputs`):              │
//! │  ┌──────────────────────────────────────────────────────────┐  │
//! │  │ txId_hi · txId_lo · merkleRoot_hi · merkleRoot_lo        │  │
//! │  │ burnScriptHash · recipient · encAmountHash               │  │
//! │  └──────────────────────────────────────────────────────────┘  │
//! │                                                                │
//! │  Private inputs:                                               │
//! │  ┌──────────────────────────────────────────────────────────┐  │
//! │  │ tx_bytes[N_TX_BYTES]                                     │  │
//! │  │ out_values[N_OUTPUTS] · out_scriptHashes[N_OUTPUTS]      │  │
//! │  │ amount · memo_bytes[N_MEMO_BYTES]                        │  │
//! │  │ merkle_sibling_hi/lo[MERKLE_DEPTH] · path_dir            │  │
//! │  │ encAmount_bytes[N_ENC_BYTES]                             │  │
//! │  └──────────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every declared-length field follows a single rule: inputs shorter than
//! the declared dimension are right-padded with a type-appropriate zero
//! (`0` for numeric elements, `"0"` for decimal field strings), longer
//! inputs are truncated. An off-by-one here makes proofs verify against the
//! wrong claim or fail with no diagnostic, which is why the rule lives in
//! one helper.

use num_bigint::BigUint;
use serde_json::{Value, json};

use fhzec_transaction::{EthAddress, ZecTxData};

use crate::encrypted::EncryptedAmount;
use crate::ledger::TransactionRecord;

// Circuit dimensions - must match main.circom
pub const N_TX_BYTES: usize = 2000;
pub const N_OUTPUTS: usize = 4;
pub const N_MEMO_BYTES: usize = 32;
pub const N_ENC_BYTES: usize = 128;
pub const MERKLE_DEPTH: usize = 20;

/// The complete witness for one burn proof.
///
/// Ephemeral: produced fresh per proof-generation request, handed to the
/// external prover, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledWitness {
    // Public scalars
    pub tx_id_hi: String,
    pub tx_id_lo: String,
    pub merkle_root_hi: String,
    pub merkle_root_lo: String,
    pub burn_script_hash: String,
    /// Recipient address as a decimal field scalar
    pub recipient: String,
    pub enc_amount_hash: String,

    // Private inputs
    pub tx_bytes: [u8; N_TX_BYTES],
    pub out_values: [u64; N_OUTPUTS],
    pub out_script_hashes: [String; N_OUTPUTS],
    /// Amount in zatoshis
    pub amount: u64,
    pub memo_bytes: [u8; N_MEMO_BYTES],
    pub merkle_sibling_hi: [String; MERKLE_DEPTH],
    pub merkle_sibling_lo: [String; MERKLE_DEPTH],
    pub merkle_path_dir: [u8; MERKLE_DEPTH],
    pub enc_amount_bytes: [u8; N_ENC_BYTES],
}

impl AssembledWitness {
    /// Render the witness as the prover's JSON input object, keyed by the
    /// circuit's signal names.
    pub fn to_circuit_inputs(&self) -> Value {
        json!({
            "txId_hi": self.tx_id_hi,
            "txId_lo": self.tx_id_lo,
            "merkleRoot_hi": self.merkle_root_hi,
            "merkleRoot_lo": self.merkle_root_lo,
            "burnScriptHash": self.burn_script_hash,
            "recipient": self.recipient,
            "encAmountHash": self.enc_amount_hash,
            "tx_bytes": self.tx_bytes.to_vec(),
            "out_values": self.out_values.to_vec(),
            "out_scriptHashes": self.out_script_hashes.to_vec(),
            "amount": self.amount,
            "memo_bytes": self.memo_bytes.to_vec(),
            "merkle_sibling_hi": self.merkle_sibling_hi.to_vec(),
            "merkle_sibling_lo": self.merkle_sibling_lo.to_vec(),
            "merkle_path_dir": self.merkle_path_dir.to_vec(),
            "encAmount_bytes": self.enc_amount_bytes.to_vec(),
        })
    }
}

/// Right-pad `src` with `fill` (or truncate it) to exactly `N` elements.
fn pad_to<T: Clone, const N: usize>(src: &[T], fill: T) -> [T; N] {
    std::array::from_fn(|i| src.get(i).cloned().unwrap_or_else(|| fill.clone()))
}

/// Convert an EVM address to a field scalar: the 20 raw bytes read as a
/// big-endian unsigned integer, rendered as a decimal string.
pub fn address_to_field(address: &EthAddress) -> String {
    BigUint::from_bytes_be(&address.to_bytes()).to_str_radix(10)
}

/// Memo bytes fed to the circuit.
///
/// The circuit packs the memo into a field element and checks it against
/// the recipient scalar, so the memo is recomputed from the claimed
/// recipient (20 address bytes, zero-padded) rather than taken from the
/// observed on-chain memo. The observed `memo_bytes` ride along in the
/// payload but are not consulted here.
fn memo_from_recipient(recipient: &EthAddress) -> [u8; N_MEMO_BYTES] {
    pad_to(&recipient.to_bytes(), 0)
}

/// Assemble the fixed-width witness for one burn.
///
/// `burn_script_hash` is the canonical value from configuration; an unset
/// (empty) value falls back to `"0"`.
pub fn assemble(
    tx_data: &ZecTxData,
    amount_zatoshis: u64,
    recipient: &EthAddress,
    encrypted: &EncryptedAmount,
    burn_script_hash: &str,
) -> AssembledWitness {
    let burn_script_hash = if burn_script_hash.is_empty() {
        "0".to_string()
    } else {
        burn_script_hash.to_string()
    };

    AssembledWitness {
        tx_id_hi: tx_data.tx_id_hi.clone(),
        tx_id_lo: tx_data.tx_id_lo.clone(),
        merkle_root_hi: tx_data.merkle_root_hi.clone(),
        merkle_root_lo: tx_data.merkle_root_lo.clone(),
        burn_script_hash,
        recipient: address_to_field(recipient),
        enc_amount_hash: encrypted.hash.clone(),

        tx_bytes: pad_to(&tx_data.tx_bytes, 0),
        out_values: pad_to(&tx_data.out_values, 0),
        out_script_hashes: pad_to(&tx_data.out_script_hashes, "0".to_string()),
        amount: amount_zatoshis,
        memo_bytes: memo_from_recipient(recipient),
        merkle_sibling_hi: pad_to(&tx_data.merkle_sibling_hi, "0".to_string()),
        merkle_sibling_lo: pad_to(&tx_data.merkle_sibling_lo, "0".to_string()),
        merkle_path_dir: pad_to(&tx_data.merkle_path_dir, 0),
        enc_amount_bytes: pad_to(&encrypted.bytes, 0),
    }
}

/// Assemble the witness for a tracked ledger record.
pub fn assemble_for_record(
    record: &TransactionRecord,
    encrypted: &EncryptedAmount,
    burn_script_hash: &str,
) -> AssembledWitness {
    assemble(
        &record.tx_data,
        record.amount,
        &record.recipient,
        encrypted,
        burn_script_hash,
    )
}
