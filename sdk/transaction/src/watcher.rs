//! Watcher wire contract.
//!
//! The watcher extracts raw Zcash chain data for each burn it detects and
//! submits it alongside the parsed amount/recipient. Field names here are
//! the contract with both the watcher and the circuit input builder, so the
//! non-snake-case spellings are pinned with serde renames. Contents are not
//! validated cryptographically at this layer.

use serde::{Deserialize, Serialize};

use crate::{EthAddress, TxId};

/// Raw chain data required later for witness assembly.
///
/// Hash halves (`*_hi` / `*_lo`) and script hashes are decimal field-element
/// strings; a hash is split in two because it does not fit a single BN254
/// field element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZecTxData {
    pub tx_bytes: Vec<u8>,
    pub memo_bytes: Vec<u8>,
    pub out_values: Vec<u64>,
    #[serde(rename = "out_scriptHashes")]
    pub out_script_hashes: Vec<String>,
    pub merkle_sibling_hi: Vec<String>,
    pub merkle_sibling_lo: Vec<String>,
    pub merkle_path_dir: Vec<u8>,
    #[serde(rename = "merkleRoot_hi")]
    pub merkle_root_hi: String,
    #[serde(rename = "merkleRoot_lo")]
    pub merkle_root_lo: String,
    #[serde(rename = "txId_hi")]
    pub tx_id_hi: String,
    #[serde(rename = "txId_lo")]
    pub tx_id_lo: String,
}

/// One burn transaction as reported by the watcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitTransaction {
    pub txid: TxId,
    /// Amount in zatoshis
    pub amount: u64,
    pub recipient: EthAddress,
    pub confirmations: u32,
    #[serde(rename = "txData")]
    pub tx_data: ZecTxData,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx_data() -> ZecTxData {
        ZecTxData {
            tx_bytes: vec![1, 2, 3],
            memo_bytes: vec![0; 32],
            out_values: vec![5000],
            out_script_hashes: vec!["42".into()],
            merkle_sibling_hi: vec!["1".into()],
            merkle_sibling_lo: vec!["2".into()],
            merkle_path_dir: vec![0, 1],
            merkle_root_hi: "10".into(),
            merkle_root_lo: "11".into(),
            tx_id_hi: "12".into(),
            tx_id_lo: "13".into(),
        }
    }

    #[test]
    fn test_wire_field_names_pinned() {
        let json = serde_json::to_value(sample_tx_data()).unwrap();
        let obj = json.as_object().unwrap();
        for field in [
            "tx_bytes",
            "memo_bytes",
            "out_values",
            "out_scriptHashes",
            "merkle_sibling_hi",
            "merkle_sibling_lo",
            "merkle_path_dir",
            "merkleRoot_hi",
            "merkleRoot_lo",
            "txId_hi",
            "txId_lo",
        ] {
            assert!(obj.contains_key(field), "missing wire field {field}");
        }
    }

    #[test]
    fn test_submit_roundtrip() {
        let submit = SubmitTransaction {
            txid: "a".repeat(64).parse().unwrap(),
            amount: 100_000_000,
            recipient: "0x1111111111111111111111111111111111111111"
                .parse()
                .unwrap(),
            confirmations: 0,
            tx_data: sample_tx_data(),
        };
        let json = serde_json::to_string(&submit).unwrap();
        assert!(json.contains("\"txData\""));
        let back: SubmitTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, submit);
    }
}
