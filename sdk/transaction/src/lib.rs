use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod watcher;
pub use watcher::{SubmitTransaction, ZecTxData};

/// Errors raised when wire identifiers fail shape validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Transaction id is not 64 hex characters
    #[error("invalid txid {0:?}: expected 64 hex characters")]
    InvalidTxId(String),

    /// Address is not `0x` followed by 40 hex characters
    #[error("invalid recipient address {0:?}: expected 0x followed by 40 hex characters")]
    InvalidAddress(String),
}

/// A Zcash transaction id, stored as its canonical 64-character lowercase
/// hex rendering. Validated at parse time; once constructed the inner string
/// always has the canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TxId(String);

impl TxId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TxId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(ParseError::InvalidTxId(s.to_string()))
        }
    }
}

impl TryFrom<String> for TxId {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TxId> for String {
    fn from(id: TxId) -> String {
        id.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An EVM recipient address (`0x` + 40 hex characters), case-normalized to
/// lowercase at parse time so index lookups and memo derivation agree on one
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EthAddress(String);

impl EthAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The raw 20 address bytes.
    pub fn to_bytes(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        hex::decode_to_slice(&self.0[2..], &mut out)
            .expect("address shape checked at construction");
        out
    }
}

impl FromStr for EthAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| ParseError::InvalidAddress(s.to_string()))?;
        if hex_part.len() == 40 && hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(format!("0x{}", hex_part.to_ascii_lowercase())))
        } else {
            Err(ParseError::InvalidAddress(s.to_string()))
        }
    }
}

impl TryFrom<String> for EthAddress {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EthAddress> for String {
    fn from(addr: EthAddress) -> String {
        addr.0
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a tracked burn transaction.
///
/// Pending until the confirmation threshold is reached, Confirmed once it
/// is, Processed after the destination-chain mint. The status only ever
/// advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Processed,
}

impl TransactionStatus {
    pub fn is_processed(self) -> bool {
        matches!(self, TransactionStatus::Processed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Processed => "processed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txid_parse_and_normalize() {
        let id: TxId = "A".repeat(64).parse().unwrap();
        assert_eq!(id.as_str(), "a".repeat(64));
    }

    #[test]
    fn test_txid_rejects_bad_shapes() {
        assert!("abc".parse::<TxId>().is_err());
        assert!("g".repeat(64).parse::<TxId>().is_err());
        assert!("a".repeat(63).parse::<TxId>().is_err());
        assert!("a".repeat(65).parse::<TxId>().is_err());
    }

    #[test]
    fn test_address_parse_and_normalize() {
        let addr: EthAddress = "0xDEADBEEFdeadbeefDEADBEEFdeadbeefDEADBEEF"
            .parse()
            .unwrap();
        assert_eq!(addr.as_str(), "0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef");
    }

    #[test]
    fn test_address_rejects_bad_shapes() {
        assert!("deadbeefdeadbeefdeadbeefdeadbeefdeadbeef".parse::<EthAddress>().is_err());
        assert!("0x1234".parse::<EthAddress>().is_err());
        assert!("0xzzadbeefdeadbeefdeadbeefdeadbeefdeadbeef".parse::<EthAddress>().is_err());
    }

    #[test]
    fn test_address_to_bytes() {
        let addr: EthAddress = "0x0000000000000000000000000000000000000001"
            .parse()
            .unwrap();
        let mut expected = [0u8; 20];
        expected[19] = 1;
        assert_eq!(addr.to_bytes(), expected);
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&TransactionStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        let back: TransactionStatus = serde_json::from_str("\"processed\"").unwrap();
        assert_eq!(back, TransactionStatus::Processed);
    }

    #[test]
    fn test_txid_serde_validates() {
        let ok: Result<TxId, _> = serde_json::from_str(&format!("\"{}\"", "b".repeat(64)));
        assert!(ok.is_ok());
        let bad: Result<TxId, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
