//! Encrypted amount handling.
//!
//! The minted asset is confidential: the transferred amount enters the
//! circuit as an opaque encrypted byte blob plus a field-element hash
//! binding the blob to the proof. Encryption normally happens in the
//! caller's FHE coprocessor client; when that client is unavailable the
//! caller falls back to a local encoding that hides the amount behind
//! random filler. The blob carries its provenance so downstream consumers
//! can tell the two apart instead of passing an untyped byte soup around.

use num_bigint::BigUint;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::witness::N_ENC_BYTES;

/// How an encrypted amount blob was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncryptionSource {
    /// Encrypted by the external FHE coprocessor client
    Cofhe,
    /// Local fallback encoding (amount little-endian + random filler)
    LocalFallback,
}

/// An encrypted amount blob plus the hash the circuit binds it to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptedAmount {
    pub bytes: Vec<u8>,
    /// Decimal field-element hash of the blob (a circuit public input)
    pub hash: String,
    pub source: EncryptionSource,
}

impl EncryptedAmount {
    /// Wrap an externally FHE-encrypted blob and its precomputed hash.
    pub fn external(bytes: Vec<u8>, hash: String) -> Self {
        Self {
            bytes,
            hash,
            source: EncryptionSource::Cofhe,
        }
    }

    /// Local fallback encoding: [`N_ENC_BYTES`] bytes carrying the zatoshi
    /// amount little-endian in the first 8 and OS randomness in the rest.
    pub fn local_fallback(zatoshis: u64) -> Self {
        let mut bytes = vec![0u8; N_ENC_BYTES];
        bytes[..8].copy_from_slice(&zatoshis.to_le_bytes());
        rand::thread_rng().fill_bytes(&mut bytes[8..]);

        let hash = hash_enc_bytes(&bytes);
        Self {
            bytes,
            hash,
            source: EncryptionSource::LocalFallback,
        }
    }
}

/// Field-element hash of an encrypted blob: SHA-256 over the first 32 blob
/// bytes, truncated to 31 digest bytes so the big-endian value always fits
/// a BN254 field element, rendered as a decimal string.
pub fn hash_enc_bytes(bytes: &[u8]) -> String {
    let take = bytes.len().min(32);
    let digest = Sha256::digest(&bytes[..take]);
    BigUint::from_bytes_be(&digest[..31]).to_str_radix(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        let enc = EncryptedAmount::local_fallback(123_456_789);
        assert_eq!(enc.bytes.len(), N_ENC_BYTES);
        assert_eq!(&enc.bytes[..8], &123_456_789u64.to_le_bytes());
        assert_eq!(enc.source, EncryptionSource::LocalFallback);
    }

    #[test]
    fn test_fallback_hash_matches_bytes() {
        let enc = EncryptedAmount::local_fallback(1);
        assert_eq!(enc.hash, hash_enc_bytes(&enc.bytes));
    }

    #[test]
    fn test_hash_is_deterministic_over_first_32_bytes() {
        let mut a = vec![7u8; 64];
        let b = vec![7u8; 32];
        assert_eq!(hash_enc_bytes(&a), hash_enc_bytes(&b));

        // A change past byte 32 is invisible to the hash...
        a[63] = 0;
        assert_eq!(hash_enc_bytes(&a), hash_enc_bytes(&b));
        // ...a change inside the window is not.
        a[0] = 0;
        assert_ne!(hash_enc_bytes(&a), hash_enc_bytes(&b));
    }

    #[test]
    fn test_hash_fits_a_field_element() {
        let hash = hash_enc_bytes(&[0xffu8; 32]);
        let value: BigUint = hash.parse().unwrap();
        assert!(value < BigUint::from(1u8) << 248);
    }

    #[test]
    fn test_external_keeps_provenance() {
        let enc = EncryptedAmount::external(vec![1, 2, 3], "42".into());
        assert_eq!(enc.source, EncryptionSource::Cofhe);
        assert_eq!(enc.hash, "42");
    }
}
