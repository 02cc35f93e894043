//! Public input extraction.
//!
//! The verifier contract receives the circuit's public signals as a flat,
//! position-sensitive array. This module is the single place that knows the
//! order; witness assembly and verification both depend on it agreeing with
//! the circuit's `public` declaration.

use crate::witness::AssembledWitness;

/// Number of public signals the burn circuit exposes.
pub const N_PUBLIC_INPUTS: usize = 7;

/// Flatten a witness's public scalars into verifier submission order:
/// `[txId_hi, txId_lo, merkleRoot_hi, merkleRoot_lo, burnScriptHash,
/// recipient, encAmountHash]`.
pub fn extract_public_inputs(witness: &AssembledWitness) -> [String; N_PUBLIC_INPUTS] {
    [
        witness.tx_id_hi.clone(),
        witness.tx_id_lo.clone(),
        witness.merkle_root_hi.clone(),
        witness.merkle_root_lo.clone(),
        witness.burn_script_hash.clone(),
        witness.recipient.clone(),
        witness.enc_amount_hash.clone(),
    ]
}
