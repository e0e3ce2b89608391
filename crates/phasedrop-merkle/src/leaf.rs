use anchor_lang::prelude::Pubkey;
use phasedrop::{ClaimLeaf, MIN_PHASE};

use crate::{MerkleError, MerkleResult};

/// Encode an allocation into its leaf, validating the off-chain input.
///
/// Inputs arrive wider than the wire types (a phase read from a file, an
/// amount summed from several rows), so both are range checked here before
/// they are narrowed. Anything out of range is a malformed input.
pub fn encode_leaf(phase: u64, claimant: Pubkey, amount: u128) -> MerkleResult<ClaimLeaf> {
    let phase = validate_phase(phase)?;
    let amount =
        u64::try_from(amount).map_err(|_| MerkleError::AmountOverflow(amount.to_string()))?;

    Ok(ClaimLeaf::new(phase, claimant, amount))
}

pub fn validate_phase(phase: u64) -> MerkleResult<u8> {
    match u8::try_from(phase) {
        Ok(p) if p >= MIN_PHASE => Ok(p),
        _ => Err(MerkleError::InvalidPhase(phase)),
    }
}
