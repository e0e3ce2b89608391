use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;

use crate::constants::LEAF_PREIMAGE_LEN;

/// The data committed by one leaf of a phase's Merkle tree.
///
/// ## ⚠️ CRITICAL: Preimage Layout Stability
///
/// **The 41-byte preimage MUST NEVER CHANGE** once a root has been published.
/// Any change in field order or width changes every leaf hash and invalidates
/// every outstanding proof.
///
/// ### Current Layout (IMMUTABLE):
/// ```text
/// phase:    u8      1 byte,  offset 0
/// claimant: Pubkey 32 bytes, offset 1
/// amount:   u64     8 bytes, offset 33 (little-endian)
/// // Total: 41 bytes
/// ```
///
/// The layout is identical to the Borsh encoding of this struct, so the
/// fixed-width writer below and `try_to_vec()` always agree.
///
/// The leaf hash is plain `SHA256(preimage)`, with no domain prefix.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimLeaf {
    /// The allocation round (1..=255).
    pub phase: u8,
    /// The recipient entitled to claim.
    pub claimant: Pubkey,
    /// Allocation in the token's smallest indivisible unit.
    pub amount: u64,
}

impl ClaimLeaf {
    pub fn new(phase: u8, claimant: Pubkey, amount: u64) -> Self {
        Self {
            phase,
            claimant,
            amount,
        }
    }

    /// Fixed-width preimage: `phase || claimant || amount_le`.
    pub fn to_preimage(&self) -> [u8; LEAF_PREIMAGE_LEN] {
        let mut preimage = [0u8; LEAF_PREIMAGE_LEN];
        preimage[0] = self.phase;
        preimage[1..33].copy_from_slice(self.claimant.as_ref());
        preimage[33..41].copy_from_slice(&self.amount.to_le_bytes());
        preimage
    }

    /// Hash this leaf to produce the 32-byte value stored in the tree.
    pub fn to_hash(&self) -> [u8; 32] {
        let preimage = self.to_preimage();
        hashv(&[&preimage[..]]).to_bytes()
    }
}
