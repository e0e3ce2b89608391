use anchor_lang::prelude::*;

/// Seed prefixes for PDA derivation
#[constant]
pub const POOL_V0_SEED_PREFIX: &[u8] = b"pool_v0";

#[constant]
pub const VAULT_V0_SEED_PREFIX: &[u8] = b"vault_v0";

#[constant]
pub const CLAIM_RECORD_V0_SEED_PREFIX: &[u8] = b"claim_record_v0";

/// Phase 0 is reserved; allocation rounds start at 1.
pub const MIN_PHASE: u8 = 1;

/// Size of the fixed-width leaf preimage: phase (1) + claimant (32) + amount (8).
pub const LEAF_PREIMAGE_LEN: usize = 41;
