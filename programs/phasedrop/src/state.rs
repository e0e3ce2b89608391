use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum PoolStatus {
    Active,  // Root published, claims accepted while the vault holds funds
    Drained, // Residual balance withdrawn by the admin (one-way)
}

impl Default for PoolStatus {
    fn default() -> Self {
        PoolStatus::Active
    }
}

#[account] // seed [POOL_V0_SEED_PREFIX, phase, mint]
#[derive(InitSpace)]
pub struct PoolV0 {
    /// The admin (authority) pubkey for this pool.
    pub admin: Pubkey,

    /// The mint of the tokens distributed in this phase.
    pub mint: Pubkey,

    /// The token account holding this phase's undistributed balance.
    /// Owned by the pool PDA.
    pub vault: Pubkey,

    /// The currently published Merkle root. Claims verify against this value only.
    pub merkle_root: [u8; 32],

    /// The allocation round this pool belongs to (>= 1).
    pub phase: u8,

    /// Number of times the root has been replaced since creation.
    pub root_version: u32,

    pub status: PoolStatus,

    /// Bump seed for the Pool PDA.
    pub bump: u8,

    /// Bump seed for the Vault PDA.
    pub vault_bump: u8,
}

#[account] // seed [CLAIM_RECORD_V0_SEED_PREFIX, phase, claimant, mint]
#[derive(InitSpace)]
pub struct ClaimRecordV0 {
    /// The claimant who received the tokens.
    pub claimant: Pubkey,

    /// The mint that was transferred.
    pub mint: Pubkey,

    pub phase: u8,

    /// Amount transferred, in the token's smallest unit.
    pub amount: u64,

    /// Timestamp of when the claim was successfully processed.
    pub claimed_at_timestamp: i64,

    /// Bump seed for the ClaimRecord PDA.
    pub bump: u8,
}
