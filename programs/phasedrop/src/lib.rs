pub mod claim_leaf;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod proofs;
pub mod state;

pub use claim_leaf::*;
pub use constants::{
    CLAIM_RECORD_V0_SEED_PREFIX, LEAF_PREIMAGE_LEN, MIN_PHASE, POOL_V0_SEED_PREFIX,
    VAULT_V0_SEED_PREFIX,
};
pub use error::ErrorCode;
pub use instructions::*;
pub use proofs::{compute_root, hash_pair, verify_proof};
pub use state::*;

use anchor_lang::prelude::*;

declare_id!("BFqJNkk5VekSWTrRrvaGHNPrdCFmGFAsFJYJnsCTPo72");

#[program]
pub mod phasedrop {
    use super::instructions;
    use super::*;

    // admin
    pub fn initialize_pool_v0(
        ctx: Context<InitializePoolV0>,
        phase: u8,
        merkle_root: [u8; 32],
        initial_deposit: u64,
    ) -> Result<()> {
        instructions::handle_initialize_pool_v0(ctx, phase, merkle_root, initial_deposit)
    }

    // admin
    pub fn set_merkle_root_v0(
        ctx: Context<SetMerkleRootV0>,
        phase: u8,
        merkle_root: [u8; 32],
    ) -> Result<()> {
        instructions::handle_set_merkle_root_v0(ctx, phase, merkle_root)
    }

    // admin
    pub fn deposit_v0(ctx: Context<DepositV0>, phase: u8, amount: u64) -> Result<()> {
        instructions::handle_deposit_v0(ctx, phase, amount)
    }

    // admin
    pub fn withdraw_v0(ctx: Context<WithdrawV0>, phase: u8) -> Result<()> {
        instructions::handle_withdraw_v0(ctx, phase)
    }

    // claimant
    pub fn claim_tokens_v0(
        ctx: Context<ClaimTokensV0>,
        phase: u8,
        amount: u64,
        merkle_proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::handle_claim_tokens_v0(ctx, phase, amount, merkle_proof)
    }
}
