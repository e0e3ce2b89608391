use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::state::{PoolStatus, PoolV0};
use crate::POOL_V0_SEED_PREFIX;

#[derive(Accounts)]
#[instruction(phase: u8)]
pub struct SetMerkleRootV0<'info> {
    pub admin: Signer<'info>,

    /// CHECK: only used as a seed; the pool's `mint` field is checked below.
    pub mint: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [
            POOL_V0_SEED_PREFIX,
            &[phase],
            mint.key().as_ref(),
        ],
        bump = pool.bump,
        has_one = admin @ ErrorCode::PoolAdminMismatch,
        has_one = mint @ ErrorCode::MintMismatch,
        constraint = pool.status == PoolStatus::Active @ ErrorCode::PoolDrained,
    )]
    pub pool: Account<'info, PoolV0>,
}

/// Replace the published root. Proofs issued against the previous root stop
/// verifying unless their leaf is also committed by the new one.
pub fn handle_set_merkle_root_v0(
    ctx: Context<SetMerkleRootV0>,
    _phase: u8, // consumed in account constraints
    merkle_root: [u8; 32],
) -> Result<()> {
    let pool = &mut ctx.accounts.pool;

    pool.merkle_root = merkle_root;
    pool.root_version = pool
        .root_version
        .checked_add(1)
        .ok_or(ErrorCode::NumericOverflow)?;

    msg!(
        "Pool {} root rotated (version {})",
        pool.key(),
        pool.root_version
    );

    Ok(())
}
