use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::error::ErrorCode;
use crate::state::{PoolStatus, PoolV0};
use crate::{MIN_PHASE, POOL_V0_SEED_PREFIX, VAULT_V0_SEED_PREFIX};

#[derive(Accounts)]
#[instruction(phase: u8)]
pub struct InitializePoolV0<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        space = 8 + PoolV0::INIT_SPACE,
        seeds = [
            POOL_V0_SEED_PREFIX,
            &[phase],
            mint.key().as_ref(),
        ],
        bump
    )]
    pub pool: Account<'info, PoolV0>,

    /// The vault (token account) backing this phase.
    /// The pool PDA is its authority and signs every transfer out of it.
    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = pool,
        seeds = [
            VAULT_V0_SEED_PREFIX,
            &[phase],
            mint.key().as_ref(),
        ],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Source of the optional initial deposit.
    #[account(
        mut,
        constraint = admin_token_account.owner == admin.key() @ ErrorCode::TokenAccountOwnerMismatch,
        constraint = admin_token_account.mint == mint.key() @ ErrorCode::MintMismatch,
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handle_initialize_pool_v0(
    ctx: Context<InitializePoolV0>,
    phase: u8,
    merkle_root: [u8; 32],
    initial_deposit: u64,
) -> Result<()> {
    require!(phase >= MIN_PHASE, ErrorCode::InvalidPhase);

    let pool = &mut ctx.accounts.pool;
    pool.set_inner(PoolV0 {
        admin: ctx.accounts.admin.key(),
        mint: ctx.accounts.mint.key(),
        vault: ctx.accounts.vault.key(),
        merkle_root,
        phase,
        root_version: 0,
        status: PoolStatus::Active,
        bump: ctx.bumps.pool,
        vault_bump: ctx.bumps.vault,
    });

    if initial_deposit > 0 {
        let transfer_accounts = Transfer {
            from: ctx.accounts.admin_token_account.to_account_info(),
            to: ctx.accounts.vault.to_account_info(),
            authority: ctx.accounts.admin.to_account_info(),
        };

        token::transfer(
            CpiContext::new(ctx.accounts.token_program.to_account_info(), transfer_accounts),
            initial_deposit,
        )?;
    }

    msg!(
        "Initialized pool {} for phase {} (vault {}, initial deposit {})",
        ctx.accounts.pool.key(),
        phase,
        ctx.accounts.vault.key(),
        initial_deposit
    );

    Ok(())
}
