use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::error::ErrorCode;
use crate::state::{PoolStatus, PoolV0};
use crate::{POOL_V0_SEED_PREFIX, VAULT_V0_SEED_PREFIX};

#[derive(Accounts)]
#[instruction(phase: u8)]
pub struct DepositV0<'info> {
    pub admin: Signer<'info>,

    pub mint: Account<'info, Mint>,

    #[account(
        seeds = [
            POOL_V0_SEED_PREFIX,
            &[phase],
            mint.key().as_ref(),
        ],
        bump = pool.bump,
        has_one = admin @ ErrorCode::PoolAdminMismatch,
        has_one = mint @ ErrorCode::MintMismatch,
        has_one = vault @ ErrorCode::DerivationMismatch,
        constraint = pool.status == PoolStatus::Active @ ErrorCode::PoolDrained,
    )]
    pub pool: Account<'info, PoolV0>,

    #[account(
        mut,
        seeds = [
            VAULT_V0_SEED_PREFIX,
            &[phase],
            mint.key().as_ref(),
        ],
        bump = pool.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = admin_token_account.owner == admin.key() @ ErrorCode::TokenAccountOwnerMismatch,
        constraint = admin_token_account.mint == mint.key() @ ErrorCode::MintMismatch,
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_deposit_v0(ctx: Context<DepositV0>, _phase: u8, amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::InvalidDepositAmount);

    let transfer_accounts = Transfer {
        from: ctx.accounts.admin_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        authority: ctx.accounts.admin.to_account_info(),
    };

    token::transfer(
        CpiContext::new(ctx.accounts.token_program.to_account_info(), transfer_accounts),
        amount,
    )?;

    msg!("Deposited {} into vault {}", amount, ctx.accounts.vault.key());

    Ok(())
}
