use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::error::ErrorCode;
use crate::state::{PoolStatus, PoolV0};
use crate::{POOL_V0_SEED_PREFIX, VAULT_V0_SEED_PREFIX};

#[derive(Accounts)]
#[instruction(phase: u8)]
pub struct WithdrawV0<'info> {
    pub admin: Signer<'info>,

    pub mint: Account<'info, Mint>,

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
        has_one = vault @ ErrorCode::DerivationMismatch,
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
        constraint = destination_token_account.owner == admin.key() @ ErrorCode::TokenAccountOwnerMismatch,
        constraint = destination_token_account.mint == mint.key() @ ErrorCode::MintMismatch,
    )]
    pub destination_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Move the vault's entire residual balance back to the admin and mark the
/// pool drained. The pool record itself is kept.
pub fn handle_withdraw_v0(ctx: Context<WithdrawV0>, phase: u8) -> Result<()> {
    let amount_to_withdraw = ctx.accounts.vault.amount;

    if amount_to_withdraw > 0 {
        let transfer_accounts = Transfer {
            from: ctx.accounts.vault.to_account_info(),
            to: ctx.accounts.destination_token_account.to_account_info(),
            authority: ctx.accounts.pool.to_account_info(),
        };

        let mint_key = ctx.accounts.mint.key();
        let pool_seeds = &[
            POOL_V0_SEED_PREFIX,
            &[phase],
            mint_key.as_ref(),
            &[ctx.accounts.pool.bump],
        ];
        let signer_seeds = &[&pool_seeds[..]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                transfer_accounts,
                signer_seeds,
            ),
            amount_to_withdraw,
        )?;
    } else {
        msg!("Vault is empty, nothing to withdraw.");
    }

    ctx.accounts.pool.status = PoolStatus::Drained;

    msg!(
        "Pool {} drained, {} withdrawn",
        ctx.accounts.pool.key(),
        amount_to_withdraw
    );

    Ok(())
}
