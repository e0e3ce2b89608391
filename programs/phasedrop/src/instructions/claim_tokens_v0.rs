use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::{
    get_instruction_relative, ID as INSTRUCTIONS_SYSVAR_ID,
};
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::claim_leaf::ClaimLeaf;
use crate::error::ErrorCode;
use crate::proofs::verify_proof;
use crate::state::{ClaimRecordV0, PoolStatus, PoolV0};
use crate::{CLAIM_RECORD_V0_SEED_PREFIX, POOL_V0_SEED_PREFIX, VAULT_V0_SEED_PREFIX};

#[derive(Accounts)]
#[instruction(phase: u8)]
pub struct ClaimTokensV0<'info> {
    /// The person claiming the tokens. This account will sign the transaction.
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        seeds = [
            POOL_V0_SEED_PREFIX,
            &[phase],
            mint.key().as_ref(),
        ],
        bump = pool.bump,
        has_one = mint @ ErrorCode::MintMismatch,
        has_one = vault @ ErrorCode::DerivationMismatch,
        constraint = pool.status == PoolStatus::Active @ ErrorCode::InsufficientVaultBalance,
    )]
    pub pool: Box<Account<'info, PoolV0>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [
            VAULT_V0_SEED_PREFIX,
            &[phase],
            mint.key().as_ref(),
        ],
        bump = pool.vault_bump,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    /// The claimant's token account where the allocation will be sent.
    #[account(
        init_if_needed,
        payer = claimant,
        associated_token::mint = mint,
        associated_token::authority = claimant,
    )]
    pub claimant_token_account: Box<Account<'info, TokenAccount>>,

    /// Existence of this PDA is the claimed marker. `init` fails if the
    /// address is already occupied, which makes a second claim impossible.
    #[account(
        init,
        payer = claimant,
        space = 8 + ClaimRecordV0::INIT_SPACE,
        seeds = [
            CLAIM_RECORD_V0_SEED_PREFIX,
            &[phase],
            claimant.key().as_ref(),
            mint.key().as_ref(),
        ],
        bump
    )]
    pub claim_record: Box<Account<'info, ClaimRecordV0>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,

    /// CHECK: address constrained to the instructions sysvar.
    #[account(address = INSTRUCTIONS_SYSVAR_ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,
}

pub fn handle_claim_tokens_v0(
    ctx: Context<ClaimTokensV0>,
    phase: u8,
    amount: u64,
    merkle_proof: Vec<[u8; 32]>,
) -> Result<()> {
    // 1. Claims must be top-level instructions
    let current_ix = get_instruction_relative(0, &ctx.accounts.instructions_sysvar)?;
    require_keys_eq!(current_ix.program_id, crate::ID, ErrorCode::CpiNotAllowed);

    // 2. Rebuild the leaf from the signer and the arguments
    let claimant = ctx.accounts.claimant.key();
    let leaf = ClaimLeaf::new(phase, claimant, amount);

    // 3. Verify against the currently published root
    let pool = &ctx.accounts.pool;
    if !verify_proof(&merkle_proof, &pool.merkle_root, &leaf.to_hash()) {
        return err!(ErrorCode::InvalidMerkleProof);
    }
    msg!("Merkle proof verified for {} (phase {}).", claimant, phase);

    // 4. Balance is checked at commit time, not at proof time
    require!(
        ctx.accounts.vault.amount >= amount,
        ErrorCode::InsufficientVaultBalance
    );

    // 5. Transfer out of the vault, signed by the pool PDA
    let transfer_accounts = Transfer {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.claimant_token_account.to_account_info(),
        authority: pool.to_account_info(),
    };

    let mint_key = ctx.accounts.mint.key();
    let pool_seeds = &[
        POOL_V0_SEED_PREFIX,
        &[phase],
        mint_key.as_ref(),
        &[pool.bump],
    ];
    let signer_seeds = &[&pool_seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            transfer_accounts,
            signer_seeds,
        ),
        amount,
    )?;

    // 6. Record the claim
    let claim_record = &mut ctx.accounts.claim_record;
    claim_record.set_inner(ClaimRecordV0 {
        claimant,
        mint: mint_key,
        phase,
        amount,
        claimed_at_timestamp: Clock::get()?.unix_timestamp,
        bump: ctx.bumps.claim_record,
    });

    Ok(())
}
