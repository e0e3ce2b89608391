use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    system_program::ID as SYSTEM_PROGRAM_ID, sysvar::instructions::ID as INSTRUCTIONS_SYSVAR_ID,
};
use anchor_spl::associated_token::{
    get_associated_token_address, ID as ASSOCIATED_TOKEN_PROGRAM_ID,
};
use anchor_spl::token::ID as TOKEN_PROGRAM_ID;
use phasedrop::{CLAIM_RECORD_V0_SEED_PREFIX, POOL_V0_SEED_PREFIX, VAULT_V0_SEED_PREFIX};

use crate::{ClaimError, ClaimResult};

/// Derives every program address for one token mint.
///
/// The program id is always supplied by the caller; two finders with
/// different program ids derive disjoint address sets for the same inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressFinder {
    pub program_id: Pubkey,
    pub mint: Pubkey,

    pub associated_token_program_id: Pubkey,
    pub instructions_sysvar_id: Pubkey,
    pub system_program_id: Pubkey,
    pub token_program_id: Pubkey,
}

impl AddressFinder {
    pub fn new(program_id: Pubkey, mint: Pubkey) -> Self {
        Self {
            program_id,
            mint,
            associated_token_program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
            instructions_sysvar_id: INSTRUCTIONS_SYSVAR_ID,
            system_program_id: SYSTEM_PROGRAM_ID,
            token_program_id: TOKEN_PROGRAM_ID,
        }
    }

    pub fn find_pool_v0_address(&self, phase: u8) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[POOL_V0_SEED_PREFIX, &[phase], self.mint.as_ref()],
            &self.program_id,
        )
    }

    pub fn find_vault_v0_address(&self, phase: u8) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[VAULT_V0_SEED_PREFIX, &[phase], self.mint.as_ref()],
            &self.program_id,
        )
    }

    pub fn find_claim_record_v0_address(&self, phase: u8, claimant: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                CLAIM_RECORD_V0_SEED_PREFIX,
                &[phase],
                claimant.as_ref(),
                self.mint.as_ref(),
            ],
            &self.program_id,
        )
    }

    pub fn find_token_account(&self, owner: &Pubkey) -> Pubkey {
        get_associated_token_address(owner, &self.mint)
    }

    /// Addresses shared by every claim in `phase`, in the order they are
    /// registered in the phase's lookup table.
    pub fn lookup_table_addresses(&self, phase: u8) -> Vec<Pubkey> {
        vec![
            self.token_program_id,
            self.associated_token_program_id,
            self.system_program_id,
            self.instructions_sysvar_id,
            self.mint,
            self.find_pool_v0_address(phase).0,
            self.find_vault_v0_address(phase).0,
        ]
    }

    pub fn check_pool_address(&self, phase: u8, supplied: &Pubkey) -> ClaimResult<()> {
        check_derived("pool", self.find_pool_v0_address(phase).0, *supplied)
    }

    pub fn check_vault_address(&self, phase: u8, supplied: &Pubkey) -> ClaimResult<()> {
        check_derived("vault", self.find_vault_v0_address(phase).0, *supplied)
    }

    pub fn check_claim_record_address(
        &self,
        phase: u8,
        claimant: &Pubkey,
        supplied: &Pubkey,
    ) -> ClaimResult<()> {
        check_derived(
            "claim record",
            self.find_claim_record_v0_address(phase, claimant).0,
            *supplied,
        )
    }

    pub fn check_token_account(&self, owner: &Pubkey, supplied: &Pubkey) -> ClaimResult<()> {
        check_derived("token account", self.find_token_account(owner), *supplied)
    }
}

/// `DerivationMismatch` unless `actual` is the derived `expected` address.
pub fn check_derived(
    account: &'static str,
    expected: Pubkey,
    actual: Pubkey,
) -> ClaimResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(ClaimError::DerivationMismatch {
            account,
            expected,
            actual,
        })
    }
}
