use crate::{AddressFinder, SdkError, SdkResult};
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{prelude::*, InstructionData as _};
use phasedrop::MIN_PHASE;

fn require_phase(phase: u8) -> SdkResult<()> {
    if phase < MIN_PHASE {
        return Err(SdkError::InvalidPhase(phase));
    }
    Ok(())
}

pub fn build_initialize_pool_v0_ix(
    address_finder: &AddressFinder,
    admin: &Pubkey,
    phase: u8,
    merkle_root: [u8; 32],
    initial_deposit: u64,
) -> SdkResult<(
    Instruction,
    phasedrop::accounts::InitializePoolV0,
    phasedrop::instruction::InitializePoolV0,
)> {
    require_phase(phase)?;

    let ix_accounts = phasedrop::accounts::InitializePoolV0 {
        admin: *admin,
        mint: address_finder.mint,
        pool: address_finder.find_pool_v0_address(phase).0,
        vault: address_finder.find_vault_v0_address(phase).0,
        admin_token_account: address_finder.find_token_account(admin),
        token_program: address_finder.token_program_id,
        system_program: address_finder.system_program_id,
    };

    let ix_data = phasedrop::instruction::InitializePoolV0 {
        phase,
        merkle_root,
        initial_deposit,
    };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_set_merkle_root_v0_ix(
    address_finder: &AddressFinder,
    admin: &Pubkey,
    phase: u8,
    merkle_root: [u8; 32],
) -> SdkResult<(
    Instruction,
    phasedrop::accounts::SetMerkleRootV0,
    phasedrop::instruction::SetMerkleRootV0,
)> {
    require_phase(phase)?;

    let ix_accounts = phasedrop::accounts::SetMerkleRootV0 {
        admin: *admin,
        mint: address_finder.mint,
        pool: address_finder.find_pool_v0_address(phase).0,
    };

    let ix_data = phasedrop::instruction::SetMerkleRootV0 { phase, merkle_root };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_deposit_v0_ix(
    address_finder: &AddressFinder,
    admin: &Pubkey,
    phase: u8,
    amount: u64,
) -> SdkResult<(
    Instruction,
    phasedrop::accounts::DepositV0,
    phasedrop::instruction::DepositV0,
)> {
    require_phase(phase)?;

    let ix_accounts = phasedrop::accounts::DepositV0 {
        admin: *admin,
        mint: address_finder.mint,
        pool: address_finder.find_pool_v0_address(phase).0,
        vault: address_finder.find_vault_v0_address(phase).0,
        admin_token_account: address_finder.find_token_account(admin),
        token_program: address_finder.token_program_id,
    };

    let ix_data = phasedrop::instruction::DepositV0 { phase, amount };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_withdraw_v0_ix(
    address_finder: &AddressFinder,
    admin: &Pubkey,
    phase: u8,
) -> SdkResult<(
    Instruction,
    phasedrop::accounts::WithdrawV0,
    phasedrop::instruction::WithdrawV0,
)> {
    require_phase(phase)?;

    let ix_accounts = phasedrop::accounts::WithdrawV0 {
        admin: *admin,
        mint: address_finder.mint,
        pool: address_finder.find_pool_v0_address(phase).0,
        vault: address_finder.find_vault_v0_address(phase).0,
        destination_token_account: address_finder.find_token_account(admin),
        token_program: address_finder.token_program_id,
    };

    let ix_data = phasedrop::instruction::WithdrawV0 { phase };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_claim_tokens_v0_ix(
    address_finder: &AddressFinder,
    claimant: &Pubkey,
    phase: u8,
    amount: u64,
    merkle_proof: Vec<[u8; 32]>,
) -> SdkResult<(
    Instruction,
    phasedrop::accounts::ClaimTokensV0,
    phasedrop::instruction::ClaimTokensV0,
)> {
    require_phase(phase)?;

    let ix_accounts = phasedrop::accounts::ClaimTokensV0 {
        claimant: *claimant,
        pool: address_finder.find_pool_v0_address(phase).0,
        mint: address_finder.mint,
        vault: address_finder.find_vault_v0_address(phase).0,
        claimant_token_account: address_finder.find_token_account(claimant),
        claim_record: address_finder
            .find_claim_record_v0_address(phase, claimant)
            .0,
        token_program: address_finder.token_program_id,
        associated_token_program: address_finder.associated_token_program_id,
        system_program: address_finder.system_program_id,
        instructions_sysvar: address_finder.instructions_sysvar_id,
    };

    let ix_data = phasedrop::instruction::ClaimTokensV0 {
        phase,
        amount,
        merkle_proof,
    };

    let ix = Instruction {
        program_id: address_finder.program_id,
        accounts: ix_accounts.to_account_metas(None),
        data: ix_data.data(),
    };

    Ok((ix, ix_accounts, ix_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::Discriminator;

    #[test]
    fn test_claim_ix_layout() {
        let finder = AddressFinder::new(phasedrop::ID, Pubkey::new_unique());
        let claimant = Pubkey::new_unique();
        let proof = vec![[1u8; 32], [2u8; 32], [3u8; 32]];

        let (ix, accounts, _) =
            build_claim_tokens_v0_ix(&finder, &claimant, 2, 500, proof).unwrap();

        assert_eq!(ix.program_id, phasedrop::ID);
        assert_eq!(ix.accounts.len(), 10);
        assert_eq!(ix.accounts[0].pubkey, claimant);
        assert!(ix.accounts[0].is_signer);
        assert!(ix.accounts[0].is_writable);
        assert_eq!(
            accounts.claim_record,
            finder.find_claim_record_v0_address(2, &claimant).0
        );

        // discriminator + phase + amount + vec length + 3 nodes
        assert_eq!(ix.data.len(), 8 + 1 + 8 + 4 + 3 * 32);
        assert!(ix
            .data
            .starts_with(phasedrop::instruction::ClaimTokensV0::DISCRIMINATOR));
        assert_eq!(ix.data[8], 2);
        assert_eq!(&ix.data[9..17], &500u64.to_le_bytes());
    }

    #[test]
    fn test_claim_ix_account_mutability() {
        let finder = AddressFinder::new(phasedrop::ID, Pubkey::new_unique());
        let claimant = Pubkey::new_unique();
        let (ix, accounts, _) =
            build_claim_tokens_v0_ix(&finder, &claimant, 1, 1, vec![]).unwrap();

        let writable: Vec<Pubkey> = ix
            .accounts
            .iter()
            .filter(|meta| meta.is_writable)
            .map(|meta| meta.pubkey)
            .collect();

        assert!(writable.contains(&accounts.vault));
        assert!(writable.contains(&accounts.claim_record));
        assert!(writable.contains(&accounts.claimant_token_account));
        assert!(!writable.contains(&accounts.pool));
        assert!(!writable.contains(&accounts.mint));
    }

    #[test]
    fn test_builders_reject_phase_zero() {
        let finder = AddressFinder::new(phasedrop::ID, Pubkey::new_unique());
        let admin = Pubkey::new_unique();

        assert!(matches!(
            build_initialize_pool_v0_ix(&finder, &admin, 0, [0; 32], 0),
            Err(SdkError::InvalidPhase(0))
        ));
        assert!(matches!(
            build_claim_tokens_v0_ix(&finder, &admin, 0, 1, vec![]),
            Err(SdkError::InvalidPhase(0))
        ));
    }

    #[test]
    fn test_admin_ixs_target_phase_pool() {
        let finder = AddressFinder::new(phasedrop::ID, Pubkey::new_unique());
        let admin = Pubkey::new_unique();
        let pool = finder.find_pool_v0_address(3).0;

        let (_, init, _) = build_initialize_pool_v0_ix(&finder, &admin, 3, [9; 32], 10).unwrap();
        let (_, set_root, _) = build_set_merkle_root_v0_ix(&finder, &admin, 3, [8; 32]).unwrap();
        let (_, deposit, _) = build_deposit_v0_ix(&finder, &admin, 3, 10).unwrap();
        let (_, withdraw, _) = build_withdraw_v0_ix(&finder, &admin, 3).unwrap();

        assert_eq!(init.pool, pool);
        assert_eq!(set_root.pool, pool);
        assert_eq!(deposit.pool, pool);
        assert_eq!(withdraw.pool, pool);
        assert_eq!(withdraw.destination_token_account, finder.find_token_account(&admin));
    }
}
