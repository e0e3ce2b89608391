#![cfg(feature = "test-sbf")]

use phasedrop::{ErrorCode, PoolStatus};
use phasedrop_ledger::{
    build_proof_artifact, custom_error_code, program_error, SvmFixture, TEST_ADMIN_SUPPLY,
};
use solana_sdk::signature::Signer;

const ALICE_AMOUNT: u64 = 100_000_000_000;
const BOB_AMOUNT: u64 = 250_500_000_000;

/// Withdraw returns the residual to the admin and the pool stays drained,
/// even after tokens are sent to the vault outside the program.
#[test]
fn test_withdraw_v0_drains_pool() {
    let mut test = SvmFixture::new().unwrap();
    let alice = test.funded_claimant();
    let bob = test.funded_claimant();

    let proofs = build_proof_artifact(
        1,
        &[(alice.pubkey(), ALICE_AMOUNT), (bob.pubkey(), BOB_AMOUNT)],
    );
    test.initialize_pool(1, proofs.root_bytes().unwrap(), ALICE_AMOUNT + BOB_AMOUNT)
        .unwrap();
    test.claim(&alice, &proofs.entry(&alice.pubkey()).unwrap())
        .unwrap();

    test.withdraw(1).expect("withdraw should succeed");

    assert_eq!(test.pool(1).unwrap().status, PoolStatus::Drained);
    assert_eq!(test.vault_balance(1), 0);
    assert_eq!(test.admin_balance(), TEST_ADMIN_SUPPLY - ALICE_AMOUNT);

    let bob_entry = proofs.entry(&bob.pubkey()).unwrap();
    let result = test.claim(&bob, &bob_entry);
    assert_eq!(
        custom_error_code(&result),
        Some(program_error(ErrorCode::InsufficientVaultBalance))
    );

    // Refilling the vault directly does not reopen the pool
    let (vault, _) = test.address_finder.find_vault_v0_address(1);
    test.mint_to(&vault, BOB_AMOUNT).unwrap();
    let result = test.claim(&bob, &bob_entry);
    assert_eq!(
        custom_error_code(&result),
        Some(program_error(ErrorCode::InsufficientVaultBalance))
    );
    assert!(test.claim_record(1, &bob.pubkey()).is_none());
    assert_eq!(test.claimant_balance(&bob.pubkey()), 0);

    let result = test.deposit(1, 1_000);
    assert_eq!(
        custom_error_code(&result),
        Some(program_error(ErrorCode::PoolDrained))
    );
    let result = test.set_merkle_root(1, proofs.root_bytes().unwrap());
    assert_eq!(
        custom_error_code(&result),
        Some(program_error(ErrorCode::PoolDrained))
    );
}

#[test]
fn test_withdraw_v0_empty_vault() {
    let mut test = SvmFixture::new().unwrap();
    let alice = test.funded_claimant();
    let proofs = build_proof_artifact(1, &[(alice.pubkey(), ALICE_AMOUNT)]);
    test.initialize_pool(1, proofs.root_bytes().unwrap(), 0)
        .unwrap();

    test.withdraw(1).expect("withdraw of an empty vault should succeed");

    assert_eq!(test.pool(1).unwrap().status, PoolStatus::Drained);
    assert_eq!(test.admin_balance(), TEST_ADMIN_SUPPLY);
}
