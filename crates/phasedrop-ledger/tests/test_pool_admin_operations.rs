use phasedrop_ledger::{
    deterministic_pubkey, sample_allocations, total_allocation, LedgerError, PoolSnapshot,
    TestFixture, TEST_ADMIN_SUPPLY,
};
use phasedrop_sdk::{
    build_deposit_v0_ix, build_set_merkle_root_tx, build_withdraw_tx, PoolStatus,
};
use solana_sdk::message::Message;
use solana_sdk::transaction::Transaction;

/// Creating a pool moves the initial deposit out of the admin's account.
#[tokio::test]
async fn test_initialize_pool_funds_vault() {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();
    let total = total_allocation(&allocations);

    test.create_phase(1, &allocations, total).unwrap();

    let snapshot = PoolSnapshot::capture_all(&test);
    assert_eq!(snapshot.vault_balances[&1], total);
    assert_eq!(snapshot.admin_balance, TEST_ADMIN_SUPPLY - total);
    assert_eq!(snapshot.root_versions[&1], 0);

    let pool = test.pool(1).unwrap();
    assert_eq!(pool.admin, test.admin);
    assert_eq!(pool.mint, test.mint);
    assert_eq!(pool.vault, test.address_finder.find_vault_v0_address(1).0);
    assert_eq!(pool.bump, test.address_finder.find_pool_v0_address(1).1);
}

/// A pool with no initial deposit starts empty and can be funded later.
#[tokio::test]
async fn test_deposit_after_empty_initialize() {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();

    test.create_phase(2, &allocations, 0).unwrap();
    assert_eq!(test.vault_balance(2), 0);

    test.deposit(2, 5_000).unwrap();
    test.deposit(2, 7_000).unwrap();
    assert_eq!(test.vault_balance(2), 12_000);

    assert_eq!(test.deposit(2, 0), Err(LedgerError::InvalidDepositAmount));
    assert_eq!(
        test.deposit(2, TEST_ADMIN_SUPPLY),
        Err(LedgerError::InsufficientFunds {
            available: TEST_ADMIN_SUPPLY - 12_000,
            requested: TEST_ADMIN_SUPPLY,
        })
    );
}

#[tokio::test]
async fn test_initialize_pool_twice() {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();

    test.create_phase(1, &allocations, 10).unwrap();
    let (pool, _) = test.address_finder.find_pool_v0_address(1);

    assert_eq!(
        test.create_phase(1, &allocations, 10),
        Err(LedgerError::PoolAlreadyExists(pool))
    );
    assert_eq!(test.vault_balance(1), 10);
}

/// Only the pool's admin may rotate the root or withdraw.
#[tokio::test]
async fn test_non_admin_cannot_manage_pool() {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();
    test.create_phase(1, &allocations, total_allocation(&allocations))
        .unwrap();

    let mallory = deterministic_pubkey("mallory");
    test.ledger.mint_to(&test.mint, &mallory, 1_000).unwrap();

    let before = PoolSnapshot::capture_all(&test);

    let rotate = build_set_merkle_root_tx(&test.address_finder, &mallory, 1, [9; 32]).unwrap();
    assert_eq!(
        test.send_transaction(&rotate),
        Err(LedgerError::PoolAdminMismatch)
    );

    let withdraw = build_withdraw_tx(&test.address_finder, &mallory, 1).unwrap();
    assert_eq!(
        test.send_transaction(&withdraw),
        Err(LedgerError::PoolAdminMismatch)
    );

    assert_eq!(PoolSnapshot::capture_all(&test), before);
    assert_eq!(test.pool(1).unwrap().status, PoolStatus::Active);
}

/// A transaction applies all of its instructions or none of them.
#[tokio::test]
async fn test_admin_transaction_is_atomic() {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();
    test.create_phase(1, &allocations, 0).unwrap();

    let (first, _, _) = build_deposit_v0_ix(&test.address_finder, &test.admin, 1, 500).unwrap();
    let (second, _, _) = build_deposit_v0_ix(&test.address_finder, &test.admin, 1, 0).unwrap();
    let tx = Transaction::new_unsigned(Message::new(&[first, second], Some(&test.admin)));

    assert_eq!(
        test.send_transaction(&tx),
        Err(LedgerError::InvalidDepositAmount)
    );
    assert_eq!(test.vault_balance(1), 0);
}

/// Withdraw on an empty vault still marks the pool drained, and a second
/// withdraw is harmless.
#[tokio::test]
async fn test_withdraw_empty_vault() {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();
    test.create_phase(1, &allocations, 0).unwrap();

    let admin_before = test.ledger.token_balance(&test.admin_token_account());
    test.withdraw(1).unwrap();
    test.withdraw(1).unwrap();

    assert_eq!(test.pool(1).unwrap().status, PoolStatus::Drained);
    assert_eq!(
        test.ledger.token_balance(&test.admin_token_account()),
        admin_before
    );
}
