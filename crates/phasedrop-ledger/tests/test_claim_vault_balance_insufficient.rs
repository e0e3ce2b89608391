use phasedrop_ledger::{
    deterministic_pubkey, sample_allocations, total_allocation, LedgerError, PoolSnapshot,
    TestFixture,
};
use phasedrop_sdk::{ClaimError, PoolStatus};

/// An underfunded vault pays claims until it cannot cover the next one,
/// which fails with `InsufficientVaultBalance` and transfers nothing.
#[tokio::test]
async fn test_claim_vault_balance_insufficient() {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();

    // alice (100) + bob (250.5) fit; carol (1000) does not
    let deposit = 400_000_000_000;
    test.create_phase(1, &allocations, deposit).unwrap();
    let client = test.client();

    for name in ["alice", "bob"] {
        let claimant = deterministic_pubkey(name);
        client
            .claim_phase(&test.entry(1, &claimant).unwrap())
            .unwrap();
    }

    let carol = deterministic_pubkey("carol");
    let before = PoolSnapshot::capture_with_claimants(&test, &[carol]);

    let result = client.claim_phase(&test.entry(1, &carol).unwrap());
    assert_eq!(
        result,
        Err(ClaimError::InsufficientVaultBalance {
            phase: 1,
            available: 49_500_000_000,
            requested: 1_000_000_000_000,
        })
    );

    assert_eq!(PoolSnapshot::capture_with_claimants(&test, &[carol]), before);
    assert!(!test.is_claimed(1, &carol));

    // A top-up makes the same claim succeed
    test.deposit(1, 1_000_000_000_000).unwrap();
    client
        .claim_phase(&test.entry(1, &carol).unwrap())
        .expect("claim should succeed after deposit");
    assert_eq!(test.claimant_balance(&carol), 1_000_000_000_000);
}

/// Withdrawing drains the vault back to the admin and marks the pool
/// drained. Later claims see an empty vault and admin funding calls fail.
#[tokio::test]
async fn test_claim_after_withdraw() {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();
    let total = total_allocation(&allocations);
    test.create_phase(1, &allocations, total).unwrap();

    let alice = deterministic_pubkey("alice");
    let client = test.client();
    client.claim_phase(&test.entry(1, &alice).unwrap()).unwrap();

    let before = PoolSnapshot::capture_all(&test);
    test.withdraw(1).unwrap();
    let after = PoolSnapshot::capture_all(&test);

    let residual = total - 100_000_000_000;
    assert_eq!(after.vault_balances[&1], 0);
    assert_eq!(after.admin_balance, before.admin_balance + residual);
    assert_eq!(test.pool(1).unwrap().status, PoolStatus::Drained);

    let bob = deterministic_pubkey("bob");
    assert_eq!(
        client.claim_phase(&test.entry(1, &bob).unwrap()),
        Err(ClaimError::InsufficientVaultBalance {
            phase: 1,
            available: 0,
            requested: 250_500_000_000,
        })
    );

    assert_eq!(test.deposit(1, 1_000), Err(LedgerError::PoolDrained));
    assert_eq!(
        test.rotate_root(1, &allocations),
        Err(LedgerError::PoolDrained)
    );
}

/// A drained pool stays closed, even for an allocation the empty vault
/// could cover.
#[tokio::test]
async fn test_zero_amount_claim_on_drained_pool() {
    let mut test = TestFixture::new().unwrap();
    let alice = deterministic_pubkey("alice");
    let bob = deterministic_pubkey("bob");
    test.create_phase(1, &[(alice, 0), (bob, 50)], 50).unwrap();

    test.withdraw(1).unwrap();
    assert_eq!(test.pool(1).unwrap().status, PoolStatus::Drained);

    let client = test.client();
    assert_eq!(
        client.claim_phase(&test.entry(1, &alice).unwrap()),
        Err(ClaimError::InsufficientVaultBalance {
            phase: 1,
            available: 0,
            requested: 0,
        })
    );
    assert!(!test.is_claimed(1, &alice));
}
