use phasedrop_ledger::{deterministic_pubkey, PoolSnapshot, TestFixture};
use phasedrop_sdk::ClaimError;

/// Rotating a phase's root invalidates every proof issued against the old
/// root. Recipients still in the new allocation claim with a new proof.
///
/// **Test flow:**
/// 1. Publish phase 1 for alice, bob and carol
/// 2. Rotate to alice, carol and dave
/// 3. Old proofs fail; new proofs succeed; bob has nothing to claim
#[tokio::test]
async fn test_root_rotation_rejects_stale_proofs() {
    let mut test = TestFixture::new().unwrap();
    let alice = deterministic_pubkey("alice");
    let bob = deterministic_pubkey("bob");
    let carol = deterministic_pubkey("carol");
    let dave = deterministic_pubkey("dave");

    let original = vec![(alice, 10), (bob, 20), (carol, 30)];
    let rotated = vec![(alice, 10), (carol, 30), (dave, 40)];

    test.create_phase(1, &original, 100).unwrap();
    let client = test.client();

    let stale_alice = test.entry(1, &alice).unwrap();
    let stale_bob = test.entry(1, &bob).unwrap();

    test.rotate_root(1, &rotated).unwrap();
    let pool = test.pool(1).unwrap();
    assert_eq!(pool.root_version, 1);
    assert_eq!(
        pool.merkle_root,
        test.proof_artifact(1).unwrap().root_bytes().unwrap()
    );

    let before = PoolSnapshot::capture_with_claimants(&test, &[alice, bob]);

    assert_eq!(
        client.claim_phase(&stale_bob),
        Err(ClaimError::ProofInvalid { phase: 1 })
    );
    assert_eq!(
        client.claim_phase(&stale_alice),
        Err(ClaimError::ProofInvalid { phase: 1 })
    );
    assert_eq!(
        PoolSnapshot::capture_with_claimants(&test, &[alice, bob]),
        before
    );

    // Bob is no longer in the published allocation
    assert!(test.entry(1, &bob).is_err());

    let receipt = client
        .claim_phase(&test.entry(1, &alice).unwrap())
        .expect("fresh proof should verify");
    assert_eq!(receipt.amount, 10);

    client.claim_phase(&test.entry(1, &dave).unwrap()).unwrap();
    assert_eq!(test.claimant_balance(&dave), 40);
    assert_eq!(test.vault_balance(1), 100 - 10 - 40);
}

/// Claims made before a rotation stay claimed afterwards.
#[tokio::test]
async fn test_rotation_keeps_existing_claim_records() {
    let mut test = TestFixture::new().unwrap();
    let alice = deterministic_pubkey("alice");
    let carol = deterministic_pubkey("carol");
    let allocations = vec![(alice, 10), (carol, 30)];

    test.create_phase(1, &allocations, 100).unwrap();
    let client = test.client();
    client.claim_phase(&test.entry(1, &alice).unwrap()).unwrap();

    test.rotate_root(1, &[(alice, 15), (carol, 30)]).unwrap();
    test.rotate_root(1, &[(alice, 25), (carol, 30)]).unwrap();
    assert_eq!(test.pool(1).unwrap().root_version, 2);

    assert_eq!(
        client.claim_phase(&test.entry(1, &alice).unwrap()),
        Err(ClaimError::AlreadyClaimed {
            phase: 1,
            claimant: alice,
        })
    );
    assert_eq!(test.claimant_balance(&alice), 10);
}
