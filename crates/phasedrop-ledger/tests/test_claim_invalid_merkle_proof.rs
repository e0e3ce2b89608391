use phasedrop_ledger::{
    deterministic_pubkey, sample_allocations, total_allocation, PoolSnapshot, TestFixture,
};
use phasedrop_merkle::{ClaimEntry, ClaimLeaf};
use phasedrop_sdk::ClaimError;

fn setup() -> TestFixture {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();
    let total = total_allocation(&allocations);
    test.create_phase(1, &allocations, total).unwrap();
    test.create_phase(2, &allocations, total).unwrap();
    test
}

/// Proof failures are `ProofInvalid` and leave every balance untouched.
#[tokio::test]
async fn test_claim_invalid_merkle_proof() {
    let test = setup();
    let client = test.client();
    let alice = deterministic_pubkey("alice");
    let before = PoolSnapshot::capture_with_claimants(&test, &[alice]);

    let entry = test.entry(1, &alice).unwrap();

    let mut tampered = entry.clone();
    tampered.proof[0][0] ^= 0x01;
    assert_eq!(
        client.claim_phase(&tampered),
        Err(ClaimError::ProofInvalid { phase: 1 })
    );

    let mut truncated = entry.clone();
    truncated.proof.pop();
    assert_eq!(
        client.claim_phase(&truncated),
        Err(ClaimError::ProofInvalid { phase: 1 })
    );

    let empty = ClaimEntry {
        leaf: entry.leaf,
        proof: vec![],
    };
    assert_eq!(
        client.claim_phase(&empty),
        Err(ClaimError::ProofInvalid { phase: 1 })
    );

    assert_eq!(
        PoolSnapshot::capture_with_claimants(&test, &[alice]),
        before
    );
    assert!(!test.is_claimed(1, &alice));
}

/// The leaf binds amount and phase: inflating the amount or replaying a
/// proof from another phase fails even though the proof itself is genuine.
#[tokio::test]
async fn test_claim_leaf_fields_are_bound() {
    let test = setup();
    let client = test.client();
    let alice = deterministic_pubkey("alice");
    let bob = deterministic_pubkey("bob");

    let entry = test.entry(1, &alice).unwrap();
    let inflated = ClaimEntry {
        leaf: ClaimLeaf::new(1, alice, 250_500_000_000),
        proof: entry.proof.clone(),
    };
    assert_eq!(
        client.claim_phase(&inflated),
        Err(ClaimError::ProofInvalid { phase: 1 })
    );

    // Phase 2's proof presented for phase 1
    let phase_2 = test.entry(2, &alice).unwrap();
    let replayed = ClaimEntry {
        leaf: ClaimLeaf::new(1, alice, phase_2.leaf.amount),
        proof: phase_2.proof,
    };
    assert_eq!(
        client.claim_phase(&replayed),
        Err(ClaimError::ProofInvalid { phase: 1 })
    );

    // Bob presenting alice's proof for himself
    let stolen = ClaimEntry {
        leaf: ClaimLeaf::new(1, bob, entry.leaf.amount),
        proof: entry.proof.clone(),
    };
    assert_eq!(
        client.claim_phase(&stolen),
        Err(ClaimError::ProofInvalid { phase: 1 })
    );

    client.claim_phase(&entry).unwrap();
    assert_eq!(test.claimant_balance(&alice), 100_000_000_000);
}

/// A deep tree claims within the packet limit thanks to the lookup table.
#[tokio::test]
async fn test_claim_from_large_tree() {
    let mut test = TestFixture::new().unwrap();
    let allocations: Vec<_> = (0..2_000u64)
        .map(|i| (deterministic_pubkey(&format!("holder_{i}")), 1 + i))
        .collect();
    test.create_phase(4, &allocations, total_allocation(&allocations))
        .unwrap();

    let client = test.client();
    let (claimant, amount) = allocations[1_234];
    let entry = test.entry(4, &claimant).unwrap();
    assert!(!entry.proof.is_empty() && entry.proof.len() <= 11);

    let assembled = client.prepare_claim(&entry).unwrap();
    assert!(assembled.transaction_size <= phasedrop_sdk::PACKET_DATA_SIZE);

    let receipt = client.claim_phase(&entry).unwrap();
    assert_eq!(receipt.amount, amount);
}
