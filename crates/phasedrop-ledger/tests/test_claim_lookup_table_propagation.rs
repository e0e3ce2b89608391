use phasedrop_ledger::{deterministic_pubkey, sample_allocations, total_allocation, TestFixture};
use phasedrop_sdk::{ClaimError, ClaimSubmitter};

/// A lookup table created in the current slot is not yet usable. The claim
/// fails with the retryable `LookupTableUnavailable` and succeeds once the
/// ledger has moved past the creation slot.
#[tokio::test]
async fn test_claim_waits_for_lookup_table_propagation() {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();
    let pool = test
        .create_phase_unsettled(1, &allocations, total_allocation(&allocations))
        .unwrap();

    let table = pool.lookup_table().unwrap();
    assert!(test.ledger.account_exists(&table));
    assert!(test.ledger.lookup_table(&table).is_none());

    let alice = deterministic_pubkey("alice");
    let client = test.client();
    let entry = test.entry(1, &alice).unwrap();

    let error = client.claim_phase(&entry).unwrap_err();
    assert!(matches!(
        error,
        ClaimError::LookupTableUnavailable { phase: 1, .. }
    ));
    assert!(error.is_retryable());
    assert!(!test.is_claimed(1, &alice));

    test.advance_slot_by(1);

    let visible = test.ledger.lookup_table(&table).unwrap();
    assert_eq!(visible.addresses, test.address_finder.lookup_table_addresses(1));

    client
        .claim_phase(&entry)
        .expect("claim should succeed once the table is visible");
    assert_eq!(test.claimant_balance(&alice), 100_000_000_000);
}

/// A table that does not yet hold every shared claim address is treated as
/// unavailable until the remaining entries are added and propagated.
#[tokio::test]
async fn test_claim_rejects_partially_extended_table() {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();
    test.create_phase(1, &allocations, total_allocation(&allocations))
        .unwrap();

    let required = test.address_finder.lookup_table_addresses(1);
    let slot = test.ledger.current_slot();
    let table = test.ledger.create_lookup_table(&test.admin, slot).unwrap();
    test.ledger
        .extend_lookup_table(&table, &test.admin, &required[..3])
        .unwrap();
    test.advance_slot_by(1);

    let mut client = test.client();
    client.register_lookup_table(1, table);

    let bob = deterministic_pubkey("bob");
    let entry = test.entry(1, &bob).unwrap();
    assert!(matches!(
        client.claim_phase(&entry),
        Err(ClaimError::LookupTableUnavailable { phase: 1, .. })
    ));

    test.ledger
        .extend_lookup_table(&table, &test.admin, &required[3..])
        .unwrap();
    // Entries added in this slot are not visible yet
    assert!(matches!(
        client.claim_phase(&entry),
        Err(ClaimError::LookupTableUnavailable { phase: 1, .. })
    ));

    test.advance_slot_by(1);
    client.claim_phase(&entry).unwrap();
    assert!(test.is_claimed(1, &bob));
}

/// A phase the client has no table for cannot be claimed.
#[tokio::test]
async fn test_claim_unknown_phase_table() {
    let mut test = TestFixture::new().unwrap();
    let allocations = sample_allocations();
    test.create_phase(1, &allocations, total_allocation(&allocations))
        .unwrap();

    let mut entry = test.entry(1, &deterministic_pubkey("alice")).unwrap();
    entry.leaf.phase = 9;

    assert!(matches!(
        test.client().claim_phase(&entry),
        Err(ClaimError::LookupTableUnavailable { phase: 9, .. })
    ));
}
