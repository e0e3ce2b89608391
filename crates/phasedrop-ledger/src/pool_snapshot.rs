use solana_sdk::pubkey::Pubkey;
use std::collections::{BTreeMap, HashMap};

use crate::TestFixture;

/// Balances and claim state across every phase of a fixture, for
/// before/after comparisons around an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub vault_balances: BTreeMap<u8, u64>,
    pub admin_balance: u64,
    pub claim_records: usize,
    pub root_versions: BTreeMap<u8, u32>,
    pub tracked_claimants: HashMap<Pubkey, u64>,
}

impl PoolSnapshot {
    pub fn capture_all(test: &TestFixture) -> Self {
        let mut vault_balances = BTreeMap::new();
        let mut root_versions = BTreeMap::new();

        for phase in test.phases() {
            vault_balances.insert(phase, test.vault_balance(phase));
            if let Some(pool) = test.pool(phase) {
                root_versions.insert(phase, pool.root_version);
            }
        }

        Self {
            vault_balances,
            admin_balance: test.ledger.token_balance(&test.admin_token_account()),
            claim_records: test.ledger.claim_record_count(),
            root_versions,
            tracked_claimants: HashMap::new(),
        }
    }

    pub fn capture_with_claimants(test: &TestFixture, claimants: &[Pubkey]) -> Self {
        let mut snapshot = Self::capture_all(test);
        for claimant in claimants {
            snapshot
                .tracked_claimants
                .insert(*claimant, test.claimant_balance(claimant));
        }
        snapshot
    }

    pub fn total_vault_balance(&self) -> u64 {
        self.vault_balances.values().sum()
    }

    pub fn claimant_balance(&self, claimant: &Pubkey) -> u64 {
        self.tracked_claimants.get(claimant).copied().unwrap_or(0)
    }
}
