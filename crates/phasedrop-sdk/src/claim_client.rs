use phasedrop_merkle::ClaimEntry;
use solana_sdk::hash::Hash;
use solana_sdk::message::{AddressLookupTableAccount, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    AssembledClaim, ClaimAssembler, ClaimError, ClaimResult, PoolCreationArtifact,
};

/// The execution environment a claim is submitted to.
///
/// Implementations must execute each submitted message as one indivisible
/// unit: the claim-record creation and the vault transfer either both
/// happen or neither does.
pub trait ClaimSubmitter {
    fn latest_blockhash(&self) -> Hash;

    /// Resolve a lookup table as currently visible to new transactions.
    /// `None` when the table does not exist or is not yet usable.
    fn lookup_table(&self, address: &Pubkey) -> Option<AddressLookupTableAccount>;

    fn account_exists(&self, address: &Pubkey) -> bool;

    fn submit(&self, message: VersionedMessage) -> ClaimResult<ClaimReceipt>;
}

impl<T: ClaimSubmitter + ?Sized> ClaimSubmitter for Arc<T> {
    fn latest_blockhash(&self) -> Hash {
        (**self).latest_blockhash()
    }

    fn lookup_table(&self, address: &Pubkey) -> Option<AddressLookupTableAccount> {
        (**self).lookup_table(address)
    }

    fn account_exists(&self, address: &Pubkey) -> bool {
        (**self).account_exists(address)
    }

    fn submit(&self, message: VersionedMessage) -> ClaimResult<ClaimReceipt> {
        (**self).submit(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub phase: u8,
    pub claimant: Pubkey,
    pub amount: u64,
    pub claim_record: Pubkey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    NotClaimed,
    Claimed,
}

/// Result of one phase within a multi-phase claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseOutcome {
    pub phase: u8,
    pub result: ClaimResult<ClaimReceipt>,
}

/// Recipient-side claim driver.
///
/// Holds the lookup table address for each phase it knows about (taken from
/// the pool-creation artifacts) and submits one transaction per phase.
pub struct ClaimClient<S> {
    submitter: S,
    assembler: ClaimAssembler,
    lookup_tables: BTreeMap<u8, Pubkey>,
}

impl<S: ClaimSubmitter> ClaimClient<S> {
    pub fn new(submitter: S, assembler: ClaimAssembler) -> Self {
        Self {
            submitter,
            assembler,
            lookup_tables: BTreeMap::new(),
        }
    }

    pub fn register_lookup_table(&mut self, phase: u8, table: Pubkey) {
        self.lookup_tables.insert(phase, table);
    }

    /// Register the phase described by a pool-creation artifact. The artifact's
    /// mint must be the one this client's assembler derives addresses for.
    pub fn register_pool(&mut self, artifact: &PoolCreationArtifact) -> ClaimResult<()> {
        let mint = artifact
            .mint()
            .map_err(|e| ClaimError::MalformedInput(e.to_string()))?;
        let expected = self.assembler.address_finder().mint;
        if mint != expected {
            return Err(ClaimError::DerivationMismatch {
                account: "mint",
                expected,
                actual: mint,
            });
        }

        let table = artifact
            .lookup_table()
            .map_err(|e| ClaimError::MalformedInput(e.to_string()))?;
        self.register_lookup_table(artifact.phase, table);
        Ok(())
    }

    /// Presence of the derived claim record is the claimed flag.
    pub fn claim_status(&self, phase: u8, claimant: &Pubkey) -> ClaimStatus {
        let (claim_record, _) = self
            .assembler
            .address_finder()
            .find_claim_record_v0_address(phase, claimant);

        if self.submitter.account_exists(&claim_record) {
            ClaimStatus::Claimed
        } else {
            ClaimStatus::NotClaimed
        }
    }

    pub fn prepare_claim(&self, entry: &ClaimEntry) -> ClaimResult<AssembledClaim> {
        let phase = entry.leaf.phase;
        let table = self
            .lookup_tables
            .get(&phase)
            .and_then(|address| self.submitter.lookup_table(address));

        self.assembler
            .assemble(entry, table.as_ref(), self.submitter.latest_blockhash())
    }

    pub fn claim_phase(&self, entry: &ClaimEntry) -> ClaimResult<ClaimReceipt> {
        let assembled = self.prepare_claim(entry)?;
        let result = self.submitter.submit(assembled.message);

        match &result {
            Ok(receipt) => tracing::info!(
                phase = receipt.phase,
                claimant = %receipt.claimant,
                amount = receipt.amount,
                "claim committed"
            ),
            Err(error) => tracing::warn!(
                phase = entry.leaf.phase,
                claimant = %entry.leaf.claimant,
                %error,
                "claim rejected"
            ),
        }

        result
    }

    /// Claim every given phase independently. A failure in one phase never
    /// affects another; outcomes are returned in input order.
    pub fn claim_all_phases(&self, entries: &[ClaimEntry]) -> Vec<PhaseOutcome> {
        entries
            .iter()
            .map(|entry| PhaseOutcome {
                phase: entry.leaf.phase,
                result: self.claim_phase(entry),
            })
            .collect()
    }
}
