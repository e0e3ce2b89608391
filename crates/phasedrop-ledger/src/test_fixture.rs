use phasedrop_merkle::{create_claim_tree, ClaimEntry, ProofArtifact};
use phasedrop_sdk::{
    build_deposit_tx, build_initialize_pool_tx, build_set_merkle_root_tx, build_withdraw_tx,
    plan_phase_lookup_table, AddressFinder, ClaimAssembler, ClaimAssemblerConfig, ClaimClient,
    ClaimError, PoolCreationArtifact, PoolV0, SdkError,
};
use solana_sdk::hash::hashv;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{Ledger, LedgerError, LedgerResult};

pub const TEST_MINT_DECIMALS: u8 = 9;
/// 10M tokens at 9 decimals.
pub const TEST_ADMIN_SUPPLY: u64 = 10_000_000 * 1_000_000_000;

/// Stable address for a named test participant.
pub fn deterministic_pubkey(name: &str) -> Pubkey {
    Pubkey::new_from_array(hashv(&[b"phasedrop-testing", name.as_bytes()]).to_bytes())
}

/// Three recipients: 100, 250.5 and 1000 tokens.
pub fn sample_allocations() -> Vec<(Pubkey, u64)> {
    vec![
        (deterministic_pubkey("alice"), 100_000_000_000),
        (deterministic_pubkey("bob"), 250_500_000_000),
        (deterministic_pubkey("carol"), 1_000_000_000_000),
    ]
}

pub fn total_allocation(allocations: &[(Pubkey, u64)]) -> u64 {
    allocations.iter().map(|(_, amount)| amount).sum()
}

struct PhaseSetup {
    proofs: ProofArtifact,
    pool: PoolCreationArtifact,
}

/// A ledger with one funded admin and mint, plus helpers that drive each
/// admin operation through the same transactions an operator would send.
pub struct TestFixture {
    pub ledger: Arc<Ledger>,
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub address_finder: AddressFinder,

    phases: BTreeMap<u8, PhaseSetup>,
}

impl TestFixture {
    pub fn new() -> LedgerResult<Self> {
        let ledger = Arc::new(Ledger::new(phasedrop::ID));
        let admin = deterministic_pubkey("admin");
        let mint = deterministic_pubkey("mint");

        ledger.create_mint(&mint, TEST_MINT_DECIMALS)?;
        ledger.mint_to(&mint, &admin, TEST_ADMIN_SUPPLY)?;

        Ok(Self {
            ledger,
            admin,
            mint,
            address_finder: AddressFinder::new(phasedrop::ID, mint),
            phases: BTreeMap::new(),
        })
    }

    pub fn admin_token_account(&self) -> Pubkey {
        self.address_finder.find_token_account(&self.admin)
    }

    pub fn advance_slot_by(&self, slots: u64) -> u64 {
        self.ledger.advance_slot_by(slots)
    }

    pub fn send_transaction(&self, tx: &Transaction) -> LedgerResult<()> {
        self.ledger.process_transaction(tx)
    }

    /// Publish a phase and wait one slot so its lookup table is usable.
    pub fn create_phase(
        &mut self,
        phase: u8,
        allocations: &[(Pubkey, u64)],
        deposit: u64,
    ) -> LedgerResult<PoolCreationArtifact> {
        let artifact = self.create_phase_unsettled(phase, allocations, deposit)?;
        self.advance_slot_by(1);
        Ok(artifact)
    }

    /// Publish a phase without advancing the slot: the lookup table exists
    /// but is not yet visible to claims.
    pub fn create_phase_unsettled(
        &mut self,
        phase: u8,
        allocations: &[(Pubkey, u64)],
        deposit: u64,
    ) -> LedgerResult<PoolCreationArtifact> {
        let proofs = build_proofs(phase, allocations)?;
        let root = proofs.root_bytes().map_err(ClaimError::from)?;

        let tx = build_initialize_pool_tx(&self.address_finder, &self.admin, phase, root, deposit)
            .map_err(sdk_error)?;
        self.send_transaction(&tx)?;

        let plan = plan_phase_lookup_table(
            &self.address_finder,
            phase,
            &self.admin,
            &self.admin,
            self.ledger.current_slot(),
        );
        let table = self.ledger.apply_lookup_table_plan(&plan, &self.admin)?;

        let pool = PoolCreationArtifact::new(phase, &self.mint, &table, deposit, None);
        self.phases.insert(
            phase,
            PhaseSetup {
                proofs,
                pool: pool.clone(),
            },
        );

        Ok(pool)
    }

    /// Publish a new allocation set for an existing phase.
    pub fn rotate_root(&mut self, phase: u8, allocations: &[(Pubkey, u64)]) -> LedgerResult<()> {
        let proofs = build_proofs(phase, allocations)?;
        let root = proofs.root_bytes().map_err(ClaimError::from)?;

        let tx = build_set_merkle_root_tx(&self.address_finder, &self.admin, phase, root)
            .map_err(sdk_error)?;
        self.send_transaction(&tx)?;

        if let Some(setup) = self.phases.get_mut(&phase) {
            setup.proofs = proofs;
        }
        Ok(())
    }

    pub fn deposit(&self, phase: u8, amount: u64) -> LedgerResult<()> {
        let tx =
            build_deposit_tx(&self.address_finder, &self.admin, phase, amount).map_err(sdk_error)?;
        self.send_transaction(&tx)
    }

    pub fn withdraw(&self, phase: u8) -> LedgerResult<()> {
        let tx = build_withdraw_tx(&self.address_finder, &self.admin, phase).map_err(sdk_error)?;
        self.send_transaction(&tx)
    }

    /// A recipient-side client that knows every phase created so far.
    pub fn client(&self) -> ClaimClient<Arc<Ledger>> {
        let assembler =
            ClaimAssembler::new(self.address_finder.clone(), ClaimAssemblerConfig::default());
        let mut client = ClaimClient::new(self.ledger.clone(), assembler);
        for setup in self.phases.values() {
            if let Ok(table) = setup.pool.lookup_table() {
                client.register_lookup_table(setup.pool.phase, table);
            }
        }
        client
    }

    pub fn proof_artifact(&self, phase: u8) -> Option<&ProofArtifact> {
        self.phases.get(&phase).map(|setup| &setup.proofs)
    }

    pub fn pool_artifact(&self, phase: u8) -> Option<&PoolCreationArtifact> {
        self.phases.get(&phase).map(|setup| &setup.pool)
    }

    /// The claimant's entry from the phase's current proof artifact.
    pub fn entry(&self, phase: u8, claimant: &Pubkey) -> LedgerResult<ClaimEntry> {
        let setup = self
            .phases
            .get(&phase)
            .ok_or(LedgerError::InvalidPhase(phase))?;
        Ok(setup.proofs.entry(claimant).map_err(ClaimError::from)?)
    }

    pub fn pool(&self, phase: u8) -> Option<PoolV0> {
        let (address, _) = self.address_finder.find_pool_v0_address(phase);
        self.ledger.pool(&address)
    }

    pub fn vault_balance(&self, phase: u8) -> u64 {
        let (vault, _) = self.address_finder.find_vault_v0_address(phase);
        self.ledger.token_balance(&vault)
    }

    pub fn claimant_balance(&self, claimant: &Pubkey) -> u64 {
        self.ledger
            .token_balance(&self.address_finder.find_token_account(claimant))
    }

    pub fn is_claimed(&self, phase: u8, claimant: &Pubkey) -> bool {
        let (record, _) = self
            .address_finder
            .find_claim_record_v0_address(phase, claimant);
        self.ledger.claim_record(&record).is_some()
    }

    pub fn phases(&self) -> impl Iterator<Item = u8> + '_ {
        self.phases.keys().copied()
    }
}

fn build_proofs(phase: u8, allocations: &[(Pubkey, u64)]) -> LedgerResult<ProofArtifact> {
    let tree = create_claim_tree(phase, allocations).map_err(ClaimError::from)?;
    let proofs = ProofArtifact::from_tree(&tree);
    proofs.self_check().map_err(ClaimError::from)?;
    Ok(proofs)
}

fn sdk_error(error: SdkError) -> LedgerError {
    match error {
        SdkError::InvalidPhase(phase) => LedgerError::InvalidPhase(phase),
        other => LedgerError::InvalidInstructionData(other.to_string()),
    }
}
