use anchor_lang::{AnchorDeserialize, Discriminator};
use chrono::Utc;
use phasedrop::instruction as ix_data;
use phasedrop::{verify_proof, ClaimLeaf, ClaimRecordV0, PoolStatus, PoolV0, MIN_PHASE};
use phasedrop_sdk::{
    check_derived, find_lookup_table_address, AddressFinder, ClaimError, ClaimReceipt,
    ClaimResult, ClaimSubmitter, LookupTablePlan,
};
#[allow(deprecated)]
use solana_sdk::compute_budget::ID as COMPUTE_BUDGET_PROGRAM_ID;
use solana_sdk::hash::{hashv, Hash};
use solana_sdk::message::{v0, AddressLookupTableAccount, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::{LedgerError, LedgerResult, LookupTableState};

/// An SPL token account reduced to what the pool machine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBalance {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

#[derive(Clone, Default)]
struct LedgerState {
    slot: u64,
    mints: HashMap<Pubkey, u8>,
    token_accounts: HashMap<Pubkey, TokenBalance>,
    pools: HashMap<Pubkey, PoolV0>,
    claim_records: HashMap<Pubkey, ClaimRecordV0>,
    lookup_tables: HashMap<Pubkey, LookupTableState>,
}

#[derive(Clone, Copy)]
struct AccountInput {
    key: Pubkey,
    is_signer: bool,
}

/// In-memory execution environment for the phasedrop program.
///
/// Admin transactions and claim messages carry the same instruction bytes the
/// on-chain program receives. Every submission runs under one lock, so the
/// checks and effects of a transaction are indivisible and two submissions
/// touching the same claim record are serialized.
///
/// Signatures are not verified: the first `num_required_signatures` keys of a
/// message are treated as having signed.
pub struct Ledger {
    program_id: Pubkey,
    state: Mutex<LedgerState>,
}

impl Ledger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            state: Mutex::new(LedgerState {
                slot: 1,
                ..Default::default()
            }),
        }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current_slot(&self) -> u64 {
        self.lock().slot
    }

    pub fn advance_slot_by(&self, slots: u64) -> u64 {
        let mut state = self.lock();
        state.slot = state.slot.saturating_add(slots);
        state.slot
    }

    pub fn pool(&self, address: &Pubkey) -> Option<PoolV0> {
        self.lock().pools.get(address).cloned()
    }

    pub fn claim_record(&self, address: &Pubkey) -> Option<ClaimRecordV0> {
        self.lock().claim_records.get(address).cloned()
    }

    pub fn token_account(&self, address: &Pubkey) -> Option<TokenBalance> {
        self.lock().token_accounts.get(address).copied()
    }

    pub fn token_balance(&self, address: &Pubkey) -> u64 {
        self.token_account(address)
            .map(|account| account.amount)
            .unwrap_or(0)
    }

    pub fn claim_record_count(&self) -> usize {
        self.lock().claim_records.len()
    }

    pub fn create_mint(&self, mint: &Pubkey, decimals: u8) -> LedgerResult<()> {
        let mut state = self.lock();
        if state.mints.contains_key(mint) {
            return Err(LedgerError::MintExists(*mint));
        }
        state.mints.insert(*mint, decimals);
        Ok(())
    }

    /// Mint `amount` into `owner`'s associated token account, creating it if needed.
    pub fn mint_to(&self, mint: &Pubkey, owner: &Pubkey, amount: u64) -> LedgerResult<Pubkey> {
        let mut state = self.lock();
        if !state.mints.contains_key(mint) {
            return Err(LedgerError::MintNotFound(*mint));
        }

        let address = AddressFinder::new(self.program_id, *mint).find_token_account(owner);
        let account = state.token_accounts.entry(address).or_insert(TokenBalance {
            mint: *mint,
            owner: *owner,
            amount: 0,
        });
        account.amount = account
            .amount
            .checked_add(amount)
            .ok_or(LedgerError::NumericOverflow)?;

        Ok(address)
    }

    pub fn create_lookup_table(&self, authority: &Pubkey, recent_slot: u64) -> LedgerResult<Pubkey> {
        let mut state = self.lock();
        let address = find_lookup_table_address(authority, recent_slot);
        if state.lookup_tables.contains_key(&address) {
            return Err(LedgerError::LookupTableExists(address));
        }

        let slot = state.slot;
        state
            .lookup_tables
            .insert(address, LookupTableState::new(*authority, slot));

        tracing::debug!(table = %address, slot, "lookup table created");
        Ok(address)
    }

    pub fn extend_lookup_table(
        &self,
        table: &Pubkey,
        authority: &Pubkey,
        addresses: &[Pubkey],
    ) -> LedgerResult<()> {
        let mut state = self.lock();
        let slot = state.slot;
        let entry = state
            .lookup_tables
            .get_mut(table)
            .ok_or(LedgerError::LookupTableNotFound(*table))?;
        if entry.authority != *authority {
            return Err(LedgerError::LookupTableAuthorityMismatch(*table));
        }

        entry.extend(addresses, slot);

        tracing::debug!(
            table = %table,
            added = addresses.len(),
            total = entry.len(),
            slot,
            "lookup table extended"
        );
        Ok(())
    }

    /// Create and populate a phase's table as planned. The table becomes usable
    /// once the ledger has advanced past the current slot.
    pub fn apply_lookup_table_plan(
        &self,
        plan: &LookupTablePlan,
        authority: &Pubkey,
    ) -> LedgerResult<Pubkey> {
        let table = self.create_lookup_table(authority, plan.recent_slot)?;
        self.extend_lookup_table(&table, authority, &plan.addresses)?;

        tracing::info!(phase = plan.phase, table = %table, "lookup table registered");
        Ok(table)
    }

    /// Execute an admin transaction. Either every instruction applies or none do.
    pub fn process_transaction(&self, tx: &Transaction) -> LedgerResult<()> {
        let message = &tx.message;
        let mut state = self.lock();
        let mut next = state.clone();

        for ix in &message.instructions {
            let program_id = *message
                .account_keys
                .get(ix.program_id_index as usize)
                .ok_or_else(|| LedgerError::InvalidInstructionData("bad program index".into()))?;
            if program_id != self.program_id {
                return Err(LedgerError::UnsupportedInstruction(program_id));
            }

            let accounts = ix
                .accounts
                .iter()
                .map(|&index| {
                    let index = index as usize;
                    message.account_keys.get(index).map(|key| AccountInput {
                        key: *key,
                        is_signer: message.is_signer(index),
                    })
                })
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| LedgerError::InvalidInstructionData("bad account index".into()))?;

            next.process_admin_instruction(self.program_id, &accounts, &ix.data)?;
        }

        *state = next;
        Ok(())
    }
}

impl ClaimSubmitter for Ledger {
    fn latest_blockhash(&self) -> Hash {
        let slot = self.current_slot();
        hashv(&[b"phasedrop-ledger", &slot.to_le_bytes()])
    }

    fn lookup_table(&self, address: &Pubkey) -> Option<AddressLookupTableAccount> {
        let state = self.lock();
        state
            .lookup_tables
            .get(address)
            .and_then(|table| table.visible_at(*address, state.slot))
    }

    fn account_exists(&self, address: &Pubkey) -> bool {
        let state = self.lock();
        state.claim_records.contains_key(address)
            || state.pools.contains_key(address)
            || state.token_accounts.contains_key(address)
            || state.lookup_tables.contains_key(address)
            || state.mints.contains_key(address)
    }

    fn submit(&self, message: VersionedMessage) -> ClaimResult<ClaimReceipt> {
        let VersionedMessage::V0(message) = message else {
            return Err(ClaimError::MalformedInput(
                "claims must be compiled as v0 messages".to_string(),
            ));
        };

        let mut state = self.lock();
        let result = state.execute_claim_message(self.program_id, &message);

        if let Err(error) = &result {
            tracing::debug!(%error, slot = state.slot, "claim message rejected");
        }
        result
    }
}

fn decode<T: AnchorDeserialize + Discriminator>(data: &[u8]) -> Option<T> {
    let body = data.strip_prefix(T::DISCRIMINATOR)?;
    T::try_from_slice(body).ok()
}

fn derived(account: &'static str, expected: Pubkey, actual: Pubkey) -> LedgerResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(LedgerError::DerivationMismatch {
            account,
            expected,
            actual,
        })
    }
}

fn expect_accounts(accounts: &[AccountInput], expected: usize) -> LedgerResult<()> {
    if accounts.len() != expected {
        return Err(LedgerError::AccountCount {
            expected,
            actual: accounts.len(),
        });
    }
    Ok(())
}

fn signer(account: &AccountInput) -> LedgerResult<Pubkey> {
    if !account.is_signer {
        return Err(LedgerError::MissingSigner(account.key));
    }
    Ok(account.key)
}

impl LedgerState {
    fn process_admin_instruction(
        &mut self,
        program_id: Pubkey,
        accounts: &[AccountInput],
        data: &[u8],
    ) -> LedgerResult<()> {
        if let Some(args) = decode::<ix_data::InitializePoolV0>(data) {
            return self.initialize_pool(program_id, accounts, args);
        }
        if let Some(args) = decode::<ix_data::SetMerkleRootV0>(data) {
            return self.set_merkle_root(program_id, accounts, args);
        }
        if let Some(args) = decode::<ix_data::DepositV0>(data) {
            return self.deposit(program_id, accounts, args);
        }
        if let Some(args) = decode::<ix_data::WithdrawV0>(data) {
            return self.withdraw(program_id, accounts, args);
        }
        Err(LedgerError::InvalidInstructionData(
            "not an admin instruction".to_string(),
        ))
    }

    fn initialize_pool(
        &mut self,
        program_id: Pubkey,
        accounts: &[AccountInput],
        args: ix_data::InitializePoolV0,
    ) -> LedgerResult<()> {
        expect_accounts(accounts, 7)?;
        let admin = signer(&accounts[0])?;
        let mint = accounts[1].key;

        if args.phase < MIN_PHASE {
            return Err(LedgerError::InvalidPhase(args.phase));
        }
        if !self.mints.contains_key(&mint) {
            return Err(LedgerError::MintNotFound(mint));
        }

        let finder = AddressFinder::new(program_id, mint);
        let (pool, bump) = finder.find_pool_v0_address(args.phase);
        let (vault, vault_bump) = finder.find_vault_v0_address(args.phase);
        derived("pool", pool, accounts[2].key)?;
        derived("vault", vault, accounts[3].key)?;
        derived("token program", finder.token_program_id, accounts[5].key)?;
        derived("system program", finder.system_program_id, accounts[6].key)?;

        if self.pools.contains_key(&pool) {
            return Err(LedgerError::PoolAlreadyExists(pool));
        }

        let admin_token_account = accounts[4].key;
        self.check_token_account(&admin_token_account, &admin, &mint)?;

        self.token_accounts.insert(
            vault,
            TokenBalance {
                mint,
                owner: pool,
                amount: 0,
            },
        );
        if args.initial_deposit > 0 {
            self.transfer(&admin_token_account, &vault, args.initial_deposit)?;
        }

        self.pools.insert(
            pool,
            PoolV0 {
                admin,
                mint,
                vault,
                merkle_root: args.merkle_root,
                phase: args.phase,
                root_version: 0,
                status: PoolStatus::Active,
                bump,
                vault_bump,
            },
        );

        tracing::info!(
            phase = args.phase,
            pool = %pool,
            vault = %vault,
            initial_deposit = args.initial_deposit,
            "pool created"
        );
        Ok(())
    }

    fn set_merkle_root(
        &mut self,
        program_id: Pubkey,
        accounts: &[AccountInput],
        args: ix_data::SetMerkleRootV0,
    ) -> LedgerResult<()> {
        expect_accounts(accounts, 3)?;
        let admin = signer(&accounts[0])?;
        let (pool_address, mut pool) =
            self.admin_pool(program_id, &admin, accounts[1].key, args.phase, accounts[2].key)?;

        if pool.status != PoolStatus::Active {
            return Err(LedgerError::PoolDrained);
        }

        pool.merkle_root = args.merkle_root;
        pool.root_version = pool
            .root_version
            .checked_add(1)
            .ok_or(LedgerError::NumericOverflow)?;

        tracing::info!(
            phase = args.phase,
            pool = %pool_address,
            root_version = pool.root_version,
            "root rotated"
        );
        self.pools.insert(pool_address, pool);
        Ok(())
    }

    fn deposit(
        &mut self,
        program_id: Pubkey,
        accounts: &[AccountInput],
        args: ix_data::DepositV0,
    ) -> LedgerResult<()> {
        expect_accounts(accounts, 6)?;
        let admin = signer(&accounts[0])?;
        let mint = accounts[1].key;
        let (_, pool) = self.admin_pool(program_id, &admin, mint, args.phase, accounts[2].key)?;

        if pool.status != PoolStatus::Active {
            return Err(LedgerError::PoolDrained);
        }
        if args.amount == 0 {
            return Err(LedgerError::InvalidDepositAmount);
        }
        derived("vault", pool.vault, accounts[3].key)?;
        derived(
            "token program",
            AddressFinder::new(program_id, mint).token_program_id,
            accounts[5].key,
        )?;

        let admin_token_account = accounts[4].key;
        self.check_token_account(&admin_token_account, &admin, &mint)?;
        self.transfer(&admin_token_account, &pool.vault, args.amount)?;

        tracing::info!(phase = args.phase, amount = args.amount, "deposit");
        Ok(())
    }

    fn withdraw(
        &mut self,
        program_id: Pubkey,
        accounts: &[AccountInput],
        args: ix_data::WithdrawV0,
    ) -> LedgerResult<()> {
        expect_accounts(accounts, 6)?;
        let admin = signer(&accounts[0])?;
        let mint = accounts[1].key;
        let (pool_address, mut pool) =
            self.admin_pool(program_id, &admin, mint, args.phase, accounts[2].key)?;

        derived("vault", pool.vault, accounts[3].key)?;
        derived(
            "token program",
            AddressFinder::new(program_id, mint).token_program_id,
            accounts[5].key,
        )?;

        let destination = accounts[4].key;
        self.check_token_account(&destination, &admin, &mint)?;

        let residual = self
            .token_accounts
            .get(&pool.vault)
            .map(|account| account.amount)
            .unwrap_or(0);
        if residual > 0 {
            self.transfer(&pool.vault, &destination, residual)?;
        }

        pool.status = PoolStatus::Drained;
        self.pools.insert(pool_address, pool);

        tracing::info!(phase = args.phase, pool = %pool_address, residual, "pool drained");
        Ok(())
    }

    /// Load a pool for an admin instruction, applying the same account
    /// constraints the program declares.
    fn admin_pool(
        &self,
        program_id: Pubkey,
        admin: &Pubkey,
        mint: Pubkey,
        phase: u8,
        supplied_pool: Pubkey,
    ) -> LedgerResult<(Pubkey, PoolV0)> {
        let (pool_address, _) = AddressFinder::new(program_id, mint).find_pool_v0_address(phase);
        derived("pool", pool_address, supplied_pool)?;

        let pool = self
            .pools
            .get(&pool_address)
            .cloned()
            .ok_or(LedgerError::PoolNotFound(pool_address))?;
        if pool.admin != *admin {
            return Err(LedgerError::PoolAdminMismatch);
        }
        if pool.mint != mint {
            return Err(LedgerError::MintMismatch);
        }

        Ok((pool_address, pool))
    }

    fn check_token_account(&self, address: &Pubkey, owner: &Pubkey, mint: &Pubkey) -> LedgerResult<()> {
        let account = self
            .token_accounts
            .get(address)
            .ok_or(LedgerError::TokenAccountNotFound(*address))?;
        if account.owner != *owner {
            return Err(LedgerError::TokenAccountOwnerMismatch);
        }
        if account.mint != *mint {
            return Err(LedgerError::MintMismatch);
        }
        Ok(())
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> LedgerResult<()> {
        let available = self
            .token_accounts
            .get(from)
            .ok_or(LedgerError::TokenAccountNotFound(*from))?
            .amount;
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                available,
                requested: amount,
            });
        }
        let credited = self
            .token_accounts
            .get(to)
            .ok_or(LedgerError::TokenAccountNotFound(*to))?
            .amount
            .checked_add(amount)
            .ok_or(LedgerError::NumericOverflow)?;

        if let Some(account) = self.token_accounts.get_mut(from) {
            account.amount = available - amount;
        }
        if let Some(account) = self.token_accounts.get_mut(to) {
            account.amount = credited;
        }
        Ok(())
    }

    fn execute_claim_message(
        &mut self,
        program_id: Pubkey,
        message: &v0::Message,
    ) -> ClaimResult<ClaimReceipt> {
        let malformed = |reason: &str| ClaimError::MalformedInput(reason.to_string());

        let fee_payer = *message
            .account_keys
            .first()
            .ok_or_else(|| malformed("message has no fee payer"))?;

        // Program ids are always static keys, so the claim can be located
        // before any lookup table is resolved.
        let mut claims = Vec::new();
        for ix in &message.instructions {
            let invoked = *message
                .account_keys
                .get(ix.program_id_index as usize)
                .ok_or_else(|| malformed("program id must be a static key"))?;

            if invoked == COMPUTE_BUDGET_PROGRAM_ID {
                continue;
            }
            if invoked != program_id {
                return Err(ClaimError::MalformedInput(format!(
                    "unexpected program {invoked} in claim message"
                )));
            }

            let args = decode::<ix_data::ClaimTokensV0>(&ix.data)
                .ok_or_else(|| malformed("instruction is not a claim"))?;
            claims.push((ix, args));
        }

        let (ix, args) = match claims.len() {
            1 => claims.remove(0),
            0 => return Err(malformed("message contains no claim instruction")),
            _ => return Err(malformed("one claim per transaction")),
        };

        let keys = self.resolve_keys(message, args.phase)?;
        let accounts = ix
            .accounts
            .iter()
            .map(|&index| keys.get(index as usize).copied())
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| malformed("account index out of range"))?;

        self.claim(program_id, fee_payer, &accounts, args)
    }

    /// Full account list of a v0 message: static keys, then loaded writable
    /// addresses, then loaded readonly addresses.
    fn resolve_keys(&self, message: &v0::Message, phase: u8) -> ClaimResult<Vec<Pubkey>> {
        let mut writable = Vec::new();
        let mut readonly = Vec::new();

        for lookup in &message.address_table_lookups {
            let table = self
                .lookup_tables
                .get(&lookup.account_key)
                .and_then(|table| table.visible_at(lookup.account_key, self.slot))
                .ok_or_else(|| ClaimError::LookupTableUnavailable {
                    phase,
                    reason: format!("table {} is not visible", lookup.account_key),
                })?;

            for (indexes, out) in [
                (&lookup.writable_indexes, &mut writable),
                (&lookup.readonly_indexes, &mut readonly),
            ] {
                for index in indexes {
                    let address = table.addresses.get(*index as usize).ok_or_else(|| {
                        ClaimError::LookupTableUnavailable {
                            phase,
                            reason: format!(
                                "index {index} not yet visible in table {}",
                                lookup.account_key
                            ),
                        }
                    })?;
                    out.push(*address);
                }
            }
        }

        let mut keys = message.account_keys.clone();
        keys.extend(writable);
        keys.extend(readonly);
        Ok(keys)
    }

    /// The claim state machine. All checks run before the first write, and the
    /// caller holds the ledger lock for the whole call.
    fn claim(
        &mut self,
        program_id: Pubkey,
        signer: Pubkey,
        accounts: &[Pubkey],
        args: ix_data::ClaimTokensV0,
    ) -> ClaimResult<ClaimReceipt> {
        let ix_data::ClaimTokensV0 {
            phase,
            amount,
            merkle_proof,
        } = args;

        if phase < MIN_PHASE {
            return Err(ClaimError::MalformedInput(format!("invalid phase {phase}")));
        }

        let [claimant, pool, mint, vault, claimant_token_account, claim_record, token_program, associated_token_program, system_program, instructions_sysvar] =
            accounts
        else {
            return Err(ClaimError::MalformedInput(format!(
                "claim expects 10 accounts, got {}",
                accounts.len()
            )));
        };

        if *claimant != signer {
            return Err(ClaimError::MalformedInput(
                "claimant must sign the claim".to_string(),
            ));
        }

        let finder = AddressFinder::new(program_id, *mint);
        finder.check_pool_address(phase, pool)?;
        finder.check_vault_address(phase, vault)?;
        finder.check_claim_record_address(phase, claimant, claim_record)?;
        finder.check_token_account(claimant, claimant_token_account)?;
        check_derived("token program", finder.token_program_id, *token_program)?;
        check_derived(
            "associated token program",
            finder.associated_token_program_id,
            *associated_token_program,
        )?;
        check_derived("system program", finder.system_program_id, *system_program)?;
        check_derived(
            "instructions sysvar",
            finder.instructions_sysvar_id,
            *instructions_sysvar,
        )?;

        let pool_record = self
            .pools
            .get(pool)
            .ok_or(ClaimError::PoolNotFound { phase })?;
        check_derived("vault", pool_record.vault, *vault)?;
        let merkle_root = pool_record.merkle_root;

        // Drained is terminal: later transfers into the vault do not reopen it
        if pool_record.status != PoolStatus::Active {
            return Err(ClaimError::InsufficientVaultBalance {
                phase,
                available: self.token_accounts.get(vault).map_or(0, |account| account.amount),
                requested: amount,
            });
        }

        // Occupied claim record address: the record's existence is the flag
        if self.claim_records.contains_key(claim_record) {
            return Err(ClaimError::AlreadyClaimed {
                phase,
                claimant: *claimant,
            });
        }

        let leaf = ClaimLeaf::new(phase, *claimant, amount);
        if !verify_proof(&merkle_proof, &merkle_root, &leaf.to_hash()) {
            return Err(ClaimError::ProofInvalid { phase });
        }

        let available = self
            .token_accounts
            .get(vault)
            .map(|account| account.amount)
            .unwrap_or(0);
        if available < amount {
            return Err(ClaimError::InsufficientVaultBalance {
                phase,
                available,
                requested: amount,
            });
        }

        let credited = self
            .token_accounts
            .get(claimant_token_account)
            .map(|account| account.amount)
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or_else(|| ClaimError::MalformedInput("recipient balance overflow".to_string()))?;

        // Commit
        if let Some(account) = self.token_accounts.get_mut(vault) {
            account.amount = available - amount;
        }
        self.token_accounts.insert(
            *claimant_token_account,
            TokenBalance {
                mint: *mint,
                owner: *claimant,
                amount: credited,
            },
        );
        let (_, bump) = finder.find_claim_record_v0_address(phase, claimant);
        self.claim_records.insert(
            *claim_record,
            ClaimRecordV0 {
                claimant: *claimant,
                mint: *mint,
                phase,
                amount,
                claimed_at_timestamp: Utc::now().timestamp(),
                bump,
            },
        );

        tracing::info!(phase, claimant = %claimant, amount, slot = self.slot, "claim committed");

        Ok(ClaimReceipt {
            phase,
            claimant: *claimant,
            amount,
            claim_record: *claim_record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::instruction::Instruction;
    use solana_sdk::message::Message;

    #[test]
    fn test_blockhash_changes_with_slot() {
        let ledger = Ledger::new(phasedrop::ID);
        let first = ledger.latest_blockhash();

        assert_eq!(ledger.advance_slot_by(3), 4);
        assert_ne!(ledger.latest_blockhash(), first);
    }

    #[test]
    fn test_admin_transaction_rejects_foreign_program() {
        let ledger = Ledger::new(phasedrop::ID);
        let payer = Pubkey::new_unique();
        let foreign = Pubkey::new_unique();
        let ix = Instruction::new_with_bytes(foreign, &[1, 2, 3], vec![]);
        let tx = Transaction::new_unsigned(Message::new(&[ix], Some(&payer)));

        assert_eq!(
            ledger.process_transaction(&tx),
            Err(LedgerError::UnsupportedInstruction(foreign))
        );
    }

    #[test]
    fn test_admin_transaction_rejects_claim_data() {
        let ledger = Ledger::new(phasedrop::ID);
        let payer = Pubkey::new_unique();
        let data = anchor_lang::InstructionData::data(&ix_data::ClaimTokensV0 {
            phase: 1,
            amount: 1,
            merkle_proof: vec![],
        });
        let ix = Instruction::new_with_bytes(phasedrop::ID, &data, vec![]);
        let tx = Transaction::new_unsigned(Message::new(&[ix], Some(&payer)));

        assert!(matches!(
            ledger.process_transaction(&tx),
            Err(LedgerError::InvalidInstructionData(_))
        ));
    }

    #[test]
    fn test_mint_to_requires_mint() {
        let ledger = Ledger::new(phasedrop::ID);
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        assert_eq!(
            ledger.mint_to(&mint, &owner, 5),
            Err(LedgerError::MintNotFound(mint))
        );

        ledger.create_mint(&mint, 6).unwrap();
        let account = ledger.mint_to(&mint, &owner, 5).unwrap();
        ledger.mint_to(&mint, &owner, 7).unwrap();

        assert_eq!(ledger.token_balance(&account), 12);
        assert_eq!(ledger.token_account(&account).unwrap().owner, owner);
        assert_eq!(ledger.create_mint(&mint, 6), Err(LedgerError::MintExists(mint)));
    }

    #[test]
    fn test_lookup_table_authority_enforced() {
        let ledger = Ledger::new(phasedrop::ID);
        let authority = Pubkey::new_unique();
        let table = ledger.create_lookup_table(&authority, 1).unwrap();

        assert_eq!(
            ledger.extend_lookup_table(&table, &Pubkey::new_unique(), &[Pubkey::new_unique()]),
            Err(LedgerError::LookupTableAuthorityMismatch(table))
        );
        assert_eq!(
            ledger.create_lookup_table(&authority, 1),
            Err(LedgerError::LookupTableExists(table))
        );
    }
}
