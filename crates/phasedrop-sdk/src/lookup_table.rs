use solana_sdk::address_lookup_table::instruction::{
    create_lookup_table, derive_lookup_table_address, extend_lookup_table,
};
use solana_sdk::instruction::Instruction;
use solana_sdk::message::AddressLookupTableAccount;
use solana_sdk::pubkey::Pubkey;

use crate::AddressFinder;

/// Setup plan for one phase's lookup table: create it, then register the
/// shared claim accounts. Both instructions fit in one admin transaction.
#[derive(Debug, Clone)]
pub struct LookupTablePlan {
    pub phase: u8,
    pub recent_slot: u64,
    pub table_address: Pubkey,
    pub addresses: Vec<Pubkey>,
    pub create_ix: Instruction,
    pub extend_ix: Instruction,
}

impl LookupTablePlan {
    pub fn instructions(&self) -> Vec<Instruction> {
        vec![self.create_ix.clone(), self.extend_ix.clone()]
    }
}

pub fn plan_phase_lookup_table(
    address_finder: &AddressFinder,
    phase: u8,
    authority: &Pubkey,
    payer: &Pubkey,
    recent_slot: u64,
) -> LookupTablePlan {
    let (create_ix, table_address) = create_lookup_table(*authority, *payer, recent_slot);
    let addresses = address_finder.lookup_table_addresses(phase);
    let extend_ix = extend_lookup_table(table_address, *authority, Some(*payer), addresses.clone());

    tracing::debug!(
        phase,
        table = %table_address,
        addresses = addresses.len(),
        "planned lookup table"
    );

    LookupTablePlan {
        phase,
        recent_slot,
        table_address,
        addresses,
        create_ix,
        extend_ix,
    }
}

/// Address a table created by `authority` at `recent_slot` will occupy.
pub fn find_lookup_table_address(authority: &Pubkey, recent_slot: u64) -> Pubkey {
    derive_lookup_table_address(authority, recent_slot).0
}

/// Addresses in `required` that the table does not (yet) contain.
pub fn missing_addresses(table: &AddressLookupTableAccount, required: &[Pubkey]) -> Vec<Pubkey> {
    required
        .iter()
        .filter(|address| !table.addresses.contains(address))
        .copied()
        .collect()
}
