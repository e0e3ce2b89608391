/*!
# Transaction Builders

Admin transactions for managing a phase's pool. Each `build_*_tx` returns an
unsigned legacy transaction with the admin as fee payer; admin instructions
carry no proof and fit comfortably without a lookup table.

No RPC calls are made here; the caller signs with the admin keypair and a
recent blockhash, then sends.

```rust,ignore
let mut tx = build_initialize_pool_tx(&finder, &admin.pubkey(), 1, root, 1_000)?;
tx.sign(&[&admin], recent_blockhash);
```
*/

use crate::{
    build_deposit_v0_ix, build_initialize_pool_v0_ix, build_set_merkle_root_v0_ix,
    build_withdraw_v0_ix, AddressFinder, LookupTablePlan, SdkResult,
};
use solana_sdk::{
    instruction::Instruction, message::Message, pubkey::Pubkey, transaction::Transaction,
};

fn unsigned(instructions: &[Instruction], payer: &Pubkey) -> Transaction {
    Transaction::new_unsigned(Message::new(instructions, Some(payer)))
}

/// Create the pool and vault for `phase`, publish `merkle_root` and optionally
/// fund the vault from the admin's token account.
pub fn build_initialize_pool_tx(
    address_finder: &AddressFinder,
    admin: &Pubkey,
    phase: u8,
    merkle_root: [u8; 32],
    initial_deposit: u64,
) -> SdkResult<Transaction> {
    let (ix, _, _) =
        build_initialize_pool_v0_ix(address_finder, admin, phase, merkle_root, initial_deposit)?;
    Ok(unsigned(&[ix], admin))
}

pub fn build_set_merkle_root_tx(
    address_finder: &AddressFinder,
    admin: &Pubkey,
    phase: u8,
    merkle_root: [u8; 32],
) -> SdkResult<Transaction> {
    let (ix, _, _) = build_set_merkle_root_v0_ix(address_finder, admin, phase, merkle_root)?;
    Ok(unsigned(&[ix], admin))
}

pub fn build_deposit_tx(
    address_finder: &AddressFinder,
    admin: &Pubkey,
    phase: u8,
    amount: u64,
) -> SdkResult<Transaction> {
    let (ix, _, _) = build_deposit_v0_ix(address_finder, admin, phase, amount)?;
    Ok(unsigned(&[ix], admin))
}

pub fn build_withdraw_tx(
    address_finder: &AddressFinder,
    admin: &Pubkey,
    phase: u8,
) -> SdkResult<Transaction> {
    let (ix, _, _) = build_withdraw_v0_ix(address_finder, admin, phase)?;
    Ok(unsigned(&[ix], admin))
}

/// Create and populate the phase's lookup table in one transaction.
pub fn build_lookup_table_tx(plan: &LookupTablePlan, payer: &Pubkey) -> Transaction {
    unsigned(&plan.instructions(), payer)
}
