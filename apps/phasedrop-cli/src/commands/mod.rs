pub mod derive_addresses;
pub mod generate_recipients;
pub mod generate_tree;
pub mod lookup_table_addresses;
pub mod verify_proof;

use phasedrop_sdk::AddressFinder;
use solana_sdk::pubkey::Pubkey;

use crate::error::CliResult;

/// Finder for `mint` under `program_id`, or the deployed program when omitted.
pub(crate) fn address_finder(mint: Pubkey, program_id: Option<Pubkey>) -> AddressFinder {
    AddressFinder::new(program_id.unwrap_or(phasedrop::ID), mint)
}

pub(crate) fn phase_arg(phase: u64) -> CliResult<u8> {
    Ok(phasedrop_merkle::validate_phase(phase)?)
}
