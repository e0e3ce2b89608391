use crate::commands::{address_finder, phase_arg};
use crate::error::CliResult;
use solana_sdk::pubkey::Pubkey;

pub fn execute(phase: u64, mint: Pubkey, program_id: Option<Pubkey>) -> CliResult<()> {
    let phase = phase_arg(phase)?;
    let finder = address_finder(mint, program_id);

    println!("Lookup table entries for phase {} (mint {}):", phase, mint);
    for (index, address) in finder.lookup_table_addresses(phase).iter().enumerate() {
        println!("  {index}: {address}");
    }
    Ok(())
}
