use crate::error::{CliError, CliResult};
use csv::Writer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;

/// Write `count` recipients with whole-token amounts in `1..=max_amount`.
/// The same seed always produces the same file.
pub fn execute(count: usize, seed: u64, max_amount: u64, output: PathBuf) -> CliResult<()> {
    if count == 0 {
        return Err(CliError::InvalidInput("count must be positive".to_string()));
    }
    if max_amount == 0 {
        return Err(CliError::InvalidInput(
            "max amount must be positive".to_string(),
        ));
    }

    println!("Generating {} recipients with seed {}", count, seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut writer = Writer::from_path(&output)?;
    writer.write_record(["address", "amount"])?;

    for _ in 0..count {
        let address = Pubkey::new_from_array(rng.gen());
        let amount = rng.gen_range(1..=max_amount);
        writer.write_record([address.to_string(), amount.to_string()])?;
    }
    writer.flush()?;

    println!("Recipients saved to: {}", output.display());
    Ok(())
}
