use crate::commands::phase_arg;
use crate::error::{CliError, CliResult};
use phasedrop_merkle::{create_claim_tree, parse_amount, MerkleError, ProofArtifact};
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Deserialize)]
struct RecipientRow {
    address: String,
    amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSummary {
    pub phase: u8,
    pub recipients: usize,
    pub root: String,
    pub depth: usize,
    /// Smallest-unit total the phase's vault must hold.
    pub total_amount: u64,
}

pub fn execute(
    phase: u64,
    decimals: u8,
    input: PathBuf,
    output: PathBuf,
) -> CliResult<TreeSummary> {
    let phase = phase_arg(phase)?;

    println!("Generating tree for phase {}", phase);
    println!("Recipients CSV: {}", input.display());
    println!("Mint decimals: {}", decimals);

    let allocations = read_allocations(&input, decimals)?;
    let total_amount = allocations
        .iter()
        .try_fold(0u64, |total, (_, amount)| total.checked_add(*amount))
        .ok_or_else(|| MerkleError::AmountOverflow("phase total".to_string()))?;

    let tree = create_claim_tree(phase, &allocations)?;
    let artifact = ProofArtifact::from_tree(&tree);
    artifact.self_check()?;

    if output.exists() {
        println!(
            "Output file already exists and will be overwritten: {}",
            output.display()
        );
    }
    std::fs::write(&output, artifact.to_json_pretty()?)?;

    tracing::info!(
        phase,
        recipients = tree.len(),
        root = %artifact.root,
        total_amount,
        "proof artifact written"
    );

    println!("Root: {}", artifact.root);
    println!("Recipients: {}", tree.len());
    println!("Tree depth: {}", tree.depth());
    println!("Required deposit (smallest units): {}", total_amount);
    println!("Artifact saved to: {}", output.display());

    Ok(TreeSummary {
        phase,
        recipients: tree.len(),
        root: artifact.root,
        depth: tree.depth(),
        total_amount,
    })
}

/// Read `address,amount` rows, scaling each display amount to smallest units.
fn read_allocations(path: &Path, decimals: u8) -> CliResult<Vec<(Pubkey, u64)>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut allocations = Vec::new();

    for (line, row) in reader.deserialize::<RecipientRow>().enumerate() {
        let row = row?;
        // Header is line 1
        let line = line + 2;

        let address = Pubkey::from_str(row.address.trim()).map_err(|_| {
            CliError::InvalidInput(format!("line {line}: invalid address {}", row.address))
        })?;
        let amount = parse_amount(&row.amount, decimals)
            .map_err(|error| CliError::InvalidInput(format!("line {line}: {error}")))?;
        if amount == 0 {
            return Err(CliError::InvalidInput(format!(
                "line {line}: amount for {address} must be positive"
            )));
        }

        allocations.push((address, amount));
    }

    Ok(allocations)
}
