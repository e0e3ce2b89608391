use crate::error::{CliError, CliResult};
use phasedrop_merkle::ProofArtifact;
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;

pub fn execute(artifact: PathBuf, recipient: Pubkey) -> CliResult<()> {
    let artifact = ProofArtifact::from_json(&std::fs::read_to_string(&artifact)?)?;
    let entry = artifact.entry(&recipient)?;

    println!("Phase: {}", artifact.phase);
    println!("Root: {}", artifact.root);
    println!("Recipient: {}", recipient);
    println!("Amount (smallest units): {}", entry.leaf.amount);
    println!("Proof length: {}", entry.proof.len());

    if !artifact.verify_recipient(&recipient)? {
        tracing::warn!(phase = artifact.phase, %recipient, "proof does not verify");
        return Err(CliError::ProofInvalid(recipient.to_string()));
    }

    println!("Proof is valid");
    Ok(())
}
