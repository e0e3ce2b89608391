use anchor_lang::prelude::Pubkey;
use phasedrop::{verify_proof, ClaimLeaf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::{validate_phase, ClaimTree, MerkleError, MerkleResult};

/// Per-phase proof artifact handed to recipients after a tree is published.
///
/// ```json
/// { "phase": 1, "root": "<64 hex>",
///   "recipients": { "<base58>": { "amount": "100000000000", "proof": ["<64 hex>"] } } }
/// ```
///
/// Amounts are smallest-unit integers written as strings so JSON readers
/// without 64-bit integers keep full precision.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProofArtifact {
    pub phase: u8,
    pub root: String,
    pub recipients: BTreeMap<String, RecipientProof>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecipientProof {
    pub amount: String,
    pub proof: Vec<String>,
}

/// A recipient's decoded entry: the leaf they can claim and its proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimEntry {
    pub leaf: ClaimLeaf,
    pub proof: Vec<[u8; 32]>,
}

impl ProofArtifact {
    pub fn from_tree(tree: &ClaimTree) -> Self {
        let proofs = tree.all_proofs();
        let recipients = tree
            .leaves()
            .iter()
            .map(|leaf| {
                let proof = proofs
                    .get(&leaf.claimant)
                    .map(|proof| proof.iter().map(hex::encode).collect())
                    .unwrap_or_default();
                (
                    leaf.claimant.to_string(),
                    RecipientProof {
                        amount: leaf.amount.to_string(),
                        proof,
                    },
                )
            })
            .collect();

        Self {
            phase: tree.phase(),
            root: hex::encode(tree.root()),
            recipients,
        }
    }

    pub fn root_bytes(&self) -> MerkleResult<[u8; 32]> {
        decode_hash(&self.root)
    }

    pub fn entry(&self, claimant: &Pubkey) -> MerkleResult<ClaimEntry> {
        let phase = validate_phase(self.phase as u64)?;
        let recipient = self
            .recipients
            .get(&claimant.to_string())
            .ok_or_else(|| MerkleError::ClaimantNotFound(claimant.to_string()))?;

        let amount = u64::from_str(&recipient.amount)
            .map_err(|_| MerkleError::InvalidAmount(recipient.amount.clone()))?;
        let proof = recipient
            .proof
            .iter()
            .map(|node| decode_hash(node.as_str()))
            .collect::<MerkleResult<Vec<_>>>()?;

        Ok(ClaimEntry {
            leaf: ClaimLeaf::new(phase, *claimant, amount),
            proof,
        })
    }

    /// Recompute the recipient's leaf, fold their proof and compare to `root`.
    pub fn verify_recipient(&self, claimant: &Pubkey) -> MerkleResult<bool> {
        let root = self.root_bytes()?;
        let entry = self.entry(claimant)?;
        Ok(verify_proof(&entry.proof, &root, &entry.leaf.to_hash()))
    }

    /// Verify every recipient's proof. Run before an artifact is written.
    pub fn self_check(&self) -> MerkleResult<()> {
        if self.recipients.is_empty() {
            return Err(MerkleError::EmptyLeafSet);
        }

        for address in self.recipients.keys() {
            let claimant = Pubkey::from_str(address)
                .map_err(|_| MerkleError::InvalidAddress(address.clone()))?;
            if !self.verify_recipient(&claimant)? {
                return Err(MerkleError::InconsistentArtifact(format!(
                    "proof for {address} does not fold to root {}",
                    self.root
                )));
            }
        }

        tracing::debug!(
            phase = self.phase,
            recipients = self.recipients.len(),
            "proof artifact self-check passed"
        );
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

pub fn decode_hash(hex_str: &str) -> MerkleResult<[u8; 32]> {
    let bytes = hex::decode(hex_str).map_err(|_| MerkleError::InvalidHex(hex_str.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| MerkleError::InvalidHex(hex_str.to_string()))
}
