use anchor_lang::prelude::Pubkey;
use phasedrop::{verify_proof, ClaimLeaf};
use rs_merkle::MerkleTree;
use std::collections::HashMap;

use crate::{validate_phase, MerkleError, MerkleResult, PhaseHasher};

/// Build the tree for one phase from `(recipient, amount)` allocations.
///
/// Fails with a malformed-input error on an empty set, a duplicate
/// recipient, or a phase outside 1..=255. Nothing is built on failure.
pub fn create_claim_tree(phase: u8, allocations: &[(Pubkey, u64)]) -> MerkleResult<ClaimTree> {
    let phase = validate_phase(phase as u64)?;

    let leaves = allocations
        .iter()
        .map(|(claimant, amount)| ClaimLeaf::new(phase, *claimant, *amount))
        .collect();

    ClaimTree::from_leaves(leaves)
}

/// A binary sorted-pair Merkle tree over one phase's claim leaves.
///
/// ## Leaf Ordering
///
/// Leaf hashes are sorted ascending before the tree is built. Together with
/// sorted-pair internal hashing this makes the root a function of the leaf
/// *set*: any permutation of the same allocations yields the same root.
///
/// ## Proofs
///
/// A proof is the flat list of sibling hashes from the leaf's level up to the
/// root's children. Levels where the node had no sibling (it was promoted)
/// contribute nothing, so proof length is at most `ceil(log2(n))`.
#[derive(Clone)]
pub struct ClaimTree {
    tree: MerkleTree<PhaseHasher>,
    root: [u8; 32],
    phase: u8,
    /// Leaves in tree order (ascending by hash)
    leaves: Vec<ClaimLeaf>,
    claimant_leaf_index: HashMap<Pubkey, usize>,
}

impl ClaimTree {
    /// Build a tree from already-encoded leaves. All leaves must share a phase.
    pub fn from_leaves(leaves: Vec<ClaimLeaf>) -> MerkleResult<Self> {
        let first = leaves.first().ok_or(MerkleError::EmptyLeafSet)?;
        let phase = validate_phase(first.phase as u64)?;

        let mut hashed: Vec<([u8; 32], ClaimLeaf)> = Vec::with_capacity(leaves.len());
        for leaf in leaves {
            if leaf.phase != phase {
                return Err(MerkleError::MixedPhases {
                    expected: phase,
                    found: leaf.phase,
                });
            }
            hashed.push((leaf.to_hash(), leaf));
        }
        hashed.sort_by(|a, b| a.0.cmp(&b.0));

        let mut claimant_leaf_index = HashMap::with_capacity(hashed.len());
        for (index, (_, leaf)) in hashed.iter().enumerate() {
            if claimant_leaf_index.insert(leaf.claimant, index).is_some() {
                return Err(MerkleError::DuplicateClaimant(leaf.claimant));
            }
        }

        let leaf_hashes: Vec<[u8; 32]> = hashed.iter().map(|(hash, _)| *hash).collect();
        let tree = MerkleTree::<PhaseHasher>::from_leaves(&leaf_hashes);
        let root = tree.root().ok_or(MerkleError::TreeBuildingFailed)?;

        tracing::debug!(
            phase,
            leaves = leaf_hashes.len(),
            depth = tree.depth(),
            root = %hex::encode(root),
            "built claim tree"
        );

        Ok(Self {
            tree,
            root,
            phase,
            leaves: hashed.into_iter().map(|(_, leaf)| leaf).collect(),
            claimant_leaf_index,
        })
    }

    pub fn root(&self) -> [u8; 32] {
        self.root
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Number of levels above the leaves.
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// Leaves in tree order.
    pub fn leaves(&self) -> &[ClaimLeaf] {
        &self.leaves
    }

    pub fn leaf_for_claimant(&self, claimant: &Pubkey) -> MerkleResult<&ClaimLeaf> {
        let index = self.leaf_index(claimant)?;
        Ok(&self.leaves[index])
    }

    /// Sibling path for `claimant`, bottom-up.
    pub fn proof_for_claimant(&self, claimant: &Pubkey) -> MerkleResult<Vec<[u8; 32]>> {
        let index = self.leaf_index(claimant)?;
        let proof = self.tree.proof(&[index]);
        Ok(proof.proof_hashes().to_vec())
    }

    /// Proofs for every leaf, keyed by recipient.
    pub fn all_proofs(&self) -> HashMap<Pubkey, Vec<[u8; 32]>> {
        self.leaves
            .iter()
            .enumerate()
            .map(|(index, leaf)| {
                let proof = self.tree.proof(&[index]);
                (leaf.claimant, proof.proof_hashes().to_vec())
            })
            .collect()
    }

    /// Check `proof` for the claimant's own leaf against this tree's root, with
    /// the same fold the program runs.
    pub fn verify_claimant(&self, claimant: &Pubkey, proof: &[[u8; 32]]) -> MerkleResult<bool> {
        let leaf = self.leaf_for_claimant(claimant)?;
        Ok(verify_proof(proof, &self.root, &leaf.to_hash()))
    }

    fn leaf_index(&self, claimant: &Pubkey) -> MerkleResult<usize> {
        self.claimant_leaf_index
            .get(claimant)
            .copied()
            .ok_or_else(|| MerkleError::ClaimantNotFound(claimant.to_string()))
    }
}
