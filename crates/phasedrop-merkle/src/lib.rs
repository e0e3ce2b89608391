pub mod amount;
pub mod artifact;
pub mod claim_tree;
pub mod error;
pub mod hasher;
pub mod leaf;

pub use amount::{parse_amount, scale_amount, MAX_SUPPORTED_DECIMALS};
pub use artifact::{decode_hash, ClaimEntry, ProofArtifact, RecipientProof};
pub use claim_tree::{create_claim_tree, ClaimTree};
pub use error::{MerkleError, MerkleResult};
pub use hasher::PhaseHasher;
pub use leaf::{encode_leaf, validate_phase};

// Re-export the shared leaf and verifier from the program
pub use phasedrop::{compute_root, hash_pair, verify_proof, ClaimLeaf};

pub use rs_merkle::MerkleTree;
