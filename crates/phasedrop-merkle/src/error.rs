use anchor_lang::prelude::Pubkey;
use thiserror::Error;

use crate::MAX_SUPPORTED_DECIMALS;

pub type MerkleResult<T> = Result<T, MerkleError>;

/// Errors raised while encoding leaves, building trees or handling artifacts.
///
/// Everything except `ClaimantNotFound` and `ProofInvalid` is a malformed
/// input: the whole batch is rejected and nothing is partially produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Cannot build a tree from an empty recipient set")]
    EmptyLeafSet,

    #[error("Phase {0} is invalid (must be 1-255)")]
    InvalidPhase(u64),

    #[error("Leaf for phase {found} cannot join a phase {expected} tree")]
    MixedPhases { expected: u8, found: u8 },

    #[error("Duplicate recipient: {0}")]
    DuplicateClaimant(Pubkey),

    #[error("Amount {0} does not fit in 64 bits")]
    AmountOverflow(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),

    #[error("Amount {amount} has more fractional digits than the token's {decimals} decimals")]
    FractionalSmallestUnit { amount: String, decimals: u8 },

    #[error("Unsupported decimals: {0} (max {MAX_SUPPORTED_DECIMALS} decimals with u64 amounts)")]
    UnsupportedDecimals(u8),

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("Artifact is inconsistent: {0}")]
    InconsistentArtifact(String),

    #[error("Recipient not found in tree: {0}")]
    ClaimantNotFound(String),

    #[error("Proof does not verify against the root")]
    ProofInvalid,

    #[error("Failed to build tree")]
    TreeBuildingFailed,
}

impl MerkleError {
    /// True for every error that means the input batch itself was bad.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(
            self,
            MerkleError::ClaimantNotFound(_) | MerkleError::ProofInvalid
        )
    }
}
