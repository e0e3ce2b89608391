use anchor_lang::prelude::Pubkey;
use phasedrop_merkle::MerkleError;
use thiserror::Error;

pub type SdkResult<T> = Result<T, SdkError>;

/// Errors from building instructions, transactions and artifacts.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Phase {0} is invalid (must be 1-255)")]
    InvalidPhase(u8),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Merkle error: {0}")]
    Merkle(#[from] MerkleError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ClaimResult<T> = Result<T, ClaimError>;

/// Outcome of a rejected claim.
///
/// Each kind is distinct and is never collapsed into another. Only
/// `LookupTableUnavailable` is transient; the rest fail the same way on
/// every retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Proof does not verify against the phase {phase} root")]
    ProofInvalid { phase: u8 },

    #[error("{claimant} has already claimed phase {phase}")]
    AlreadyClaimed { phase: u8, claimant: Pubkey },

    #[error("Lookup table for phase {phase} is unavailable: {reason}")]
    LookupTableUnavailable { phase: u8, reason: String },

    #[error("Vault for phase {phase} holds {available}, claim needs {requested}")]
    InsufficientVaultBalance {
        phase: u8,
        available: u64,
        requested: u64,
    },

    #[error("{account} address mismatch: expected {expected}, got {actual}")]
    DerivationMismatch {
        account: &'static str,
        expected: Pubkey,
        actual: Pubkey,
    },

    #[error("No pool exists for phase {phase}")]
    PoolNotFound { phase: u8 },

    #[error("Transaction is {size} bytes, limit is {limit}")]
    TransactionTooLarge { size: usize, limit: usize },
}

impl ClaimError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClaimError::LookupTableUnavailable { .. })
    }
}

impl From<MerkleError> for ClaimError {
    fn from(error: MerkleError) -> Self {
        ClaimError::MalformedInput(error.to_string())
    }
}
