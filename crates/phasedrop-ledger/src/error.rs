use phasedrop_sdk::ClaimError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Rejections from admin transactions and ledger setup calls.
///
/// Claims report `ClaimError` directly; it is wrapped here only when a claim
/// is driven through an admin-facing helper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Missing signature for {0}")]
    MissingSigner(Pubkey),

    #[error("Unsupported instruction for program {0}")]
    UnsupportedInstruction(Pubkey),

    #[error("Invalid instruction data: {0}")]
    InvalidInstructionData(String),

    #[error("Instruction expects {expected} accounts, got {actual}")]
    AccountCount { expected: usize, actual: usize },

    #[error("Phase {0} is invalid (must be 1-255)")]
    InvalidPhase(u8),

    #[error("{account} address mismatch: expected {expected}, got {actual}")]
    DerivationMismatch {
        account: &'static str,
        expected: Pubkey,
        actual: Pubkey,
    },

    #[error("Mint {0} does not exist")]
    MintNotFound(Pubkey),

    #[error("Mint {0} already exists")]
    MintExists(Pubkey),

    #[error("Pool {0} already exists")]
    PoolAlreadyExists(Pubkey),

    #[error("Pool {0} does not exist")]
    PoolNotFound(Pubkey),

    #[error("Signer is not the admin of this pool")]
    PoolAdminMismatch,

    #[error("Mint does not match")]
    MintMismatch,

    #[error("Pool has been drained")]
    PoolDrained,

    #[error("Token account {0} does not exist")]
    TokenAccountNotFound(Pubkey),

    #[error("Token account owner does not match")]
    TokenAccountOwnerMismatch,

    #[error("Deposit amount must be greater than zero")]
    InvalidDepositAmount,

    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds { available: u64, requested: u64 },

    #[error("Numeric overflow")]
    NumericOverflow,

    #[error("Lookup table {0} already exists")]
    LookupTableExists(Pubkey),

    #[error("Lookup table {0} does not exist")]
    LookupTableNotFound(Pubkey),

    #[error("Signer is not the authority of lookup table {0}")]
    LookupTableAuthorityMismatch(Pubkey),

    #[error("Claim failed: {0}")]
    Claim(#[from] ClaimError),
}
