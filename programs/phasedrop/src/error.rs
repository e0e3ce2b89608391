use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Phase must be between 1 and 255.")]
    InvalidPhase,
    #[msg("Invalid Merkle proof provided.")]
    InvalidMerkleProof,
    #[msg("The vault does not have enough tokens to fulfill this claim.")]
    InsufficientVaultBalance,
    #[msg("A supplied account does not match the address derived from the pool seeds.")]
    DerivationMismatch,
    #[msg("Mint does not match the pool's mint.")]
    MintMismatch,
    #[msg("Signer is not the admin of this pool.")]
    PoolAdminMismatch,
    #[msg("The pool has been drained; no further deposits or root updates are accepted.")]
    PoolDrained,
    #[msg("Token account owner does not match the expected owner.")]
    TokenAccountOwnerMismatch,
    #[msg("Deposit amount must be greater than zero.")]
    InvalidDepositAmount,
    #[msg("Claims must be submitted as top-level instructions.")]
    CpiNotAllowed,
    #[msg("A calculation resulted in a numeric overflow.")]
    NumericOverflow,
}
