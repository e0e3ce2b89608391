use phasedrop_merkle::MerkleError;
use phasedrop_sdk::SdkError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Merkle error: {0}")]
    Merkle(#[from] MerkleError),

    #[error("SDK error: {0}")]
    Sdk(#[from] SdkError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Proof for {0} does not verify against the artifact root")]
    ProofInvalid(String),
}
