mod address_finder;
mod claim_assembler;
mod claim_client;
mod error;
mod instruction_builders;
mod lookup_table;
mod pool_artifact;
mod transaction_builders;

pub use address_finder::{check_derived, AddressFinder};
pub use claim_assembler::*;
pub use claim_client::*;
pub use error::*;
pub use instruction_builders::*;
pub use lookup_table::*;
pub use phasedrop::state::*;
pub use pool_artifact::PoolCreationArtifact;
pub use transaction_builders::*;

// Re-export program ID
pub use phasedrop::ID as PROGRAM_ID;
