mod error;
mod ledger;
mod lookup_tables;
mod pool_snapshot;
#[cfg(feature = "test-sbf")]
mod svm_fixture;
mod test_fixture;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, TokenBalance};
pub use lookup_tables::LookupTableState;
pub use pool_snapshot::PoolSnapshot;
#[cfg(feature = "test-sbf")]
pub use svm_fixture::{
    build_proof_artifact, custom_error_code, program_error, program_path, SvmFixture,
};
pub use test_fixture::{
    deterministic_pubkey, sample_allocations, total_allocation, TestFixture, TEST_ADMIN_SUPPLY,
    TEST_MINT_DECIMALS,
};
