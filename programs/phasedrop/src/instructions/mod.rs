pub mod claim_tokens_v0;
pub mod deposit_v0;
pub mod initialize_pool_v0;
pub mod set_merkle_root_v0;
pub mod withdraw_v0;

pub use claim_tokens_v0::*;
pub use deposit_v0::*;
pub use initialize_pool_v0::*;
pub use set_merkle_root_v0::*;
pub use withdraw_v0::*;
