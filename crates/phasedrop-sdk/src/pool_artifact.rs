use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::{SdkError, SdkResult};

/// Record written by the admin after a phase's pool and lookup table exist.
///
/// Recipients' tooling reads it to learn which lookup table serves the phase.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PoolCreationArtifact {
    pub phase: u8,
    pub token_mint_address: String,
    pub lookup_table_address: String,
    /// Smallest-unit amount, written as a string.
    pub deposit_amount: String,
    pub transaction_signature: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl PoolCreationArtifact {
    pub fn new(
        phase: u8,
        mint: &Pubkey,
        lookup_table: &Pubkey,
        deposit_amount: u64,
        transaction_signature: Option<String>,
    ) -> Self {
        Self {
            phase,
            token_mint_address: mint.to_string(),
            lookup_table_address: lookup_table.to_string(),
            deposit_amount: deposit_amount.to_string(),
            transaction_signature,
            timestamp: Utc::now(),
        }
    }

    pub fn mint(&self) -> SdkResult<Pubkey> {
        parse_address(&self.token_mint_address)
    }

    pub fn lookup_table(&self) -> SdkResult<Pubkey> {
        parse_address(&self.lookup_table_address)
    }

    pub fn deposit(&self) -> SdkResult<u64> {
        u64::from_str(&self.deposit_amount)
            .map_err(|_| SdkError::InvalidInput(format!("bad deposit amount {}", self.deposit_amount)))
    }

    pub fn to_json_pretty(&self) -> SdkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SdkResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn parse_address(raw: &str) -> SdkResult<Pubkey> {
    Pubkey::from_str(raw).map_err(|_| SdkError::InvalidInput(format!("bad address {raw}")))
}
