use crate::commands::{address_finder, phase_arg};
use crate::error::CliResult;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DerivedAddresses {
    pub program_id: String,
    pub mint: String,
    pub phase: u8,
    pub pool: String,
    pub pool_bump: u8,
    pub vault: String,
    pub vault_bump: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<RecipientAddresses>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RecipientAddresses {
    pub address: String,
    pub claim_record: String,
    pub token_account: String,
}

pub fn derive(
    phase: u64,
    mint: Pubkey,
    recipient: Option<Pubkey>,
    program_id: Option<Pubkey>,
) -> CliResult<DerivedAddresses> {
    let phase = phase_arg(phase)?;
    let finder = address_finder(mint, program_id);

    let (pool, pool_bump) = finder.find_pool_v0_address(phase);
    let (vault, vault_bump) = finder.find_vault_v0_address(phase);
    let recipient = recipient.map(|recipient| RecipientAddresses {
        address: recipient.to_string(),
        claim_record: finder
            .find_claim_record_v0_address(phase, &recipient)
            .0
            .to_string(),
        token_account: finder.find_token_account(&recipient).to_string(),
    });

    Ok(DerivedAddresses {
        program_id: finder.program_id.to_string(),
        mint: mint.to_string(),
        phase,
        pool: pool.to_string(),
        pool_bump,
        vault: vault.to_string(),
        vault_bump,
        recipient,
    })
}

pub fn execute(
    phase: u64,
    mint: Pubkey,
    recipient: Option<Pubkey>,
    program_id: Option<Pubkey>,
) -> CliResult<()> {
    let derived = derive(phase, mint, recipient, program_id)?;
    println!("{}", serde_json::to_string_pretty(&derived)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use phasedrop_sdk::AddressFinder;

    #[test]
    fn test_derive_addresses_match_finder() {
        let mint = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let finder = AddressFinder::new(phasedrop::ID, mint);

        let derived = derive(3, mint, Some(recipient), None).unwrap();

        assert_eq!(derived.program_id, phasedrop::ID.to_string());
        assert_eq!(derived.pool, finder.find_pool_v0_address(3).0.to_string());
        assert_eq!(derived.vault, finder.find_vault_v0_address(3).0.to_string());
        let recipient_addresses = derived.recipient.unwrap();
        assert_eq!(
            recipient_addresses.claim_record,
            finder
                .find_claim_record_v0_address(3, &recipient)
                .0
                .to_string()
        );
    }

    #[test]
    fn test_derive_addresses_program_id_override() {
        let mint = Pubkey::new_unique();
        let other_program = Pubkey::new_unique();

        let default = derive(1, mint, None, None).unwrap();
        let other = derive(1, mint, None, Some(other_program)).unwrap();

        assert_eq!(other.program_id, other_program.to_string());
        assert_ne!(default.pool, other.pool);
        assert!(other.recipient.is_none());
    }

    #[test]
    fn test_derive_addresses_rejects_phase_zero() {
        assert!(derive(0, Pubkey::new_unique(), None, None).is_err());
    }
}
