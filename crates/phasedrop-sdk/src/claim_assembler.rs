/*!
# Claim Assembler

Compiles claim instructions into v0 messages that reference the phase's
address lookup table.

A claim carries ten accounts plus a proof of up to `ceil(log2(n))` 32-byte
nodes. As a legacy transaction the static account keys alone take 384 bytes,
which pushes deep proofs over the 1232-byte packet limit. Moving the seven
shared accounts into the lookup table replaces each 32-byte key with a
one-byte index.

## Failure modes

- The table is absent, or does not yet expose every shared address:
  `ClaimError::LookupTableUnavailable`. There is no legacy fallback.
- The compiled transaction is still over the limit:
  `ClaimError::TransactionTooLarge`.

The returned message is unsigned; the claimant signs it as the fee payer.
*/

use phasedrop_merkle::ClaimEntry;
#[allow(deprecated)]
use solana_sdk::compute_budget::ComputeBudgetInstruction;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::{v0, AddressLookupTableAccount, VersionedMessage};
use solana_sdk::pubkey::Pubkey;

use crate::{
    build_claim_tokens_v0_ix, missing_addresses, AddressFinder, ClaimError, ClaimResult,
};

pub use solana_sdk::packet::PACKET_DATA_SIZE;

const SIGNATURE_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimAssemblerConfig {
    pub compute_unit_limit: u32,
    /// Priority fee in micro-lamports per compute unit. `None` omits the instruction.
    pub compute_unit_price: Option<u64>,
    pub max_transaction_size: usize,
}

impl Default for ClaimAssemblerConfig {
    fn default() -> Self {
        Self {
            compute_unit_limit: 200_000,
            compute_unit_price: None,
            max_transaction_size: PACKET_DATA_SIZE,
        }
    }
}

/// A compiled, unsigned claim.
#[derive(Debug, Clone)]
pub struct AssembledClaim {
    pub phase: u8,
    pub claimant: Pubkey,
    pub message: VersionedMessage,
    /// Size of the transaction once the claimant's signature is attached.
    pub transaction_size: usize,
}

#[derive(Debug, Clone)]
pub struct ClaimAssembler {
    address_finder: AddressFinder,
    config: ClaimAssemblerConfig,
}

impl ClaimAssembler {
    pub fn new(address_finder: AddressFinder, config: ClaimAssemblerConfig) -> Self {
        Self {
            address_finder,
            config,
        }
    }

    pub fn address_finder(&self) -> &AddressFinder {
        &self.address_finder
    }

    pub fn config(&self) -> &ClaimAssemblerConfig {
        &self.config
    }

    /// Compute-budget instructions followed by the claim instruction.
    pub fn claim_instructions(&self, entry: &ClaimEntry) -> ClaimResult<Vec<Instruction>> {
        let (claim_ix, _, _) = build_claim_tokens_v0_ix(
            &self.address_finder,
            &entry.leaf.claimant,
            entry.leaf.phase,
            entry.leaf.amount,
            entry.proof.clone(),
        )
        .map_err(|e| ClaimError::MalformedInput(e.to_string()))?;

        let mut instructions = vec![ComputeBudgetInstruction::set_compute_unit_limit(
            self.config.compute_unit_limit,
        )];
        if let Some(price) = self.config.compute_unit_price {
            instructions.push(ComputeBudgetInstruction::set_compute_unit_price(price));
        }
        instructions.push(claim_ix);

        Ok(instructions)
    }

    /// Compile a claim against the phase's lookup table.
    ///
    /// `lookup_table` is whatever the caller could resolve for the phase:
    /// `None` when the table account does not exist or is not yet visible.
    pub fn assemble(
        &self,
        entry: &ClaimEntry,
        lookup_table: Option<&AddressLookupTableAccount>,
        recent_blockhash: Hash,
    ) -> ClaimResult<AssembledClaim> {
        let phase = entry.leaf.phase;
        let claimant = entry.leaf.claimant;

        let table = lookup_table.ok_or_else(|| ClaimError::LookupTableUnavailable {
            phase,
            reason: "table not found".to_string(),
        })?;

        let missing = missing_addresses(table, &self.address_finder.lookup_table_addresses(phase));
        if !missing.is_empty() {
            return Err(ClaimError::LookupTableUnavailable {
                phase,
                reason: format!(
                    "table {} is missing {} of the shared claim addresses",
                    table.key,
                    missing.len()
                ),
            });
        }

        let instructions = self.claim_instructions(entry)?;
        let message = v0::Message::try_compile(
            &claimant,
            &instructions,
            std::slice::from_ref(table),
            recent_blockhash,
        )
        .map_err(|e| ClaimError::MalformedInput(format!("failed to compile message: {e}")))?;
        let message = VersionedMessage::V0(message);

        let transaction_size = transaction_size(&message);
        if transaction_size > self.config.max_transaction_size {
            tracing::warn!(
                phase,
                %claimant,
                transaction_size,
                proof_len = entry.proof.len(),
                "claim transaction too large"
            );
            return Err(ClaimError::TransactionTooLarge {
                size: transaction_size,
                limit: self.config.max_transaction_size,
            });
        }

        tracing::debug!(phase, %claimant, transaction_size, "assembled claim");

        Ok(AssembledClaim {
            phase,
            claimant,
            message,
            transaction_size,
        })
    }
}

/// Wire size of a transaction carrying `message` and one signature per
/// required signer.
pub fn transaction_size(message: &VersionedMessage) -> usize {
    let signatures = message.header().num_required_signatures as usize;
    short_vec_len(signatures) + signatures * SIGNATURE_LEN + message.serialize().len()
}

/// Bytes used by the compact-u16 length prefix for `len`.
fn short_vec_len(len: usize) -> usize {
    match len {
        0..=0x7f => 1,
        0x80..=0x3fff => 2,
        _ => 3,
    }
}
