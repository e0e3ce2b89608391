use anchor_lang::error::ERROR_CODE_OFFSET;
use anchor_lang::AccountDeserialize;
use anchor_spl::token::TokenAccount;
use litesvm::types::{FailedTransactionMetadata, TransactionResult};
use litesvm::LiteSVM;
use litesvm_token::{CreateAssociatedTokenAccount, CreateMint, MintTo};
use phasedrop::{ClaimRecordV0, ErrorCode, PoolV0};
use phasedrop_merkle::{create_claim_tree, ClaimEntry, ProofArtifact};
use phasedrop_sdk::{
    build_claim_tokens_v0_ix, build_deposit_v0_ix, build_initialize_pool_v0_ix,
    build_set_merkle_root_v0_ix, build_withdraw_v0_ix, AddressFinder,
};
use solana_sdk::instruction::{Instruction, InstructionError};
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::{Transaction, TransactionError};
use std::path::{Path, PathBuf};

use crate::{TEST_ADMIN_SUPPLY, TEST_MINT_DECIMALS};

const AIRDROP_LAMPORTS: u64 = 10_000_000_000;

/// `phasedrop.so` from `SBF_OUT_DIR`, or the workspace's `target/deploy`.
pub fn program_path() -> PathBuf {
    std::env::var_os("SBF_OUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("../../target/deploy"))
        .join("phasedrop.so")
}

/// The Anchor custom error code the program reports for `error`.
pub fn program_error(error: ErrorCode) -> u32 {
    ERROR_CODE_OFFSET + error as u32
}

/// Custom error code of a failed transaction, if it failed with one.
pub fn custom_error_code(result: &TransactionResult) -> Option<u32> {
    match result {
        Err(failed) => match &failed.err {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(*code),
            _ => None,
        },
        Ok(_) => None,
    }
}

/// Builds the phase's proof artifact, panicking on an invalid allocation set.
pub fn build_proof_artifact(phase: u8, allocations: &[(Pubkey, u64)]) -> ProofArtifact {
    let tree = create_claim_tree(phase, allocations)
        .unwrap_or_else(|e| panic!("Failed to build claim tree for phase {phase}: {e}"));
    ProofArtifact::from_tree(&tree)
}

/// The compiled program loaded into litesvm, with a funded admin and a
/// classic SPL mint. Complements the in-memory [`crate::Ledger`] by running
/// the real instruction handlers.
pub struct SvmFixture {
    pub admin: Keypair,
    pub mint: Pubkey,
    pub address_finder: AddressFinder,

    svm: LiteSVM,
}

impl SvmFixture {
    pub fn new() -> Result<Self, FailedTransactionMetadata> {
        let mut svm = LiteSVM::new();

        let path = program_path();
        svm.add_program_from_file(phasedrop::ID, &path)
            .unwrap_or_else(|e| {
                panic!("Failed to load {} (run cargo build-sbf): {e:?}", path.display())
            });

        let admin = Keypair::new();
        svm.airdrop(&admin.pubkey(), AIRDROP_LAMPORTS)?;

        let mint = CreateMint::new(&mut svm, &admin)
            .decimals(TEST_MINT_DECIMALS)
            .send()?;
        let admin_token_account =
            CreateAssociatedTokenAccount::new(&mut svm, &admin, &mint).send()?;
        MintTo::new(&mut svm, &admin, &mint, &admin_token_account, TEST_ADMIN_SUPPLY).send()?;

        Ok(Self {
            address_finder: AddressFinder::new(phasedrop::ID, mint),
            admin,
            mint,
            svm,
        })
    }

    /// A fresh keypair with enough SOL to pay for its token account and
    /// claim record.
    pub fn funded_claimant(&mut self) -> Keypair {
        let claimant = Keypair::new();
        self.svm
            .airdrop(&claimant.pubkey(), AIRDROP_LAMPORTS)
            .unwrap_or_else(|e| panic!("Failed to airdrop to {}: {e:?}", claimant.pubkey()));
        claimant
    }

    pub fn send(&mut self, instructions: &[Instruction], signer: &Keypair) -> TransactionResult {
        send_signed(&mut self.svm, instructions, signer)
    }

    pub fn initialize_pool(
        &mut self,
        phase: u8,
        merkle_root: [u8; 32],
        initial_deposit: u64,
    ) -> TransactionResult {
        let (ix, _, _) = build_initialize_pool_v0_ix(
            &self.address_finder,
            &self.admin.pubkey(),
            phase,
            merkle_root,
            initial_deposit,
        )
        .expect("Failed to build initialize_pool_v0 ix");
        send_signed(&mut self.svm, &[ix], &self.admin)
    }

    pub fn set_merkle_root(&mut self, phase: u8, merkle_root: [u8; 32]) -> TransactionResult {
        let (ix, _, _) = build_set_merkle_root_v0_ix(
            &self.address_finder,
            &self.admin.pubkey(),
            phase,
            merkle_root,
        )
        .expect("Failed to build set_merkle_root_v0 ix");
        send_signed(&mut self.svm, &[ix], &self.admin)
    }

    pub fn deposit(&mut self, phase: u8, amount: u64) -> TransactionResult {
        let (ix, _, _) =
            build_deposit_v0_ix(&self.address_finder, &self.admin.pubkey(), phase, amount)
                .expect("Failed to build deposit_v0 ix");
        send_signed(&mut self.svm, &[ix], &self.admin)
    }

    pub fn withdraw(&mut self, phase: u8) -> TransactionResult {
        let (ix, _, _) = build_withdraw_v0_ix(&self.address_finder, &self.admin.pubkey(), phase)
            .expect("Failed to build withdraw_v0 ix");
        send_signed(&mut self.svm, &[ix], &self.admin)
    }

    pub fn claim(&mut self, claimant: &Keypair, entry: &ClaimEntry) -> TransactionResult {
        let (ix, _, _) = build_claim_tokens_v0_ix(
            &self.address_finder,
            &claimant.pubkey(),
            entry.leaf.phase,
            entry.leaf.amount,
            entry.proof.clone(),
        )
        .expect("Failed to build claim_tokens_v0 ix");
        send_signed(&mut self.svm, &[ix], claimant)
    }

    /// Mint straight into `destination`, bypassing the program.
    pub fn mint_to(
        &mut self,
        destination: &Pubkey,
        amount: u64,
    ) -> Result<(), FailedTransactionMetadata> {
        MintTo::new(&mut self.svm, &self.admin, &self.mint, destination, amount).send()
    }

    pub fn pool(&self, phase: u8) -> Option<PoolV0> {
        let (address, _) = self.address_finder.find_pool_v0_address(phase);
        let account = self.svm.get_account(&address)?;
        PoolV0::try_deserialize(&mut account.data.as_slice()).ok()
    }

    pub fn claim_record(&self, phase: u8, claimant: &Pubkey) -> Option<ClaimRecordV0> {
        let (address, _) = self
            .address_finder
            .find_claim_record_v0_address(phase, claimant);
        let account = self.svm.get_account(&address)?;
        ClaimRecordV0::try_deserialize(&mut account.data.as_slice()).ok()
    }

    pub fn token_balance(&self, address: &Pubkey) -> u64 {
        self.svm
            .get_account(address)
            .and_then(|account| TokenAccount::try_deserialize(&mut account.data.as_slice()).ok())
            .map_or(0, |token_account| token_account.amount)
    }

    pub fn vault_balance(&self, phase: u8) -> u64 {
        let (vault, _) = self.address_finder.find_vault_v0_address(phase);
        self.token_balance(&vault)
    }

    pub fn claimant_balance(&self, claimant: &Pubkey) -> u64 {
        self.token_balance(&self.address_finder.find_token_account(claimant))
    }

    pub fn admin_balance(&self) -> u64 {
        self.claimant_balance(&self.admin.pubkey())
    }
}

/// Sign with `signer` as fee payer. The blockhash is expired first so a
/// resent instruction is a new transaction.
fn send_signed(
    svm: &mut LiteSVM,
    instructions: &[Instruction],
    signer: &Keypair,
) -> TransactionResult {
    svm.expire_blockhash();
    let tx = Transaction::new(
        &[signer],
        Message::new(instructions, Some(&signer.pubkey())),
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx)
}
