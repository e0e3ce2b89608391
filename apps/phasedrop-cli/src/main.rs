use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use error::CliResult;

#[derive(Parser)]
#[command(name = "phasedrop")]
#[command(about = "Phasedrop CLI - multi-phase merkle token distribution on Solana")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a phase's merkle tree from a recipients CSV and write the proof artifact
    GenerateTree {
        /// Allocation round (1-255)
        #[arg(short, long)]
        phase: u64,

        /// Decimals of the distributed mint
        #[arg(short, long)]
        decimals: u8,

        /// Recipients CSV with an `address,amount` header
        #[arg(short, long)]
        input: PathBuf,

        /// Proof artifact output path
        #[arg(short, long, default_value = "proofs.json")]
        output: PathBuf,
    },

    /// Check a recipient's proof against the artifact root
    VerifyProof {
        /// Proof artifact written by generate-tree
        #[arg(short, long)]
        artifact: PathBuf,

        /// Recipient address
        #[arg(short, long)]
        recipient: Pubkey,
    },

    /// Print the program addresses for a phase
    DeriveAddresses {
        #[arg(short, long)]
        phase: u64,

        #[arg(short, long)]
        mint: Pubkey,

        /// Also derive this recipient's claim record and token account
        #[arg(short, long)]
        recipient: Option<Pubkey>,

        /// Program id, defaults to the deployed phasedrop program
        #[arg(long)]
        program_id: Option<Pubkey>,
    },

    /// Print the addresses registered in a phase's lookup table
    LookupTableAddresses {
        #[arg(short, long)]
        phase: u64,

        #[arg(short, long)]
        mint: Pubkey,

        #[arg(long)]
        program_id: Option<Pubkey>,
    },

    /// Generate a deterministic recipients CSV for testing
    GenerateRecipients {
        /// Number of recipients
        #[arg(short, long)]
        count: usize,

        /// Seed for deterministic generation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Largest whole-token allocation
        #[arg(long, default_value = "10000")]
        max_amount: u64,

        #[arg(short, long, default_value = "recipients.csv")]
        output: PathBuf,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateTree {
            phase,
            decimals,
            input,
            output,
        } => commands::generate_tree::execute(phase, decimals, input, output).map(|_| ()),

        Commands::VerifyProof {
            artifact,
            recipient,
        } => commands::verify_proof::execute(artifact, recipient),

        Commands::DeriveAddresses {
            phase,
            mint,
            recipient,
            program_id,
        } => commands::derive_addresses::execute(phase, mint, recipient, program_id),

        Commands::LookupTableAddresses {
            phase,
            mint,
            program_id,
        } => commands::lookup_table_addresses::execute(phase, mint, program_id),

        Commands::GenerateRecipients {
            count,
            seed,
            max_amount,
            output,
        } => commands::generate_recipients::execute(count, seed, max_amount, output),
    }
}
