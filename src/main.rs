//! Pixelhide - Hide any file inside cover images
//!
//! A CLI for image steganography with an invertible transformation pipeline:
//! optional compression, passphrase encryption, dummy-bit insertion and
//! seeded bit permutation, embedded into pixel LSBs.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{CapacityCommand, CommandExecutor, DecodeCommand, EncodeCommand};

/// Pixelhide - Hide any file inside cover images
#[derive(Parser)]
#[command(name = "pixelhide")]
#[command(version)]
#[command(about = "Hide any file inside cover images via an invertible bit-string pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a file inside cover images
    Encode(EncodeCommand),

    /// Recover a hidden file from carrying images
    Decode(DecodeCommand),

    /// Show how much the given covers can hold
    Capacity(CapacityCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Encode(cmd) => cmd.execute(),
        Commands::Decode(cmd) => cmd.execute(),
        Commands::Capacity(cmd) => cmd.execute(),
    }
}
