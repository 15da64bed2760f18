//! Decode command - recover a hidden file from carrying images.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixelhide::{resolve_dummy_count, CoverStack, PayloadCodec, PipelineParameters};

use super::CommandExecutor;

/// Recover a hidden file from data-carrying images.
///
/// All pipeline toggles (--passphrase, --compress, --dummies, --seed) must
/// match the values used at encode time. A wrong passphrase is reported as
/// an error; a wrong seed or a dummy mismatch yields garbage output instead
/// of an error - there is no way to detect it here.
#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// Data-carrying image(s), in the same order used for encoding
    #[arg(short, long, num_args = 1.., required = true)]
    pub cover: Vec<PathBuf>,

    /// Output file for the recovered payload (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Passphrase used at encode time (empty if encryption was disabled)
    #[arg(short, long, default_value = "")]
    pub passphrase: String,

    /// The payload was compressed at encode time
    #[arg(long)]
    pub compress: bool,

    /// Dummy bits were inserted at encode time (count re-derived from covers)
    #[arg(long)]
    pub dummies: bool,

    /// Permutation seed used at encode time (empty if permutation was disabled)
    #[arg(long, default_value = "")]
    pub seed: String,

    /// Verbose output (shows extracted sizes and the derived dummy count)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for DecodeCommand {
    fn execute(&self) -> Result<()> {
        let stack =
            CoverStack::from_files(&self.cover).context("Failed to load carrying images")?;

        let bits = stack.extract().context("Failed to extract bit-string")?;

        if self.verbose {
            eprintln!("Extracted {} bits", bits.len());
        }

        // Must mirror the encoder: same covers, same order, same derivation.
        let dummy_count = if self.dummies {
            let count = resolve_dummy_count(&stack.dimensions())
                .context("Failed to derive dummy-bit count")?;
            if self.verbose {
                eprintln!("Derived dummy count: {}", count);
            }
            count
        } else {
            0
        };

        let params = PipelineParameters {
            passphrase: self.passphrase.clone(),
            use_compression: self.compress,
            dummy_count,
            random_seed: self.seed.clone(),
        };

        let codec = PayloadCodec::new();
        let payload = codec
            .decode(&bits, &params)
            .context("Failed to recover payload")?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &payload)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Recovered {} bytes to {}", payload.len(), path.display());
            }
            None => {
                std::io::stdout()
                    .write_all(&payload)
                    .context("Failed to write payload to stdout")?;
            }
        }

        Ok(())
    }
}
