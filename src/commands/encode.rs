//! Encode command - hide a file inside cover images.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixelhide::{resolve_dummy_count, CoverStack, PayloadCodec, PipelineParameters};

use super::CommandExecutor;

/// Hide a file inside one or more cover images.
///
/// The transformed bit-string is spread across the covers in the order
/// given. The SAME covers in the SAME order are required to decode, because
/// the dummy-bit count is derived from the first and last cover's pixel
/// dimensions rather than stored anywhere.
#[derive(Args, Debug)]
pub struct EncodeCommand {
    /// File whose content will be hidden
    #[arg(short, long)]
    pub input: PathBuf,

    /// Cover image(s), in order (PNG or BMP recommended; output is PNG)
    #[arg(short, long, num_args = 1.., required = true)]
    pub cover: Vec<PathBuf>,

    /// Directory for the data-carrying output images
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Passphrase for encryption (empty disables encryption)
    #[arg(short, long, default_value = "")]
    pub passphrase: String,

    /// Compress the payload before encoding
    #[arg(long)]
    pub compress: bool,

    /// Insert dummy bits (count derived from cover dimensions)
    #[arg(long)]
    pub dummies: bool,

    /// Seed for bit-position permutation (empty disables permutation)
    #[arg(long, default_value = "")]
    pub seed: String,

    /// Verbose output (shows stage sizes and the derived dummy count)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for EncodeCommand {
    fn execute(&self) -> Result<()> {
        let payload = std::fs::read(&self.input)
            .with_context(|| format!("Failed to read input file {}", self.input.display()))?;

        let stack = CoverStack::from_files(&self.cover).context("Failed to load cover images")?;

        // The decoder re-derives this count from the same covers.
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
        let bits = codec
            .encode(&payload, &params)
            .context("Failed to transform payload")?;

        if self.verbose {
            eprintln!(
                "Payload: {} bytes -> {} bits (capacity {} bits)",
                payload.len(),
                bits.len(),
                stack.capacity_bits()
            );
        }

        let carrying = stack.embed(&bits).context("Failed to embed bit-string")?;

        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output dir {}", self.output_dir.display())
        })?;

        for (img, cover_path) in carrying.iter().zip(&self.cover) {
            let stem = cover_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "cover".to_string());
            let out_path = self.output_dir.join(format!("{}_hidden.png", stem));

            img.save(&out_path)
                .with_context(|| format!("Failed to save {}", out_path.display()))?;
            println!("Wrote {}", out_path.display());
        }

        println!(
            "Hidden {} bytes across {} cover image(s)",
            payload.len(),
            self.cover.len()
        );

        Ok(())
    }
}
