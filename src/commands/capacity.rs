//! Capacity command - report how much a cover stack can hold.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pixelhide::{read_dimensions, resolve_dummy_count, CoverStack};

use super::CommandExecutor;

/// Show how many payload bytes fit into the given cover images.
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// Cover image(s), in order
    #[arg(short, long, num_args = 1.., required = true)]
    pub cover: Vec<PathBuf>,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self) -> Result<()> {
        println!("Cover capacity");
        println!("==============");

        let mut dims = Vec::with_capacity(self.cover.len());
        for path in &self.cover {
            let d = read_dimensions(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            println!(
                "  {}: {}x{} ({} pixels)",
                path.display(),
                d.width,
                d.height,
                d.area()
            );
            dims.push(d);
        }

        let stack = CoverStack::from_files(&self.cover).context("Failed to load cover images")?;
        let bits = stack.capacity_bits();

        println!();
        println!("  Total capacity: {} bits (~{} bytes of bit-string)", bits, bits / 8);
        // Base64 + 8x bit expansion: one payload byte costs ~10.7 bits
        println!("  Approx. payload limit: {} bytes", bits * 3 / 32);

        let dummy_count = resolve_dummy_count(&dims).context("Failed to derive dummy count")?;
        println!("  Dummy count (if --dummies): {}", dummy_count);

        Ok(())
    }
}
