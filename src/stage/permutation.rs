//! Bit-position permutation stage.
//!
//! Shuffles the bit-string with a seed-derived permutation; restore scatters
//! the bits back through the same index vector. The same seed + length always
//! produce the same permutation, so no position table is ever transmitted.
//!
//! A mismatched seed restores to a different ordering - garbage output, no
//! error, same as the dummy stage.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::random::derive_seed;

use super::Permutation;

/// HKDF salt for permutation seeds.
const SALT_PERMUTE: &[u8] = b"PIXELHIDE-PERMUTE-V1";

/// Fisher-Yates [`Permutation`] implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeededPermutation;

/// Builds the shuffled index vector for a given seed and length.
fn permutation_indices(seed: &str, n: usize) -> Vec<usize> {
    let mut rng = ChaCha20Rng::from_seed(derive_seed(seed.as_bytes(), SALT_PERMUTE));
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);
    indices
}

impl Permutation for SeededPermutation {
    fn permute(&self, bits: &str, seed: &str) -> String {
        let chars: Vec<char> = bits.chars().collect();
        let indices = permutation_indices(seed, chars.len());

        indices.iter().map(|&i| chars[i]).collect()
    }

    fn restore(&self, bits: &str, seed: &str) -> String {
        let chars: Vec<char> = bits.chars().collect();
        let indices = permutation_indices(seed, chars.len());

        let mut restored = vec!['0'; chars.len()];
        for (slot, &origin) in indices.iter().enumerate() {
            restored[origin] = chars[slot];
        }

        restored.into_iter().collect()
    }
}
