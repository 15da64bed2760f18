//! Seeded pseudo-random index generation.
//!
//! Everywhere encode and decode must agree on a value without communicating,
//! they construct a [`SeededIndexGenerator`] from the same string seed and
//! draw the same sequence. A fresh generator is built per call; none is ever
//! shared across calls.

use hkdf::Hkdf;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

/// HKDF salt for string-seed expansion.
const SALT_INDEX: &[u8] = b"PIXELHIDE-INDEX-V1";

/// Deterministic bounded-integer source constructed from a string seed.
///
/// The same seed and the same call sequence always produce the same values.
/// Different seeds produce unrelated sequences.
pub struct SeededIndexGenerator {
    rng: ChaCha20Rng,
}

impl SeededIndexGenerator {
    /// Creates a generator from a string seed.
    pub fn new(seed: &str) -> Self {
        Self {
            rng: ChaCha20Rng::from_seed(derive_seed(seed.as_bytes(), SALT_INDEX)),
        }
    }

    /// Draws the next integer in `[0, bound)`.
    ///
    /// # Panics
    /// Panics if `bound` is zero.
    pub fn next_bounded(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    /// Draws the next filler bit character, `'0'` or `'1'`.
    pub fn next_bit(&mut self) -> char {
        if self.next_bounded(2) == 0 {
            '0'
        } else {
            '1'
        }
    }
}

/// Derives a 32-byte RNG seed from arbitrary input using HKDF-SHA256.
pub(crate) fn derive_seed(input: &[u8], salt: &[u8]) -> [u8; 32] {
    let hk = Hkdf::<Sha256>::new(Some(salt), input);
    let mut output = [0u8; 32];
    hk.expand(b"seed", &mut output)
        .expect("HKDF expand should not fail");
    output
}
