//! Dummy-bit insertion stage.
//!
//! Scatters a fixed number of filler bits through the bit-string at
//! positions drawn from a [`SeededIndexGenerator`]. Removal replays the
//! identical draw sequence against the reconstructed pre-insertion length
//! and deletes the positions in reverse.
//!
//! There is no integrity check: a count or seed that differs from the
//! encode-time values removes the wrong positions and yields garbage. That
//! is the documented contract - probing with wrong parameters reveals
//! nothing.

use crate::random::SeededIndexGenerator;

use super::DummyInsertion;

/// Generator-driven [`DummyInsertion`] implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeededDummyInsertion;

impl DummyInsertion for SeededDummyInsertion {
    fn insert(&self, count: usize, bits: &str, seed: &str) -> String {
        let mut generator = SeededIndexGenerator::new(seed);
        let mut out: Vec<char> = bits.chars().collect();

        // Per dummy bit: one position draw, one value draw, in that order.
        // Removal replays exactly this sequence.
        for _ in 0..count {
            let position = generator.next_bounded(out.len() + 1);
            let filler = generator.next_bit();
            out.insert(position, filler);
        }

        out.into_iter().collect()
    }

    fn remove(&self, count: usize, bits: &str, seed: &str) -> String {
        let mut generator = SeededIndexGenerator::new(seed);
        let mut out: Vec<char> = bits.chars().collect();

        // Replay the insertion-time position draws; lengths grow from the
        // pre-insertion length one bit at a time.
        let mut length = out.len().saturating_sub(count);
        let mut positions = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(generator.next_bounded(length + 1));
            let _ = generator.next_bit();
            length += 1;
        }

        // Last inserted is removed first so earlier positions stay valid.
        for position in positions.into_iter().rev() {
            if position < out.len() {
                out.remove(position);
            }
        }

        out.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove_roundtrip() {
        let stage = SeededDummyInsertion;
        let bits = "0110100101101001";

        let padded = stage.insert(24, bits, "roundtrip");
        assert_eq!(padded.len(), bits.len() + 24);

        let restored = stage.remove(24, &padded, "roundtrip");
        assert_eq!(restored, bits);
    }

    #[test]
    fn test_zero_count_is_identity() {
        let stage = SeededDummyInsertion;
        let bits = "10101010";

        assert_eq!(stage.insert(0, bits, "seed"), bits);
        assert_eq!(stage.remove(0, bits, "seed"), bits);
    }

    #[test]
    fn test_empty_bits_roundtrip() {
        let stage = SeededDummyInsertion;

        let padded = stage.insert(10, "", "seed");
        assert_eq!(padded.len(), 10);

        let restored = stage.remove(10, &padded, "seed");
        assert!(restored.is_empty());
    }

    #[test]
    fn test_insertion_is_deterministic() {
        let stage = SeededDummyInsertion;
        let bits = "11110000";

        let a = stage.insert(12, bits, "fixed");
        let b = stage.insert(12, bits, "fixed");

        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_place_differently() {
        let stage = SeededDummyInsertion;
        let bits = "1010101010101010101010101010";

        let a = stage.insert(20, bits, "seed-one");
        let b = stage.insert(20, bits, "seed-two");

        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_seed_corrupts_silently() {
        let stage = SeededDummyInsertion;
        let bits = "011010010110100101101001";

        let padded = stage.insert(16, bits, "right");
        let restored = stage.remove(16, &padded, "wrong");

        // Same length, no panic, but almost certainly not the original.
        assert_eq!(restored.len(), bits.len());
        assert_ne!(restored, bits);
    }

    #[test]
    fn test_wrong_count_corrupts_silently() {
        let stage = SeededDummyInsertion;
        let bits = "011010010110100101101001";

        let padded = stage.insert(16, bits, "seed");
        let restored = stage.remove(12, &padded, "seed");

        assert_eq!(restored.len(), bits.len() + 4);
        assert_ne!(restored, bits);
    }

    #[test]
    fn test_count_exceeding_length_does_not_panic() {
        let stage = SeededDummyInsertion;

        // Nonsense input on the remove side must degrade, not panic.
        let out = stage.remove(100, "0101", "seed");
        assert!(out.len() <= 4);
    }

    #[test]
    fn test_empty_seed_roundtrips() {
        let stage = SeededDummyInsertion;
        let bits = "010101010101";

        let padded = stage.insert(8, bits, "");
        let restored = stage.remove(8, &padded, "");

        assert_eq!(restored, bits);
    }
}
