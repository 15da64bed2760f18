//! Stage capabilities of the transformation pipeline.
//!
//! Each stage is a small trait with a forward and an inverse operation. The
//! [`PayloadCodec`](crate::codec::PayloadCodec) depends only on these traits,
//! never on concrete algorithms, so any compliant implementation (including
//! test doubles) can be substituted at construction time.
//!
//! Stages are stateless with respect to payload data: implementations must
//! not retain anything across calls, and any seeded randomness is rebuilt
//! from the given seed on every call.

mod binary;
mod compression;
mod dummy;
mod encryption;
mod permutation;

pub use binary::{AsciiBitCodec, FormatError};
pub use compression::{CompressionError, DeflateCompression};
pub use dummy::SeededDummyInsertion;
pub use encryption::{EncryptionError, PassphraseEncryption};
pub use permutation::SeededPermutation;

/// Reversible byte-array compression.
pub trait Compression: Send + Sync {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Inverse of [`compress`](Compression::compress). Fails on input that is
    /// not a valid compressed stream.
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;
}

/// Passphrase-based reversible text encryption.
pub trait Encryption: Send + Sync {
    fn encrypt(&self, plaintext: &str, passphrase: &str) -> Result<String, EncryptionError>;

    /// Inverse of [`encrypt`](Encryption::encrypt). Fails on a wrong
    /// passphrase or corrupted ciphertext.
    fn decrypt(&self, ciphertext: &str, passphrase: &str) -> Result<String, EncryptionError>;
}

/// Lossless conversion between text and a `"0101..."` bit-string.
pub trait BinaryCodec: Send + Sync {
    fn to_bits(&self, text: &str) -> Result<String, FormatError>;

    /// Inverse of [`to_bits`](BinaryCodec::to_bits). Fails on characters
    /// outside `{'0','1'}` or a length that is not a whole number of bytes.
    fn to_text(&self, bits: &str) -> Result<String, FormatError>;
}

/// Seed-keyed insertion and removal of filler bits.
///
/// Both operations are infallible by contract: a count or seed that does not
/// match the encode-time values yields a corrupted bit-string, never an
/// error. Callers cannot detect the mismatch here.
pub trait DummyInsertion: Send + Sync {
    fn insert(&self, count: usize, bits: &str, seed: &str) -> String;

    fn remove(&self, count: usize, bits: &str, seed: &str) -> String;
}

/// Seeded reordering of bit positions.
///
/// Like [`DummyInsertion`], a mismatched seed silently corrupts rather than
/// failing.
pub trait Permutation: Send + Sync {
    fn permute(&self, bits: &str, seed: &str) -> String;

    fn restore(&self, bits: &str, seed: &str) -> String;
}
