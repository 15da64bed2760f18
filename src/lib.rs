//! # Pixelhide - Hide any file inside cover images
//!
//! Pixelhide turns arbitrary file content into an obfuscated bit-string and
//! embeds it into the least significant bits of cover-image pixels.
//!
//! ## Overview
//!
//! The heart of the crate is an invertible transformation pipeline. Every
//! stage is optional and independently toggleable, and decode runs the exact
//! mirror of encode:
//!
//! - **Compression** (DEFLATE) shrinks the payload before anything else
//! - **Encryption** (passphrase-derived ChaCha20-Poly1305) protects it
//! - **Binary encoding** turns the base64 text into a `"0101..."` bit-string
//! - **Dummy insertion** scatters seed-derived filler bits through the string
//! - **Permutation** reorders bit positions with a seeded shuffle
//!
//! The number of dummy bits is never stored or transmitted. Both sides
//! recompute it from the pixel dimensions of the first and last cover image,
//! fed through a seeded index generator - see [`budget`].
//!
//! ## Security Model
//!
//! - Wrong passphrase is detected (AEAD tag mismatch) and reported
//! - Wrong seed or dummy count is NOT detected: decode yields garbage,
//!   never an error - by design, so probing reveals nothing
//! - Decode stage order mirrors encode exactly; reordering corrupts silently
//!
//! ## Example Usage
//!
//! ```rust
//! use pixelhide::{PayloadCodec, PipelineParameters};
//!
//! let codec = PayloadCodec::new();
//! let params = PipelineParameters {
//!     passphrase: "secret".to_string(),
//!     use_compression: true,
//!     dummy_count: 42,
//!     random_seed: "shuffle-me".to_string(),
//! };
//!
//! let bits = codec.encode(b"hello pixels", &params).unwrap();
//! assert!(bits.chars().all(|c| c == '0' || c == '1'));
//!
//! let payload = codec.decode(&bits, &params).unwrap();
//! assert_eq!(payload, b"hello pixels");
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: pipeline orchestration (encode/decode)
//! - [`stage`]: the five stage capabilities and their default implementations
//! - [`budget`]: dummy-bit budget derived from cover-image dimensions
//! - [`random`]: seeded index generator shared by budget, dummy and shuffle
//! - [`stego`]: LSB embedding of bit-strings into cover images

pub mod budget;
pub mod codec;
pub mod random;
pub mod stage;
pub mod stego;

// Re-export commonly used types at the crate root
pub use budget::{read_dimensions, resolve_dummy_count, BudgetError, ImageDimensions};
pub use codec::{CodecError, PayloadCodec, PipelineParameters};
pub use random::SeededIndexGenerator;
pub use stage::{BinaryCodec, Compression, DummyInsertion, Encryption, FormatError, Permutation};
pub use stego::{CoverStack, StegoError};
