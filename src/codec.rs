//! Payload transformation pipeline.
//!
//! [`PayloadCodec`] orchestrates the five stage capabilities in a fixed
//! forward order for encode and the exact mirrored reverse order for decode:
//!
//! encode: bytes -> compress? -> base64 -> encrypt? -> bits -> dummies? -> permute?
//! decode: restore? -> remove dummies? -> text -> decrypt? -> base64 -> decompress?
//!
//! Each stage is optional and independently toggleable through
//! [`PipelineParameters`]; no stage assumes another ran. The decode order
//! being the exact reverse is load-bearing: applying inverses out of order
//! usually corrupts the output WITHOUT raising an error, because the
//! seed-keyed stages cannot detect misapplication. Preserve the order.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

use crate::stage::{
    AsciiBitCodec, BinaryCodec, Compression, DeflateCompression, DummyInsertion, Encryption,
    FormatError, PassphraseEncryption, Permutation, SeededDummyInsertion, SeededPermutation,
};

/// Errors surfaced by the pipeline.
///
/// Seed or dummy-count mismatches are NOT represented here: the dummy and
/// permutation stages corrupt silently by contract.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A compression or encryption stage failed; the originating failure is
    /// preserved as the source cause.
    #[error("Transformation failed while {step}")]
    Transformation {
        step: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Text or bit-string input could not be parsed.
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}

impl CodecError {
    fn while_doing(
        step: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transformation {
            step,
            source: Box::new(source),
        }
    }
}

/// Parameters supplied identically to encode and decode.
///
/// An empty passphrase disables encryption, a zero dummy count disables
/// dummy insertion, an empty seed disables permutation. Supplying a
/// passphrase that differs from encode time fails decode; a differing seed
/// or dummy count yields garbage without an error.
#[derive(Debug, Clone, Default)]
pub struct PipelineParameters {
    pub passphrase: String,
    pub use_compression: bool,
    pub dummy_count: usize,
    pub random_seed: String,
}

/// Pipeline orchestrator over five injected stage capabilities.
///
/// Holds no payload state; every call is self-contained, so one codec may
/// serve concurrent calls from independent threads.
pub struct PayloadCodec {
    compression: Box<dyn Compression>,
    encryption: Box<dyn Encryption>,
    binary: Box<dyn BinaryCodec>,
    dummy: Box<dyn DummyInsertion>,
    permutation: Box<dyn Permutation>,
}

impl Default for PayloadCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadCodec {
    /// Creates a codec wired with the default stage implementations.
    pub fn new() -> Self {
        Self {
            compression: Box::new(DeflateCompression),
            encryption: Box::new(PassphraseEncryption),
            binary: Box::new(AsciiBitCodec),
            dummy: Box::new(SeededDummyInsertion),
            permutation: Box::new(SeededPermutation),
        }
    }

    /// Creates a codec from explicit stage implementations.
    ///
    /// This is the substitution point for alternative algorithms and for
    /// test doubles; no global registry exists.
    pub fn with_stages(
        compression: Box<dyn Compression>,
        encryption: Box<dyn Encryption>,
        binary: Box<dyn BinaryCodec>,
        dummy: Box<dyn DummyInsertion>,
        permutation: Box<dyn Permutation>,
    ) -> Self {
        Self {
            compression,
            encryption,
            binary,
            dummy,
            permutation,
        }
    }

    /// Transforms a payload into the bit-string ready for pixel embedding.
    pub fn encode(&self, payload: &[u8], params: &PipelineParameters) -> Result<String, CodecError> {
        let bytes = if params.use_compression {
            self.compression
                .compress(payload)
                .map_err(|e| CodecError::while_doing("compressing content", e))?
        } else {
            payload.to_vec()
        };

        let mut text = BASE64.encode(&bytes);

        if !params.passphrase.is_empty() {
            text = self
                .encryption
                .encrypt(&text, &params.passphrase)
                .map_err(|e| CodecError::while_doing("encrypting content", e))?;
        }

        let mut bits = self.binary.to_bits(&text)?;

        if params.dummy_count > 0 {
            bits = self.dummy.insert(params.dummy_count, &bits, &params.random_seed);
        }

        if !params.random_seed.is_empty() {
            bits = self.permutation.permute(&bits, &params.random_seed);
        }

        Ok(bits)
    }

    /// Recovers the original payload from an extracted bit-string.
    ///
    /// Runs the exact mirror of [`encode`](PayloadCodec::encode).
    pub fn decode(&self, bits: &str, params: &PipelineParameters) -> Result<Vec<u8>, CodecError> {
        let mut bits = bits.to_string();

        if !params.random_seed.is_empty() {
            bits = self.permutation.restore(&bits, &params.random_seed);
        }

        if params.dummy_count > 0 {
            bits = self.dummy.remove(params.dummy_count, &bits, &params.random_seed);
        }

        let mut text = self.binary.to_text(&bits)?;

        if !params.passphrase.is_empty() {
            text = self
                .encryption
                .decrypt(&text, &params.passphrase)
                .map_err(|e| CodecError::while_doing("decrypting content", e))?;
        }

        let bytes = BASE64
            .decode(text.trim())
            .map_err(|e| CodecError::Format(FormatError::InvalidBase64(e.to_string())))?;

        if params.use_compression {
            self.compression
                .decompress(&bytes)
                .map_err(|e| CodecError::while_doing("decompressing content", e))
        } else {
            Ok(bytes)
        }
    }
}
