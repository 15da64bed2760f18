//! Payload compression stage.
//!
//! Uses DEFLATE to shrink the payload before any other stage runs. When
//! DEFLATE does not actually reduce the size (already-compressed or tiny
//! payloads), the data is stored as-is behind a marker byte so decompression
//! stays unambiguous.

use flate2::read::{DeflateDecoder, DeflateEncoder};
use flate2::Compression as DeflateLevel;
use std::io::Read;
use thiserror::Error;

use super::Compression;

/// Marker byte: payload stored uncompressed.
const MARKER_STORED: u8 = 0;

/// Marker byte: payload is a DEFLATE stream.
const MARKER_DEFLATE: u8 = 1;

/// Compression stage errors.
#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Compression failed: {0}")]
    CompressionFailed(String),

    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),
}

/// DEFLATE-backed [`Compression`] implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeflateCompression;

impl Compression for DeflateCompression {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        if data.is_empty() {
            return Ok(vec![MARKER_STORED]);
        }

        let mut encoder = DeflateEncoder::new(data, DeflateLevel::best());
        let mut compressed = Vec::new();
        encoder
            .read_to_end(&mut compressed)
            .map_err(|e| CompressionError::CompressionFailed(e.to_string()))?;

        // Only keep the DEFLATE stream if it actually won
        if compressed.len() < data.len() {
            let mut result = Vec::with_capacity(compressed.len() + 1);
            result.push(MARKER_DEFLATE);
            result.extend(compressed);
            Ok(result)
        } else {
            let mut result = Vec::with_capacity(data.len() + 1);
            result.push(MARKER_STORED);
            result.extend(data);
            Ok(result)
        }
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let (marker, payload) = data
            .split_first()
            .ok_or_else(|| CompressionError::DecompressionFailed("Empty data".to_string()))?;

        match *marker {
            MARKER_STORED => Ok(payload.to_vec()),
            MARKER_DEFLATE => {
                let mut decoder = DeflateDecoder::new(payload);
                let mut decompressed = Vec::new();
                decoder
                    .read_to_end(&mut decompressed)
                    .map_err(|e| CompressionError::DecompressionFailed(e.to_string()))?;
                Ok(decompressed)
            }
            other => Err(CompressionError::DecompressionFailed(format!(
                "Invalid marker byte: {}",
                other
            ))),
        }
    }
}
