//! Text/bit-string conversion stage.
//!
//! Expands each byte of the text into eight `'0'`/`'1'` characters, most
//! significant bit first, and collapses them back. The pipeline only ever
//! feeds this stage base64 (hence ASCII) text, so the bit-string length is
//! always a multiple of eight.

use thiserror::Error;

use super::BinaryCodec;

/// Bits produced per input byte.
pub const BITS_PER_BYTE: usize = 8;

/// Binary-encoding stage errors.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Bit-string contains invalid character '{0}'")]
    InvalidBitChar(char),

    #[error("Bit-string length {0} is not a multiple of {BITS_PER_BYTE}")]
    TruncatedBitString(usize),

    #[error("Decoded bytes are not valid UTF-8")]
    NotUtf8,

    #[error("Text is not valid base64: {0}")]
    InvalidBase64(String),
}

/// Byte-expanding [`BinaryCodec`] implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiBitCodec;

impl BinaryCodec for AsciiBitCodec {
    fn to_bits(&self, text: &str) -> Result<String, FormatError> {
        let mut bits = String::with_capacity(text.len() * BITS_PER_BYTE);
        for byte in text.as_bytes() {
            for shift in (0..BITS_PER_BYTE).rev() {
                bits.push(if (byte >> shift) & 1 == 1 { '1' } else { '0' });
            }
        }
        Ok(bits)
    }

    fn to_text(&self, bits: &str) -> Result<String, FormatError> {
        if bits.len() % BITS_PER_BYTE != 0 {
            return Err(FormatError::TruncatedBitString(bits.len()));
        }

        let mut bytes = Vec::with_capacity(bits.len() / BITS_PER_BYTE);
        let mut current = 0u8;
        for (i, c) in bits.chars().enumerate() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                other => return Err(FormatError::InvalidBitChar(other)),
            };
            current = (current << 1) | bit;
            if i % BITS_PER_BYTE == BITS_PER_BYTE - 1 {
                bytes.push(current);
                current = 0;
            }
        }

        String::from_utf8(bytes).map_err(|_| FormatError::NotUtf8)
    }
}
