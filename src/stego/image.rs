//! LSB (Least Significant Bit) embedding across an ordered cover stack.
//!
//! The bit-string is written sequentially into the RGB channel LSBs of each
//! cover image in order, spilling into the next image when one fills up.
//! Lossless output formats only (PNG, BMP).
//!
//! Format: [32-bit big-endian bit count] + [payload bits]
//!
//! The cover ORDER is part of the contract: the decoder must present the
//! same images in the same order, both for extraction and for the dummy
//! budget derived from the first and last cover's dimensions.

use image::{DynamicImage, GenericImageView};
use std::path::Path;
use thiserror::Error;

use crate::budget::ImageDimensions;

/// Bits reserved for the payload-length header.
pub const HEADER_BITS: usize = 32;

/// Channels carrying data per pixel (RGB; alpha is left untouched).
const CHANNELS: usize = 3;

/// Errors that can occur during pixel embedding or extraction.
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("Covers too small: need {needed} bits, have capacity for {capacity}")]
    CoversTooSmall { needed: usize, capacity: usize },

    #[error("No cover images supplied")]
    NoCoverImages,

    #[error("Bit-string contains invalid character '{0}'")]
    InvalidBitString(char),

    #[error("No hidden data found in covers")]
    NoDataFound,

    #[error("Image load error: {0}")]
    ImageLoadError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),
}

/// An ordered stack of cover images carrying one embedded bit-string.
pub struct CoverStack {
    images: Vec<DynamicImage>,
}

impl CoverStack {
    /// Loads a stack from image files, preserving order.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, StegoError> {
        if paths.is_empty() {
            return Err(StegoError::NoCoverImages);
        }

        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            let img = image::open(path.as_ref())
                .map_err(|e| StegoError::ImageLoadError(e.to_string()))?;
            images.push(img);
        }
        Ok(Self { images })
    }

    /// Creates a stack from already-loaded images.
    pub fn from_images(images: Vec<DynamicImage>) -> Result<Self, StegoError> {
        if images.is_empty() {
            return Err(StegoError::NoCoverImages);
        }
        Ok(Self { images })
    }

    /// Pixel dimensions of every cover, in stack order.
    pub fn dimensions(&self) -> Vec<ImageDimensions> {
        self.images
            .iter()
            .map(|img| {
                let (width, height) = img.dimensions();
                ImageDimensions { width, height }
            })
            .collect()
    }

    /// Usable payload capacity in bits, header already subtracted.
    pub fn capacity_bits(&self) -> usize {
        let raw: usize = self
            .images
            .iter()
            .map(|img| {
                let (width, height) = img.dimensions();
                width as usize * height as usize * CHANNELS
            })
            .sum();
        raw.saturating_sub(HEADER_BITS)
    }

    /// Embeds a bit-string, returning new images with the data written in.
    ///
    /// The originals are not modified; callers save the returned images.
    pub fn embed(&self, bits: &str) -> Result<Vec<DynamicImage>, StegoError> {
        let capacity = self.capacity_bits();
        if bits.len() > capacity {
            return Err(StegoError::CoversTooSmall {
                needed: bits.len() + HEADER_BITS,
                capacity,
            });
        }

        // Header then payload, one u8 per bit.
        let mut stream = Vec::with_capacity(HEADER_BITS + bits.len());
        for byte in (bits.len() as u32).to_be_bytes() {
            for shift in (0..8).rev() {
                stream.push((byte >> shift) & 1);
            }
        }
        for c in bits.chars() {
            match c {
                '0' => stream.push(0),
                '1' => stream.push(1),
                other => return Err(StegoError::InvalidBitString(other)),
            }
        }

        let mut outputs = Vec::with_capacity(self.images.len());
        let mut bit_index = 0;

        for img in &self.images {
            let mut canvas = img.to_rgba8();
            let (width, height) = canvas.dimensions();

            'pixels: for y in 0..height {
                for x in 0..width {
                    if bit_index >= stream.len() {
                        break 'pixels;
                    }

                    let pixel = canvas.get_pixel_mut(x, y);
                    for channel in 0..CHANNELS {
                        if bit_index >= stream.len() {
                            break;
                        }
                        pixel.0[channel] = (pixel.0[channel] & 0xFE) | stream[bit_index];
                        bit_index += 1;
                    }
                }
            }

            outputs.push(DynamicImage::ImageRgba8(canvas));
        }

        Ok(outputs)
    }

    /// Extracts the embedded bit-string from the stack.
    pub fn extract(&self) -> Result<String, StegoError> {
        let capacity = self.capacity_bits();
        let mut collected: Vec<u8> = Vec::new();
        let mut payload_len: Option<usize> = None;

        'images: for img in &self.images {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();

            for y in 0..height {
                for x in 0..width {
                    let pixel = rgba.get_pixel(x, y);
                    for channel in 0..CHANNELS {
                        collected.push(pixel.0[channel] & 1);

                        if collected.len() == HEADER_BITS {
                            let mut len_bytes = [0u8; 4];
                            for (i, bit) in collected.iter().enumerate() {
                                len_bytes[i / 8] |= bit << (7 - (i % 8));
                            }
                            let declared = u32::from_be_bytes(len_bytes) as usize;
                            if declared > capacity {
                                return Err(StegoError::NoDataFound);
                            }
                            payload_len = Some(declared);
                        }

                        if let Some(len) = payload_len {
                            if collected.len() == HEADER_BITS + len {
                                break 'images;
                            }
                        }
                    }
                }
            }
        }

        let len = payload_len.ok_or(StegoError::NoDataFound)?;
        if collected.len() < HEADER_BITS + len {
            return Err(StegoError::NoDataFound);
        }

        Ok(collected[HEADER_BITS..HEADER_BITS + len]
            .iter()
            .map(|&b| if b == 1 { '1' } else { '0' })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn test_image(width: u32, height: u32) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_capacity() {
        let stack = CoverStack::from_images(vec![test_image(100, 100)]).unwrap();

        // 100x100 pixels * 3 channels - 32 header bits
        assert_eq!(stack.capacity_bits(), 30_000 - 32);
    }

    #[test]
    fn test_embed_extract_roundtrip() {
        let stack = CoverStack::from_images(vec![test_image(100, 100)]).unwrap();
        let bits = "011010010110100101101001";

        let carrying = stack.embed(bits).unwrap();
        let loaded = CoverStack::from_images(carrying).unwrap();

        assert_eq!(loaded.extract().unwrap(), bits);
    }

    #[test]
    fn test_payload_spills_across_covers() {
        // Two tiny covers: 4x4*3 = 48 bits each, 96 total, 64 usable
        let stack =
            CoverStack::from_images(vec![test_image(4, 4), test_image(4, 4)]).unwrap();
        let bits: String = (0..60).map(|i| if i % 3 == 0 { '1' } else { '0' }).collect();

        let carrying = stack.embed(&bits).unwrap();
        assert_eq!(carrying.len(), 2);

        let loaded = CoverStack::from_images(carrying).unwrap();
        assert_eq!(loaded.extract().unwrap(), bits);
    }

    #[test]
    fn test_empty_bit_string() {
        let stack = CoverStack::from_images(vec![test_image(10, 10)]).unwrap();

        let carrying = stack.embed("").unwrap();
        let loaded = CoverStack::from_images(carrying).unwrap();

        assert_eq!(loaded.extract().unwrap(), "");
    }

    #[test]
    fn test_covers_too_small() {
        let stack = CoverStack::from_images(vec![test_image(2, 2)]).unwrap();
        let bits = "01".repeat(100);

        let result = stack.embed(&bits);
        assert!(matches!(result, Err(StegoError::CoversTooSmall { .. })));
    }

    #[test]
    fn test_invalid_bit_character() {
        let stack = CoverStack::from_images(vec![test_image(10, 10)]).unwrap();

        let result = stack.embed("01x0");
        assert!(matches!(result, Err(StegoError::InvalidBitString('x'))));
    }

    #[test]
    fn test_extract_from_clean_cover() {
        // A cover that never carried data: the header decodes to some bogus
        // length. Either it exceeds capacity (error) or it reads LSB noise -
        // both are acceptable "no data" behaviors; it must not panic.
        let stack = CoverStack::from_images(vec![test_image(8, 8)]).unwrap();
        let _ = stack.extract();
    }

    #[test]
    fn test_dimensions_in_order() {
        let stack =
            CoverStack::from_images(vec![test_image(30, 20), test_image(50, 40)]).unwrap();

        let dims = stack.dimensions();
        assert_eq!(dims[0], ImageDimensions::new(30, 20));
        assert_eq!(dims[1], ImageDimensions::new(50, 40));
    }

    #[test]
    fn test_no_cover_images() {
        assert!(matches!(
            CoverStack::from_images(vec![]),
            Err(StegoError::NoCoverImages)
        ));
    }
}
