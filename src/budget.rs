//! Dummy-bit budget derived from cover-image dimensions.
//!
//! The number of dummy bits is never stored or transmitted. Encoder and
//! decoder both recompute it from the pixel dimensions of the first and last
//! cover image, so both sides MUST observe the same cover images in the same
//! order. A mismatch produces a different count and therefore garbage output,
//! not an error.

use std::path::Path;

use image::image_dimensions;
use thiserror::Error;

use crate::random::SeededIndexGenerator;

/// Exclusive upper bound on the random part of the dummy count.
pub const MAX_DUMMY_COUNT: usize = 100;

/// Minimum number of dummy bits added to every derived count.
pub const MIN_DUMMY_COUNT: usize = 20;

/// Errors that can occur while deriving the dummy budget.
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("No cover images supplied")]
    NoCoverImages,

    #[error("Failed to read dimensions of '{path}': {reason}")]
    DimensionsUnavailable { path: String, reason: String },
}

/// Pixel dimensions of one cover image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Reads the pixel dimensions of an image file without decoding pixel data.
pub fn read_dimensions<P: AsRef<Path>>(path: P) -> Result<ImageDimensions, BudgetError> {
    let path = path.as_ref();
    let (width, height) =
        image_dimensions(path).map_err(|e| BudgetError::DimensionsUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    Ok(ImageDimensions { width, height })
}

/// Derives the dummy-bit count from an ordered list of cover dimensions.
///
/// Only the first and last entries participate (the same entry when a single
/// cover is supplied). The accumulator folds both areas, its decimal form
/// seeds a [`SeededIndexGenerator`], and one bounded draw yields the count.
/// The result always lies in `[MIN_DUMMY_COUNT, MIN_DUMMY_COUNT + MAX_DUMMY_COUNT)`.
///
/// Calling this twice with the same dimension list yields the same count -
/// that is the whole point: encode and decode agree without a side channel.
pub fn resolve_dummy_count(dimensions: &[ImageDimensions]) -> Result<usize, BudgetError> {
    let first = dimensions.first().ok_or(BudgetError::NoCoverImages)?;
    let last = dimensions.last().expect("non-empty after first() check");

    let mut accumulator: u128 = 1;
    for dims in [first, last] {
        let area = dims.area() as u128;
        accumulator = accumulator.wrapping_add(accumulator.wrapping_mul(area));
    }

    let mut generator = SeededIndexGenerator::new(&accumulator.to_string());
    Ok(generator.next_bounded(MAX_DUMMY_COUNT) + MIN_DUMMY_COUNT)
}
