//! Pixel embedding of transformed bit-strings.
//!
//! The pipeline hands over a `"0101..."` bit-string; this module writes it
//! into the least significant bits of cover-image pixels and reads it back.

mod image;

pub use image::{CoverStack, StegoError, HEADER_BITS};
