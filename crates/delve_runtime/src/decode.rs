//! Image decoding backed by the `image` crate

use delve_asset::{DecodeError, Decoder};
use image::{ImageError, RgbaImage};
use std::path::Path;

/// Decodes image files into RGBA bitmaps.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl Decoder for ImageDecoder {
    type Asset = RgbaImage;

    fn decode(&self, path: &Path) -> Result<RgbaImage, DecodeError> {
        match image::open(path) {
            Ok(image) => Ok(image.to_rgba8()),
            Err(ImageError::IoError(err)) => Err(DecodeError::Io(err)),
            Err(err) => Err(DecodeError::malformed(err)),
        }
    }

    /// A single transparent pixel.
    fn placeholder(&self) -> RgbaImage {
        RgbaImage::new(1, 1)
    }
}
