//! Input image decoding and validation.

use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage};
use thiserror::Error;

/// A validated image, normalized to row-major RGBA8.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("image must use 8 bits per channel, found {0:?}")]
    UnsupportedBitDepth(ColorType),

    #[error("image must carry an alpha channel, found {0:?}")]
    MissingAlpha(ColorType),
}

/// Decode and validate the input image.
pub fn load(path: &Path) -> Result<DecodedImage, DecodeError> {
    let img = image::open(path).map_err(|source| DecodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    validate(img)
}

/// Accept 8-bit images with an alpha channel, anything else is rejected
/// before geometry work starts.
fn validate(img: DynamicImage) -> Result<DecodedImage, DecodeError> {
    match img.color() {
        ColorType::Rgba8 | ColorType::La8 => {}
        ColorType::Rgb8 | ColorType::L8 => return Err(DecodeError::MissingAlpha(img.color())),
        other => return Err(DecodeError::UnsupportedBitDepth(other)),
    }
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    if width >= 256 && height >= 256 {
        log::warn!("{width}x{height} input: high-res images may produce far too many vertices");
    }
    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}
