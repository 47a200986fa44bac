use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while generating or writing model output.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("no atlas swatch for color ({0}, {1}, {2})")]
    MissingSwatch(u8, u8, u8),

    #[error("failed to write texture {path}: {source}")]
    TextureWrite {
        path: PathBuf,
        source: image::ImageError,
    },
}
