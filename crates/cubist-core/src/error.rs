use thiserror::Error;

/// Errors raised while turning decoded pixel data into a voxel grid.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("truncated pixel row: {len} bytes is not a multiple of 4")]
    TruncatedRow { len: usize },

    #[error("pixel buffer holds {actual} pixels, expected {expected} for {width}x{height}")]
    PixelCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
