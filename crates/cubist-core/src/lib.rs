pub mod color;
pub mod error;
pub mod face;
pub mod grid;

pub use color::{ColorId, Palette, Rgba};
pub use error::GridError;
pub use face::{Face, FaceSet, LATERAL_FACES};
pub use grid::{Voxel, VoxelGrid};
