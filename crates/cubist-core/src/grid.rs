use std::collections::HashSet;

use glam::IVec2;

use crate::color::{ColorId, Palette, Rgba};
use crate::error::GridError;
use crate::face::FaceSet;

/// One cell of the voxel grid.
///
/// Merging never deletes cells: an absorbed cell stays in the grid flagged
/// invisible, and the surviving head cell's `span` records the block
/// footprint in pixels. Horizontal runs grow `span.x` rightward from the
/// head; vertical runs grow `span.y` upward from the head, whose own
/// position is the bottom cell of the run. At most one of the two spans
/// ever exceeds 1.
#[derive(Debug, Clone, Copy)]
pub struct Voxel {
    pub pos: IVec2,
    pub color: ColorId,
    pub span: IVec2,
    pub visible: bool,
    /// Lateral faces hidden against neighboring opaque cells.
    pub hidden: FaceSet,
}

/// Row-major grid of voxels built once from decoded RGBA8 pixels and then
/// optimized in place.
#[derive(Debug)]
pub struct VoxelGrid {
    width: u32,
    height: u32,
    voxels: Vec<Voxel>,
    palette: Palette,
    /// Positions of every pixel with alpha > 0, independent of merging.
    opaque: HashSet<(i32, i32)>,
}

impl VoxelGrid {
    /// Build a grid from a row-major RGBA8 pixel buffer (4 bytes per pixel).
    pub fn build(width: u32, height: u32, pixels: &[u8]) -> Result<Self, GridError> {
        if pixels.len() % 4 != 0 {
            return Err(GridError::TruncatedRow { len: pixels.len() });
        }
        let expected = width as usize * height as usize;
        let actual = pixels.len() / 4;
        if actual != expected {
            return Err(GridError::PixelCountMismatch {
                width,
                height,
                expected,
                actual,
            });
        }

        let mut palette = Palette::new();
        let mut voxels = Vec::with_capacity(expected);
        let mut opaque = HashSet::new();
        for (i, px) in pixels.chunks_exact(4).enumerate() {
            let x = (i % width as usize) as i32;
            let y = (i / width as usize) as i32;
            let color = Rgba::new(px[0], px[1], px[2], px[3]);
            if !color.is_transparent() {
                opaque.insert((x, y));
            }
            voxels.push(Voxel {
                pos: IVec2::new(x, y),
                color: palette.intern(color),
                span: IVec2::ONE,
                visible: true,
                hidden: FaceSet::empty(),
            });
        }

        Ok(Self {
            width,
            height,
            voxels,
            palette,
            opaque,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells (width × height).
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Flat index of the cell at (x, y). Both must be in range.
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn voxel(&self, index: usize) -> Voxel {
        self.voxels[index]
    }

    pub fn voxel_mut(&mut self, index: usize) -> &mut Voxel {
        &mut self.voxels[index]
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Resolve a voxel's interned color.
    pub fn color_of(&self, voxel: &Voxel) -> Rgba {
        self.palette.get(voxel.color)
    }

    /// O(1) membership test against raw per-pixel opacity. Out-of-range
    /// coordinates are simply absent.
    pub fn is_opaque(&self, pos: IVec2) -> bool {
        self.opaque.contains(&(pos.x, pos.y))
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(pixels: &[[u8; 4]]) -> Vec<u8> {
        pixels.iter().flatten().copied().collect()
    }

    #[test]
    fn test_build_assigns_raster_positions() {
        let data = rgba(&[
            [1, 0, 0, 255],
            [2, 0, 0, 255],
            [3, 0, 0, 255],
            [4, 0, 0, 255],
        ]);
        let grid = VoxelGrid::build(2, 2, &data).expect("grid");
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.voxel(0).pos, IVec2::new(0, 0));
        assert_eq!(grid.voxel(1).pos, IVec2::new(1, 0));
        assert_eq!(grid.voxel(2).pos, IVec2::new(0, 1));
        assert_eq!(grid.voxel(3).pos, IVec2::new(1, 1));
        assert_eq!(grid.index(1, 1), 3);
    }

    #[test]
    fn test_build_records_opaque_footprint() {
        let data = rgba(&[[9, 9, 9, 255], [9, 9, 9, 0], [9, 9, 9, 1], [9, 9, 9, 0]]);
        let grid = VoxelGrid::build(2, 2, &data).expect("grid");
        assert!(grid.is_opaque(IVec2::new(0, 0)));
        assert!(!grid.is_opaque(IVec2::new(1, 0)));
        assert!(grid.is_opaque(IVec2::new(0, 1)));
        assert!(!grid.is_opaque(IVec2::new(1, 1)));
        assert!(!grid.is_opaque(IVec2::new(-1, 0)));
        assert!(!grid.is_opaque(IVec2::new(0, 2)));
    }

    #[test]
    fn test_build_shares_palette_entries() {
        let data = rgba(&[[5, 5, 5, 255], [5, 5, 5, 255], [6, 6, 6, 255], [5, 5, 5, 255]]);
        let grid = VoxelGrid::build(2, 2, &data).expect("grid");
        assert_eq!(grid.palette().len(), 2);
        assert_eq!(grid.voxel(0).color, grid.voxel(1).color);
        assert_eq!(grid.voxel(0).color, grid.voxel(3).color);
        assert_ne!(grid.voxel(0).color, grid.voxel(2).color);
    }

    #[test]
    fn test_build_rejects_truncated_row() {
        let err = VoxelGrid::build(1, 1, &[1, 2, 3]).expect_err("must fail");
        assert!(matches!(err, GridError::TruncatedRow { len: 3 }));
    }

    #[test]
    fn test_build_rejects_pixel_count_mismatch() {
        let data = rgba(&[[0, 0, 0, 255], [0, 0, 0, 255]]);
        let err = VoxelGrid::build(2, 2, &data).expect_err("must fail");
        assert!(matches!(err, GridError::PixelCountMismatch { expected: 4, actual: 2, .. }));
    }

    #[test]
    fn test_new_voxels_default_footprint() {
        let data = rgba(&[[1, 2, 3, 255]]);
        let grid = VoxelGrid::build(1, 1, &data).expect("grid");
        let v = grid.voxel(0);
        assert_eq!(v.span, IVec2::ONE);
        assert!(v.visible);
        assert!(v.hidden.is_empty());
    }
}
