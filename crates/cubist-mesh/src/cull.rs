//! Lateral face culling for merged blocks.
//!
//! Adjacency is tested against the raw per-pixel opaque set, not against
//! merged footprints, so the verdict is exact no matter how the neighbors
//! were compacted.

use cubist_core::face::{FaceSet, LATERAL_FACES};
use cubist_core::grid::{Voxel, VoxelGrid};
use glam::IVec2;

/// Decide, for every surviving block, which lateral faces are pressed
/// against opaque neighbors along the block's whole footprint.
///
/// Pure function of the opaque set and the spans; running it again over
/// the same merged grid reproduces the same exclusion sets.
pub fn cull_faces(grid: &mut VoxelGrid) {
    for i in 0..grid.len() {
        let v = grid.voxel(i);
        if !v.visible {
            continue;
        }
        let hidden = hidden_faces(grid, &v);
        grid.voxel_mut(i).hidden = hidden;
    }
}

/// A face stays hidden only if every cell of the span has an opaque
/// neighbor on that side. One gap anywhere forces the whole face to be
/// drawn, and no later cell can revert that.
fn hidden_faces(grid: &VoxelGrid, v: &Voxel) -> FaceSet {
    let mut hidden = FaceSet::all();
    for dx in 0..v.span.x {
        probe(grid, v.pos + IVec2::new(dx, 0), &mut hidden);
    }
    // vertical runs extend upward from the head cell
    for dy in 1..v.span.y {
        probe(grid, v.pos - IVec2::new(0, dy), &mut hidden);
    }
    hidden
}

fn probe(grid: &VoxelGrid, cell: IVec2, hidden: &mut FaceSet) {
    for face in LATERAL_FACES {
        if !grid.is_opaque(cell + face.offset()) {
            hidden.remove(face);
        }
    }
}
