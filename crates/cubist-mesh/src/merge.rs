//! Greedy run-length compaction of the voxel grid.
//!
//! Two passes mutate the grid in place. The row pass collapses horizontal
//! runs of same-colored opaque cells; the column pass then collapses
//! vertical runs out of whatever the row pass left untouched. A block is
//! either a horizontal run or a vertical run, never both: the column pass
//! only extends heads with `span.x == 1` and only absorbs cells with
//! `span.x == 1`.
//!
//! The current run head is held as an index into the grid array. Cells are
//! never removed, so the index stays valid for the whole scan.

use cubist_core::grid::VoxelGrid;

/// Collapse horizontal runs. Scans in raster order with a single run head.
///
/// A fully transparent cell is marked invisible and becomes the head
/// itself, so a run can neither continue across the gap nor start from it.
pub fn merge_rows(grid: &mut VoxelGrid) {
    let mut head: Option<usize> = None;
    for i in 0..grid.len() {
        let v = grid.voxel(i);
        if grid.color_of(&v).is_transparent() {
            grid.voxel_mut(i).visible = false;
            head = Some(i);
            continue;
        }
        match head {
            Some(h) if can_extend_row(grid, h, i) => {
                grid.voxel_mut(h).span.x += 1;
                grid.voxel_mut(i).visible = false;
            }
            _ => head = Some(i),
        }
    }
}

fn can_extend_row(grid: &VoxelGrid, head: usize, index: usize) -> bool {
    let hv = grid.voxel(head);
    let v = grid.voxel(index);
    let hc = grid.color_of(&hv);
    hv.pos.y == v.pos.y && !hc.is_transparent() && hc.rgb() == grid.color_of(&v).rgb()
}

/// Collapse vertical runs, one column at a time, scanning bottom to top
/// with a fresh head per column. A column run's head is therefore its
/// bottom-most cell and the run extends upward.
pub fn merge_columns(grid: &mut VoxelGrid) {
    for x in 0..grid.width() {
        let mut head: Option<usize> = None;
        for y in (0..grid.height()).rev() {
            let i = grid.index(x, y);
            match head {
                // a horizontal run can never be extended vertically
                Some(h) if grid.voxel(h).span.x > 1 => head = Some(i),
                Some(h) if can_extend_column(grid, h, i) => {
                    grid.voxel_mut(h).span.y += 1;
                    grid.voxel_mut(i).visible = false;
                }
                _ => head = Some(i),
            }
        }
    }
}

fn can_extend_column(grid: &VoxelGrid, head: usize, index: usize) -> bool {
    let hv = grid.voxel(head);
    let v = grid.voxel(index);
    v.visible
        && v.span.x == 1
        && hv.visible
        && grid.color_of(&hv).rgb() == grid.color_of(&v).rgb()
}
