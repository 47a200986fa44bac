//! World-space cuboid emission and the collision proxy.

use cubist_core::face::FaceSet;
use cubist_core::grid::VoxelGrid;
use glam::{IVec2, Vec3};

use crate::atlas::ColorAtlas;
use crate::error::EmitError;
use crate::smd::SmdModel;

/// Caller-supplied cuboid dimensions of one pixel, in scene units.
#[derive(Debug, Clone, Copy)]
pub struct CubeDims {
    pub width: u32,
    pub depth: u32,
    pub height: u32,
}

/// How the collision proxy box is sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionMode {
    /// One box fitted exactly to the opaque bounding rectangle.
    AutoFit,
    /// One box covering `scale ×` the full image, centered on it.
    Scaled(f32),
}

/// Inclusive pixel-space bounds of all opaque cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: IVec2,
    pub max: IVec2,
}

impl Bounds {
    fn include(&mut self, pos: IVec2) {
        self.min = self.min.min(pos);
        self.max = self.max.max(pos);
    }
}

/// Convert every surviving block into world-space cuboid triangles.
///
/// The model is centered on the image midpoint: grid x maps to the model's
/// Y axis, grid y (downward) maps to -Z, and X carries the constant depth.
/// Also returns the bounding box over all opaque pixels, merged-away cells
/// included, for the collision proxy to fit later. `material` is the
/// texture file name each triangle references.
pub fn emit_model(
    grid: &VoxelGrid,
    atlas: &ColorAtlas,
    dims: CubeDims,
    material: &str,
) -> Result<(SmdModel, Option<Bounds>), EmitError> {
    let mut model = SmdModel::new();
    let mut bounds: Option<Bounds> = None;

    for v in grid.voxels() {
        let color = grid.color_of(v);
        if color.is_transparent() {
            continue;
        }
        match bounds.as_mut() {
            Some(b) => b.include(v.pos),
            None => {
                bounds = Some(Bounds {
                    min: v.pos,
                    max: v.pos,
                })
            }
        }
        if !v.visible {
            continue;
        }
        let uv = atlas
            .uv(color.rgb())
            .ok_or(EmitError::MissingSwatch(color.r, color.g, color.b))?;
        let (origin, size) = block_cuboid(grid.width(), grid.height(), dims, v.pos, v.span);
        model.push_cuboid(origin, size, material, &uv, v.hidden);
    }

    Ok((model, bounds))
}

/// Build the single-box collision model. Returns `None` (with a warning)
/// when auto-fit has no opaque pixels to fit, or when the atlas is empty.
pub fn emit_collision(
    grid: &VoxelGrid,
    bounds: Option<Bounds>,
    atlas: &ColorAtlas,
    dims: CubeDims,
    mode: CollisionMode,
    material: &str,
) -> Option<SmdModel> {
    // never textured visibly; any swatch serves
    let uv = match atlas.first_uv() {
        Some(uv) => uv,
        None => {
            log::warn!("no opaque colors; skipping collision mesh");
            return None;
        }
    };
    let (origin, size) = match mode {
        CollisionMode::AutoFit => match bounds {
            Some(b) => autofit_cuboid(grid.width(), grid.height(), dims, b),
            None => {
                log::warn!("no opaque pixels to fit; skipping collision mesh");
                return None;
            }
        },
        CollisionMode::Scaled(scale) => scaled_cuboid(grid.width(), grid.height(), dims, scale),
    };

    let mut model = SmdModel::new();
    model.push_cuboid(origin, size, material, &uv, FaceSet::empty());
    Some(model)
}

/// World-space origin and size of a merged block.
///
/// Horizontal runs extend model +Y; vertical runs extend +Z from the
/// head, which sits on the bottom row of the run.
fn block_cuboid(
    image_width: u32,
    image_height: u32,
    dims: CubeDims,
    pos: IVec2,
    span: IVec2,
) -> (Vec3, Vec3) {
    let (w, d, h) = (dims.width as f32, dims.depth as f32, dims.height as f32);
    let half_w = image_width as f32 / 2.0;
    let half_h = image_height as f32 / 2.0;
    let origin = Vec3::new(
        -d / 2.0,
        (pos.x as f32 - half_w) * w,
        (half_h - 1.0 - pos.y as f32) * h,
    );
    let size = Vec3::new(d, w * span.x as f32, h * span.y as f32);
    (origin, size)
}

/// Collision box matching the opaque bounding rectangle exactly.
fn autofit_cuboid(image_width: u32, image_height: u32, dims: CubeDims, b: Bounds) -> (Vec3, Vec3) {
    let span = b.max - b.min + IVec2::ONE;
    block_cuboid(image_width, image_height, dims, IVec2::new(b.min.x, b.max.y), span)
}

/// Collision box covering `scale ×` the whole image, centered.
fn scaled_cuboid(image_width: u32, image_height: u32, dims: CubeDims, scale: f32) -> (Vec3, Vec3) {
    let (w, d, h) = (dims.width as f32, dims.depth as f32, dims.height as f32);
    let full_w = image_width as f32 * scale * w;
    let full_h = image_height as f32 * scale * h;
    let origin = Vec3::new(-d / 2.0, -full_w / 2.0, -full_h / 2.0);
    let size = Vec3::new(d, full_w, full_h);
    (origin, size)
}
