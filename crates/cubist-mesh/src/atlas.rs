//! Flat-color texture strip and the UV coordinates into it.

use std::collections::HashMap;
use std::path::Path;

use cubist_core::color::Palette;
use glam::Vec2;

use crate::error::EmitError;

/// Side length of one color swatch, in texels.
pub const SWATCH_SIZE: u32 = 16;

/// Texels trimmed from every swatch edge so bilinear filtering cannot
/// bleed a neighboring swatch in.
pub const UV_INSET: u32 = 4;

/// Inset corners of one swatch, normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

/// Horizontal strip of flat-color swatches, one per unique opaque palette
/// entry, laid out left to right in palette order.
///
/// Lookup is keyed by (r, g, b): alpha is dropped once transparency has
/// been filtered out. If two opaque entries share an RGB triple the later
/// one wins the lookup while both keep their swatch.
pub struct ColorAtlas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    swatch_count: usize,
    lookup: HashMap<(u8, u8, u8), UvRect>,
    first: Option<UvRect>,
}

impl ColorAtlas {
    /// Lay out one swatch per opaque palette entry.
    pub fn build(palette: &Palette) -> Self {
        let opaque: Vec<_> = palette.iter().filter(|c| !c.is_transparent()).collect();
        let width = SWATCH_SIZE * opaque.len() as u32;
        let height = SWATCH_SIZE;

        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _y in 0..height {
            for color in &opaque {
                for _x in 0..SWATCH_SIZE {
                    pixels.extend_from_slice(&[color.r, color.g, color.b]);
                }
            }
        }

        let mut lookup = HashMap::new();
        let mut first = None;
        for (k, color) in opaque.iter().enumerate() {
            let uv = swatch_uv(k as u32, width, height);
            if first.is_none() {
                first = Some(uv);
            }
            lookup.insert(color.rgb(), uv);
        }

        Self {
            width,
            height,
            pixels,
            swatch_count: opaque.len(),
            lookup,
            first,
        }
    }

    /// UV corners for an opaque color.
    pub fn uv(&self, rgb: (u8, u8, u8)) -> Option<UvRect> {
        self.lookup.get(&rgb).copied()
    }

    /// An arbitrary (first) swatch, for geometry that is never textured
    /// visibly.
    pub fn first_uv(&self) -> Option<UvRect> {
        self.first
    }

    pub fn swatch_count(&self) -> usize {
        self.swatch_count
    }

    /// True when the palette held no opaque color at all.
    pub fn is_empty(&self) -> bool {
        self.swatch_count == 0
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Write the strip as an 8-bit RGB PNG.
    pub fn save(&self, path: &Path) -> Result<(), EmitError> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
        .map_err(|source| EmitError::TextureWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    #[cfg(test)]
    fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let i = ((y * self.width + x) * 3) as usize;
        (self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }
}

/// Corners of swatch `k`, inset by [`UV_INSET`] texels on each edge.
fn swatch_uv(k: u32, atlas_width: u32, atlas_height: u32) -> UvRect {
    let w = atlas_width as f32;
    let h = atlas_height as f32;
    let left = (k * SWATCH_SIZE + UV_INSET) as f32 / w;
    let right = ((k + 1) * SWATCH_SIZE - UV_INSET) as f32 / w;
    let top = UV_INSET as f32 / h;
    let bottom = (atlas_height - UV_INSET) as f32 / h;
    UvRect {
        top_left: Vec2::new(left, top),
        top_right: Vec2::new(right, top),
        bottom_left: Vec2::new(left, bottom),
        bottom_right: Vec2::new(right, bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubist_core::color::Rgba;

    fn palette_of(colors: &[Rgba]) -> Palette {
        let mut palette = Palette::new();
        for &c in colors {
            palette.intern(c);
        }
        palette
    }

    #[test]
    fn test_transparent_colors_get_no_swatch() {
        let palette = palette_of(&[
            Rgba::new(1, 2, 3, 255),
            Rgba::new(0, 0, 0, 0),
            Rgba::new(4, 5, 6, 255),
        ]);
        let atlas = ColorAtlas::build(&palette);
        assert_eq!(atlas.swatch_count(), 2);
        assert_eq!(atlas.width(), 32);
        assert_eq!(atlas.height(), 16);
        assert!(atlas.uv((0, 0, 0)).is_none());
    }

    #[test]
    fn test_swatches_fill_strip_in_palette_order() {
        let palette = palette_of(&[Rgba::new(10, 0, 0, 255), Rgba::new(0, 20, 0, 255)]);
        let atlas = ColorAtlas::build(&palette);
        assert_eq!(atlas.pixel(0, 0), (10, 0, 0));
        assert_eq!(atlas.pixel(15, 15), (10, 0, 0));
        assert_eq!(atlas.pixel(16, 0), (0, 20, 0));
        assert_eq!(atlas.pixel(31, 15), (0, 20, 0));
    }

    #[test]
    fn test_uv_corners_are_inset() {
        let palette = palette_of(&[Rgba::new(10, 0, 0, 255), Rgba::new(0, 20, 0, 255)]);
        let atlas = ColorAtlas::build(&palette);
        let uv = atlas.uv((10, 0, 0)).expect("uv");
        assert_eq!(uv.top_left, Vec2::new(4.0 / 32.0, 0.25));
        assert_eq!(uv.top_right, Vec2::new(12.0 / 32.0, 0.25));
        assert_eq!(uv.bottom_left, Vec2::new(4.0 / 32.0, 0.75));
        assert_eq!(uv.bottom_right, Vec2::new(12.0 / 32.0, 0.75));
        let uv2 = atlas.uv((0, 20, 0)).expect("uv");
        assert_eq!(uv2.top_left, Vec2::new(20.0 / 32.0, 0.25));
        assert_eq!(uv2.top_right, Vec2::new(28.0 / 32.0, 0.25));
    }

    #[test]
    fn test_uv_strictly_inside_unit_square_and_disjoint() {
        let colors: Vec<Rgba> = (0..7).map(|i| Rgba::new(i as u8, 0, 0, 255)).collect();
        let palette = palette_of(&colors);
        let atlas = ColorAtlas::build(&palette);
        let mut prev_right = 0.0f32;
        for color in &colors {
            let uv = atlas.uv(color.rgb()).expect("uv");
            for corner in [uv.top_left, uv.top_right, uv.bottom_left, uv.bottom_right] {
                assert!(corner.x > 0.0 && corner.x < 1.0);
                assert!(corner.y > 0.0 && corner.y < 1.0);
            }
            // swatch spans never touch, let alone overlap
            assert!(uv.top_left.x > prev_right);
            prev_right = uv.top_right.x;
        }
    }

    #[test]
    fn test_empty_palette_yields_empty_atlas() {
        let palette = palette_of(&[Rgba::new(0, 0, 0, 0)]);
        let atlas = ColorAtlas::build(&palette);
        assert!(atlas.is_empty());
        assert!(atlas.first_uv().is_none());
    }

    #[test]
    fn test_first_uv_is_first_swatch() {
        let palette = palette_of(&[Rgba::new(0, 0, 0, 0), Rgba::new(9, 9, 9, 255)]);
        let atlas = ColorAtlas::build(&palette);
        let first = atlas.first_uv().expect("first");
        assert_eq!(Some(first), atlas.uv((9, 9, 9)));
    }
}
