//! Studiomdl data (SMD) text serialization for static, single-bone models.

use cubist_core::face::{Face, FaceSet};
use glam::{Vec2, Vec3};

use crate::atlas::UvRect;

/// Fixed preamble: one root bone, one identity skeleton frame.
const HEADER: &str = "version 1\nnodes\n    0 \"root\" -1\nend\nskeleton\n    time 0\n    0 0.000000 0.000000 0.000000 0.000000 0.000000 0.000000\nend\ntriangles\n";

const FOOTER: &str = "end";

// Outward unit normals. The model's X axis carries the constant depth;
// Y follows the image's horizontal axis and Z points up.
const UP: Vec3 = Vec3::new(0.0, 0.0, 1.0);
const DOWN: Vec3 = Vec3::new(0.0, 0.0, -1.0);
const FORWARD: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const BACKWARD: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
const LEFT: Vec3 = Vec3::new(0.0, -1.0, 0.0);
const RIGHT: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Accumulates triangles and renders a complete SMD file.
#[derive(Debug, Default)]
pub struct SmdModel {
    triangles: String,
    count: usize,
}

impl SmdModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles pushed so far.
    pub fn triangle_count(&self) -> usize {
        self.count
    }

    /// The full file: header, triangle blocks, footer.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(HEADER.len() + self.triangles.len() + FOOTER.len());
        out.push_str(HEADER);
        out.push_str(&self.triangles);
        out.push_str(FOOTER);
        out
    }

    /// One triangle: a material line, then three vertex lines bound to the
    /// root bone. All floats render with six decimals so output is
    /// byte-stable across runs.
    pub fn push_triangle(&mut self, material: &str, vertices: [(Vec3, Vec3, Vec2); 3]) {
        self.triangles.push_str(material);
        self.triangles.push('\n');
        for (pos, normal, uv) in vertices {
            self.triangles.push_str(&format!(
                "0    {:.6} {:.6} {:.6}    {:.6} {:.6} {:.6}    {:.6} {:.6}\n",
                pos.x, pos.y, pos.z, normal.x, normal.y, normal.z, uv.x, uv.y,
            ));
        }
        self.count += 1;
    }

    /// One quad as two triangles. `reversed` flips the winding for the
    /// faces whose corner table would otherwise point them inward.
    fn push_quad(
        &mut self,
        material: &str,
        bl: Vec3,
        br: Vec3,
        tl: Vec3,
        tr: Vec3,
        normal: Vec3,
        uv: &UvRect,
        reversed: bool,
    ) {
        if reversed {
            self.push_triangle(
                material,
                [
                    (tr, normal, uv.top_right),
                    (br, normal, uv.bottom_right),
                    (bl, normal, uv.bottom_left),
                ],
            );
            self.push_triangle(
                material,
                [
                    (bl, normal, uv.bottom_left),
                    (tl, normal, uv.top_left),
                    (tr, normal, uv.top_right),
                ],
            );
        } else {
            self.push_triangle(
                material,
                [
                    (tl, normal, uv.top_left),
                    (tr, normal, uv.top_right),
                    (br, normal, uv.bottom_right),
                ],
            );
            self.push_triangle(
                material,
                [
                    (br, normal, uv.bottom_right),
                    (bl, normal, uv.bottom_left),
                    (tl, normal, uv.top_left),
                ],
            );
        }
    }

    /// An axis-aligned cuboid from `origin` extending by `size`, minus the
    /// excluded lateral faces. The two depth-axis faces (model ±X) have no
    /// image-space neighbor and are always drawn. The ±Y pair is wound
    /// reversed to keep normals outward under the image→model axis remap.
    pub fn push_cuboid(
        &mut self,
        origin: Vec3,
        size: Vec3,
        material: &str,
        uv: &UvRect,
        excluded: FaceSet,
    ) {
        let (x0, y0, z0) = (origin.x, origin.y, origin.z);
        let (x1, y1, z1) = (origin.x + size.x, origin.y + size.y, origin.z + size.z);

        // top (+Z): hidden when the image row above is covered
        if !excluded.contains(Face::Top) {
            self.push_quad(
                material,
                Vec3::new(x0, y0, z1),
                Vec3::new(x0, y1, z1),
                Vec3::new(x1, y0, z1),
                Vec3::new(x1, y1, z1),
                UP,
                uv,
                false,
            );
        }
        // bottom (-Z)
        if !excluded.contains(Face::Bottom) {
            self.push_quad(
                material,
                Vec3::new(x1, y0, z0),
                Vec3::new(x1, y1, z0),
                Vec3::new(x0, y0, z0),
                Vec3::new(x0, y1, z0),
                DOWN,
                uv,
                false,
            );
        }
        // front (-X), depth axis
        self.push_quad(
            material,
            Vec3::new(x0, y0, z0),
            Vec3::new(x0, y1, z0),
            Vec3::new(x0, y0, z1),
            Vec3::new(x0, y1, z1),
            BACKWARD,
            uv,
            false,
        );
        // right (+Y)
        if !excluded.contains(Face::Right) {
            self.push_quad(
                material,
                Vec3::new(x0, y1, z0),
                Vec3::new(x1, y1, z0),
                Vec3::new(x0, y1, z1),
                Vec3::new(x1, y1, z1),
                RIGHT,
                uv,
                true,
            );
        }
        // back (+X), depth axis
        self.push_quad(
            material,
            Vec3::new(x1, y1, z0),
            Vec3::new(x1, y0, z0),
            Vec3::new(x1, y1, z1),
            Vec3::new(x1, y0, z1),
            FORWARD,
            uv,
            false,
        );
        // left (-Y)
        if !excluded.contains(Face::Left) {
            self.push_quad(
                material,
                Vec3::new(x1, y0, z0),
                Vec3::new(x0, y0, z0),
                Vec3::new(x1, y0, z1),
                Vec3::new(x0, y0, z1),
                LEFT,
                uv,
                true,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_uv() -> UvRect {
        UvRect {
            top_left: Vec2::new(0.0, 0.0),
            top_right: Vec2::new(1.0, 0.0),
            bottom_left: Vec2::new(0.0, 1.0),
            bottom_right: Vec2::new(1.0, 1.0),
        }
    }

    #[test]
    fn test_empty_model_is_header_and_footer() {
        let model = SmdModel::new();
        let expected = "version 1\n\
                        nodes\n    0 \"root\" -1\nend\n\
                        skeleton\n    time 0\n    0 0.000000 0.000000 0.000000 0.000000 0.000000 0.000000\nend\n\
                        triangles\nend";
        assert_eq!(model.render(), expected);
    }

    #[test]
    fn test_triangle_line_format() {
        let mut model = SmdModel::new();
        model.push_triangle(
            "tex_a.png",
            [
                (Vec3::new(1.0, -2.0, 0.5), Vec3::Z, Vec2::new(0.25, 0.75)),
                (Vec3::ZERO, Vec3::Z, Vec2::ZERO),
                (Vec3::ONE, Vec3::Z, Vec2::ONE),
            ],
        );
        let rendered = model.render();
        assert!(rendered.contains(
            "tex_a.png\n0    1.000000 -2.000000 0.500000    0.000000 0.000000 1.000000    0.250000 0.750000\n"
        ));
        assert_eq!(model.triangle_count(), 1);
    }

    #[test]
    fn test_full_cuboid_is_twelve_triangles() {
        let mut model = SmdModel::new();
        model.push_cuboid(
            Vec3::ZERO,
            Vec3::ONE,
            "mat",
            &unit_uv(),
            FaceSet::empty(),
        );
        assert_eq!(model.triangle_count(), 12);
    }

    #[test]
    fn test_excluded_faces_are_not_emitted() {
        let mut excluded = FaceSet::empty();
        excluded.insert(Face::Top);
        excluded.insert(Face::Bottom);
        let mut model = SmdModel::new();
        model.push_cuboid(Vec3::ZERO, Vec3::ONE, "mat", &unit_uv(), excluded);
        assert_eq!(model.triangle_count(), 8);
    }

    #[test]
    fn test_depth_faces_survive_full_exclusion() {
        let mut model = SmdModel::new();
        model.push_cuboid(Vec3::ZERO, Vec3::ONE, "mat", &unit_uv(), FaceSet::all());
        // only the two depth-axis quads remain
        assert_eq!(model.triangle_count(), 4);
        let rendered = model.render();
        assert!(rendered.contains("1.000000 0.000000 0.000000"));
        assert!(rendered.contains("-1.000000 0.000000 0.000000"));
    }
}
