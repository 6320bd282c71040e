//! Stress colour scale and GPU vertex packing

use glam::Vec3;

use crate::mesh::FoundationMesh;
use crate::stress::StressRange;

const COOL: Vec3 = Vec3::new(0.230, 0.299, 0.754);
const NEUTRAL: Vec3 = Vec3::new(0.865, 0.865, 0.865);
const WARM: Vec3 = Vec3::new(0.706, 0.016, 0.150);

/// Cool-to-warm colour ramp over a shared stress range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub range: StressRange,
}

impl ColorScale {
    pub fn new(range: StressRange) -> Self {
        Self { range }
    }

    /// RGBA colour for a stress value
    pub fn color_at(&self, value: f32) -> [f32; 4] {
        let t = self.range.normalize(value);
        let rgb = if t < 0.5 {
            COOL.lerp(NEUTRAL, t * 2.0)
        } else {
            NEUTRAL.lerp(WARM, (t - 0.5) * 2.0)
        };
        [rgb.x, rgb.y, rgb.z, 1.0]
    }

    /// One colour per vertex of `mesh`
    pub fn colorize(&self, mesh: &FoundationMesh) -> Vec<[f32; 4]> {
        mesh.stress.iter().map(|&s| self.color_at(s)).collect()
    }
}

/// Position + colour vertex for renderers
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StressVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Pack a mesh into a coloured vertex buffer plus triangle indices
pub fn pack_stress_vertices(
    mesh: &FoundationMesh,
    scale: &ColorScale,
) -> (Vec<StressVertex>, Vec<u32>) {
    let vertices = mesh
        .vertices
        .iter()
        .enumerate()
        .map(|(i, v)| StressVertex {
            position: v.to_array(),
            color: scale.color_at(mesh.stress.get(i).copied().unwrap_or(0.0)),
        })
        .collect();
    (vertices, mesh.triangle_indices())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point3;
    use crate::primitive::build_box;

    fn assert_rgb(actual: [f32; 4], expected: Vec3) {
        for (a, e) in actual[..3].iter().zip(expected.to_array()) {
            assert!((a - e).abs() < 1e-6, "{actual:?} != {expected:?}");
        }
        assert_eq!(actual[3], 1.0);
    }

    #[test]
    fn test_color_endpoints() {
        let scale = ColorScale::new(StressRange::new(0.0, 10.0));
        assert_rgb(scale.color_at(0.0), COOL);
        assert_rgb(scale.color_at(5.0), NEUTRAL);
        assert_rgb(scale.color_at(10.0), WARM);
        // Clamped outside the range
        assert_eq!(scale.color_at(50.0), scale.color_at(10.0));
        assert_eq!(scale.color_at(-3.0), scale.color_at(0.0));
    }

    #[test]
    fn test_flat_range_is_neutral() {
        let scale = ColorScale::new(StressRange::new(3.0, 3.0));
        assert_rgb(scale.color_at(3.0), NEUTRAL);
    }

    #[test]
    fn test_pack_vertices() {
        let mut mesh = build_box(Point3::ZERO, Point3::new(1.0, 1.0, 0.0), 1.0).unwrap();
        mesh.set_stress((0..8).map(|i| i as f32).collect());
        let scale = ColorScale::new(StressRange::new(0.0, 7.0));
        let (vertices, indices) = pack_stress_vertices(&mesh, &scale);
        assert_eq!(vertices.len(), 8);
        assert_eq!(indices.len(), 36);
        assert_eq!(vertices[7].color, scale.color_at(7.0));

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 8 * std::mem::size_of::<StressVertex>());
        assert_eq!(std::mem::size_of::<StressVertex>(), 28);
    }
}
