//! Axis-aligned box foundation

use serde::{Deserialize, Serialize};

use super::{GeometryError, GeometryResult, check_thickness};
use crate::Point3;
use crate::constants::MIN_FOOTPRINT_SIZE;
use crate::mesh::FoundationMesh;

/// Validated rectangular footprint with its extrusion thickness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxFootprint {
    /// Componentwise minimum of the two corners
    pub min: Point3,
    /// Componentwise maximum of the two corners
    pub max: Point3,
    /// Extent along z, measured upward from `min.z`
    pub thickness: f32,
}

impl BoxFootprint {
    /// Normalize two arbitrary corners and check the minimum size
    pub fn from_corners(p1: Point3, p2: Point3, thickness: f32) -> GeometryResult<Self> {
        check_thickness(thickness)?;
        if !(p1.is_finite() && p2.is_finite()) {
            return Err(GeometryError::NonFinitePoint(format!("{p1:?} / {p2:?}")));
        }
        let min = p1.min(p2);
        let max = p1.max(p2);
        let width = max.x - min.x;
        let length = max.y - min.y;
        // NaN extents fail both comparisons and are rejected too
        if !(width >= MIN_FOOTPRINT_SIZE && length >= MIN_FOOTPRINT_SIZE) {
            return Err(GeometryError::GeometryTooSmall {
                width,
                length,
                min: MIN_FOOTPRINT_SIZE,
            });
        }
        Ok(Self {
            min,
            max,
            thickness,
        })
    }

    /// Extent along x
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Extent along y
    pub fn length(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center of the solid
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            self.min.z + self.thickness / 2.0,
        )
    }

    /// Generate the capped prism: 8 vertices, 6 outward-wound quads
    pub fn mesh(&self) -> GeometryResult<FoundationMesh> {
        let c = self.center();
        let hx = self.width() / 2.0;
        let hy = self.length() / 2.0;
        let hz = self.thickness / 2.0;

        // Bottom ring then top ring, counter-clockwise seen from +Z
        let corners = [(-hx, -hy), (hx, -hy), (hx, hy), (-hx, hy)];
        let mut vertices = Vec::with_capacity(8);
        for z in [-hz, hz] {
            for (x, y) in corners {
                vertices.push(c + Point3::new(x, y, z));
            }
        }

        let faces = vec![
            vec![0, 3, 2, 1], // -Z (bottom)
            vec![4, 5, 6, 7], // +Z (top)
            vec![0, 1, 5, 4], // -Y
            vec![1, 2, 6, 5], // +X
            vec![2, 3, 7, 6], // +Y
            vec![3, 0, 4, 7], // -X
        ];

        Ok(FoundationMesh::new(vertices, faces)?)
    }
}

/// Build a box foundation between two corners (order-independent)
pub fn build_box(p1: Point3, p2: Point3, thickness: f32) -> GeometryResult<FoundationMesh> {
    BoxFootprint::from_corners(p1, p2, thickness)?.mesh()
}
