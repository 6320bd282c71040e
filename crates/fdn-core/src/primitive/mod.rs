//! Foundation solid generation
//!
//! Two construction modes, both closed (capped) solids:
//! - Axis-aligned box from two opposite corners
//! - Extrusion of a planar polygon downward by the thickness

mod box_mesh;
mod extrude;

pub use box_mesh::{BoxFootprint, build_box};
pub use extrude::{build_polygon, polygon_centroid, polygon_self_intersects, polygon_signed_area};

use thiserror::Error;

use crate::mesh::MeshError;

/// Geometry construction errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Footprint narrower than the minimum size in x or y
    #[error("Foundation too small: {width:.3} x {length:.3} (minimum {min})")]
    GeometryTooSmall { width: f32, length: f32, min: f32 },

    /// Polygon with fewer than 3 vertices, zero area or crossing edges
    #[error("Degenerate polygon: {0}")]
    DegeneratePolygon(String),

    #[error("Invalid thickness: {0} (must be positive)")]
    InvalidThickness(f32),

    /// Corner or vertex with a NaN or infinite coordinate
    #[error("Non-finite point: {0}")]
    NonFinitePoint(String),

    /// Builder produced an inconsistent mesh
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}

impl GeometryError {
    /// User-input errors the caller can recover from by retrying
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GeometryError::Mesh(_))
    }
}

/// Result type for geometry construction
pub type GeometryResult<T> = Result<T, GeometryError>;

pub(crate) fn check_thickness(thickness: f32) -> GeometryResult<()> {
    if thickness.is_finite() && thickness > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidThickness(thickness))
    }
}
