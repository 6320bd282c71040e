//! Heuristic stress field over a foundation mesh
//!
//! Closed-form engineering approximation, not a finite-element solution.
//! Each load pattern decays with planar distance from where the load is
//! applied, then a depth factor reduces stress toward the top face:
//!
//! - Uniform: `q * (1 - 0.1 d / L)`, `q = P / A`
//! - PointCenter: `P * exp(-2 d / L) / (π (L/4)²)`, `d` from the centroid
//! - PointCorner: same, `d` from the footprint's minimum corner
//! - Linear: `q * clamp(0.5 + 0.5 nx, 0, 1)`, `nx` the x offset over half width
//!
//! Depth: `* (1 - 0.3 h)`, `h` the relative height within the thickness.
//!
//! `L` is the larger bounding-box extent. `A` is `width * length` for
//! rectangles and the enclosed (shoelace) area for polygon footprints.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Point3;
use crate::constants::{DEPTH_ATTENUATION, POINT_LOAD_DECAY, UNIFORM_DECAY};
use crate::foundation::{Foundation, FoundationSpec, LoadType};
use crate::mesh::FoundationMesh;

/// Stress computation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StressError {
    #[error("Empty mesh: no vertices to evaluate")]
    EmptyMesh,

    #[error("Invalid load: {0} (must be finite and non-negative)")]
    InvalidLoad(f32),
}

impl StressError {
    /// Empty meshes indicate a builder bug, not bad input
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StressError::InvalidLoad(_))
    }
}

/// Derived footprint quantities shared by every sample
#[derive(Debug, Clone, Copy)]
struct FieldParams {
    load_type: LoadType,
    load_value: f32,
    width: f32,
    /// max(width, length)
    span: f32,
    /// Plan area; enclosed area for polygons, not the bounding box
    area: f32,
    min_corner: Vec2,
    centroid: Point3,
    thickness: f32,
}

impl FieldParams {
    fn new(spec: &FoundationSpec, centroid: Point3) -> Self {
        let width = spec.footprint.width();
        let length = spec.footprint.length();
        Self {
            load_type: spec.load_type,
            load_value: spec.load_value,
            width,
            span: width.max(length),
            area: spec.footprint.area(),
            min_corner: spec.footprint.min_corner(),
            centroid,
            thickness: spec.thickness,
        }
    }

    fn point_load(&self, distance: f32) -> f32 {
        let radius = self.span / 4.0;
        self.load_value * (-POINT_LOAD_DECAY * distance / self.span).exp() / (PI * radius * radius)
    }

    /// Stress before depth attenuation
    fn load_pattern(&self, p: Point3) -> f32 {
        let planar = p.truncate();
        match self.load_type {
            LoadType::Uniform => {
                let d = planar.distance(self.centroid.truncate());
                self.load_value / self.area * (1.0 - UNIFORM_DECAY * d / self.span)
            }
            LoadType::PointCenter => self.point_load(planar.distance(self.centroid.truncate())),
            LoadType::PointCorner => self.point_load(planar.distance(self.min_corner)),
            LoadType::Linear => {
                let nx = ((p.x - self.centroid.x) / (self.width / 2.0)).clamp(-1.0, 1.0);
                let factor = (0.5 + 0.5 * nx).clamp(0.0, 1.0);
                self.load_value / self.area * factor
            }
        }
    }

    /// Multiplier in [0.7, 1.0], 1.0 at the bottom face
    fn depth_factor(&self, p: Point3) -> f32 {
        let bottom = self.centroid.z - self.thickness / 2.0;
        let rel_height = ((p.z - bottom) / self.thickness).clamp(0.0, 1.0);
        1.0 - DEPTH_ATTENUATION * rel_height
    }

    fn sample(&self, p: Point3) -> f32 {
        self.load_pattern(p) * self.depth_factor(p)
    }
}

fn check_load(spec: &FoundationSpec) -> Result<(), StressError> {
    if spec.load_value.is_finite() && spec.load_value >= 0.0 {
        Ok(())
    } else {
        Err(StressError::InvalidLoad(spec.load_value))
    }
}

/// Evaluate the field at an arbitrary point, without depth attenuation
pub fn load_pattern_at(spec: &FoundationSpec, centroid: Point3, point: Point3) -> f32 {
    FieldParams::new(spec, centroid).load_pattern(point)
}

/// Evaluate the attenuated field at an arbitrary point
pub fn stress_at(spec: &FoundationSpec, centroid: Point3, point: Point3) -> f32 {
    FieldParams::new(spec, centroid).sample(point)
}

/// Compute one stress value per mesh vertex
pub fn compute_stress(
    mesh: &FoundationMesh,
    spec: &FoundationSpec,
    centroid: Point3,
) -> Result<Vec<f32>, StressError> {
    if mesh.vertices.is_empty() {
        return Err(StressError::EmptyMesh);
    }
    check_load(spec)?;
    let params = FieldParams::new(spec, centroid);
    Ok(mesh.vertices.iter().map(|&v| params.sample(v)).collect())
}

/// Like [`compute_stress`], but an invariant violation yields an empty
/// array (and trips a debug assertion) instead of an error
pub fn compute_stress_or_empty(
    mesh: &FoundationMesh,
    spec: &FoundationSpec,
    centroid: Point3,
) -> Vec<f32> {
    match compute_stress(mesh, spec, centroid) {
        Ok(values) => values,
        Err(e) => {
            tracing::error!("Stress computation failed: {}", e);
            debug_assert!(e.is_recoverable(), "stress invariant violated: {e}");
            Vec::new()
        }
    }
}

/// Shared colour-scale range across all foundations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressRange {
    pub min: f32,
    pub max: f32,
}

impl StressRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range of the given values, `None` when empty
    pub fn from_values(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        values.into_iter().fold(None, |range, v| {
            Some(match range {
                None => Self::new(v, v),
                Some(r) => r.including(v),
            })
        })
    }

    /// Widen to include `value`
    pub fn including(self, value: f32) -> Self {
        Self::new(self.min.min(value), self.max.max(value))
    }

    /// Smallest range covering both
    pub fn merge(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Map `value` into [0, 1]; a zero-width range maps everything to 0.5
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.span();
        if span <= f32::EPSILON {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Recompute every foundation's stress from its stored spec
///
/// Returns the new arrays in collection order and the global range. Geometry
/// is never touched. A bad load is returned as an error; an empty mesh trips a
/// debug assertion and yields an empty array in release builds.
pub fn recompute_all(
    foundations: &[Foundation],
) -> Result<(Vec<Vec<f32>>, Option<StressRange>), StressError> {
    let arrays = foundations
        .iter()
        .map(|f| -> Result<Vec<f32>, StressError> {
            check_load(&f.spec)?;
            Ok(compute_stress_or_empty(&f.mesh, &f.spec, f.centroid))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let range = StressRange::from_values(arrays.iter().flatten().copied());
    tracing::debug!(
        "Recomputed stress for {} foundations, range {:?}",
        foundations.len(),
        range
    );
    Ok((arrays, range))
}
