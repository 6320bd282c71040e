//! Foundation specification and committed foundation entity

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::Point3;
use crate::constants::{DEFAULT_LOAD, GRAVITY};
use crate::material::Material;
use crate::mesh::FoundationMesh;
use crate::primitive::{
    BoxFootprint, GeometryError, GeometryResult, build_polygon, polygon_centroid,
    polygon_signed_area,
};
use crate::stress::{StressError, compute_stress};

/// Spatial distribution pattern of the applied load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LoadType {
    /// Evenly spread over the footprint
    #[default]
    Uniform,
    /// Concentrated at the centroid
    PointCenter,
    /// Concentrated at the footprint's minimum corner
    PointCorner,
    /// Increasing linearly along +X
    Linear,
}

impl LoadType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadType::Uniform => "Uniform",
            LoadType::PointCenter => "Point (center)",
            LoadType::PointCorner => "Point (corner)",
            LoadType::Linear => "Linear",
        }
    }

    /// All load types for UI
    pub fn all() -> &'static [LoadType] {
        &[
            LoadType::Uniform,
            LoadType::PointCenter,
            LoadType::PointCorner,
            LoadType::Linear,
        ]
    }
}

/// 2D outline of a foundation before extrusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Footprint {
    /// Axis-aligned rectangle, extruded upward from `corner_min.z`
    Rectangle {
        corner_min: Point3,
        corner_max: Point3,
    },
    /// Ordered planar outline, extruded downward from its own height
    Polygon { vertices: Vec<Point3> },
}

impl Footprint {
    /// Rectangle from two arbitrary corners
    pub fn rectangle(p1: Point3, p2: Point3) -> Self {
        Footprint::Rectangle {
            corner_min: p1.min(p2),
            corner_max: p1.max(p2),
        }
    }

    /// Polygon from an ordered outline
    pub fn polygon(vertices: Vec<Point3>) -> Self {
        Footprint::Polygon { vertices }
    }

    /// XY bounding box (min, max)
    pub fn planar_bounds(&self) -> (Vec2, Vec2) {
        match self {
            Footprint::Rectangle {
                corner_min,
                corner_max,
            } => (corner_min.truncate(), corner_max.truncate()),
            Footprint::Polygon { vertices } => {
                let Some(first) = vertices.first() else {
                    return (Vec2::ZERO, Vec2::ZERO);
                };
                vertices.iter().fold(
                    (first.truncate(), first.truncate()),
                    |(min, max), v| (min.min(v.truncate()), max.max(v.truncate())),
                )
            }
        }
    }

    /// Minimum XY corner of the bounding box
    pub fn min_corner(&self) -> Vec2 {
        self.planar_bounds().0
    }

    /// Extent along x
    pub fn width(&self) -> f32 {
        let (min, max) = self.planar_bounds();
        max.x - min.x
    }

    /// Extent along y
    pub fn length(&self) -> f32 {
        let (min, max) = self.planar_bounds();
        max.y - min.y
    }

    /// Plan area: width × length for rectangles, enclosed area for polygons
    pub fn area(&self) -> f32 {
        match self {
            Footprint::Rectangle { .. } => self.width() * self.length(),
            Footprint::Polygon { vertices } => polygon_signed_area(vertices).abs(),
        }
    }
}

/// Everything needed to build and load a foundation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationSpec {
    pub footprint: Footprint,
    /// Thickness in meters
    pub thickness: f32,
    pub load_type: LoadType,
    /// Applied load in Newtons
    pub load_value: f32,
    pub material: Material,
}

impl FoundationSpec {
    /// Create a spec with the default load and material
    pub fn new(footprint: Footprint, thickness: f32) -> Self {
        Self {
            footprint,
            thickness,
            load_type: LoadType::default(),
            load_value: DEFAULT_LOAD,
            material: Material::default(),
        }
    }

    /// Rectangular spec between two corners
    pub fn rectangle(p1: Point3, p2: Point3, thickness: f32) -> Self {
        Self::new(Footprint::rectangle(p1, p2), thickness)
    }

    /// Polygonal spec from an ordered outline
    pub fn polygon(vertices: Vec<Point3>, thickness: f32) -> Self {
        Self::new(Footprint::polygon(vertices), thickness)
    }

    pub fn with_load(mut self, load_type: LoadType, load_value: f32) -> Self {
        self.load_type = load_type;
        self.load_value = load_value;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Generate the closed solid for this spec
    pub fn build_mesh(&self) -> GeometryResult<FoundationMesh> {
        match &self.footprint {
            Footprint::Rectangle {
                corner_min,
                corner_max,
            } => BoxFootprint::from_corners(*corner_min, *corner_max, self.thickness)?.mesh(),
            Footprint::Polygon { vertices } => build_polygon(vertices, self.thickness),
        }
    }

    /// Center of the solid: plan centroid at mid-thickness
    pub fn centroid(&self) -> Point3 {
        match &self.footprint {
            Footprint::Rectangle {
                corner_min,
                corner_max,
            } => Point3::new(
                (corner_min.x + corner_max.x) / 2.0,
                (corner_min.y + corner_max.y) / 2.0,
                corner_min.z + self.thickness / 2.0,
            ),
            Footprint::Polygon { vertices } => {
                let top = vertices.first().map_or(0.0, |v| v.z);
                polygon_centroid(vertices).extend(top - self.thickness / 2.0)
            }
        }
    }
}

/// Foundation-level errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FoundationError {
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Stress error: {0}")]
    Stress(#[from] StressError),
}

impl FoundationError {
    /// User-input errors (too small, degenerate outline) the caller can retry
    pub fn is_recoverable(&self) -> bool {
        match self {
            FoundationError::Geometry(e) => e.is_recoverable(),
            FoundationError::Stress(e) => e.is_recoverable(),
        }
    }
}

/// A committed foundation with its mesh and computed stress field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Foundation {
    pub id: Uuid,
    pub spec: FoundationSpec,
    pub mesh: FoundationMesh,
    pub centroid: Point3,
}

impl Foundation {
    /// Build the mesh and stress field for `spec`
    pub fn from_spec(spec: FoundationSpec) -> Result<Self, FoundationError> {
        let mut mesh = spec.build_mesh()?;
        let centroid = spec.centroid();
        mesh.stress = compute_stress(&mesh, &spec, centroid)?;
        Ok(Self {
            id: Uuid::new_v4(),
            spec,
            mesh,
            centroid,
        })
    }

    /// Name used for this foundation's scene object
    pub fn scene_name(&self) -> String {
        format!("foundation_{}", self.id)
    }

    /// Volume in m³
    pub fn volume(&self) -> f32 {
        self.spec.footprint.area() * self.spec.thickness
    }

    /// Weight of the body itself in Newtons
    pub fn self_weight(&self) -> f32 {
        self.volume() * self.spec.material.density() * GRAVITY
    }

    pub fn max_stress(&self) -> f32 {
        self.mesh.max_stress().unwrap_or(0.0)
    }

    /// Peak stress relative to the material strength (1.0 = at capacity)
    pub fn utilization(&self) -> f32 {
        self.max_stress() / self.spec.material.strength()
    }
}
