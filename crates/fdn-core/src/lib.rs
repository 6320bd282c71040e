//! Foundation Editor Core
//!
//! Pure model and algorithms for laying out foundations on a ground plane:
//! - Grid snapping and snap points
//! - Box and polygon-extrusion mesh builders
//! - Heuristic stress field over foundation meshes
//! - Stress colour scale and vertex packing for renderers

pub mod color;
pub mod constants;
pub mod foundation;
pub mod guide;
pub mod material;
pub mod mesh;
pub mod primitive;
pub mod snap;
pub mod stress;

/// World-space point (x, y, z); z is up and the ground plane is z = 0.
pub type Point3 = glam::Vec3;

// Re-exports for convenience
pub use color::{ColorScale, StressVertex, pack_stress_vertices};
pub use foundation::{Footprint, Foundation, FoundationError, FoundationSpec, LoadType};
pub use guide::{GuideLine, GuideLines, SnapPoint};
pub use material::Material;
pub use mesh::{Face, FoundationMesh, MeshError};
pub use primitive::{
    BoxFootprint, GeometryError, GeometryResult, build_box, build_polygon, polygon_signed_area,
};
pub use snap::{GridConfig, snap, snap_if};
pub use stress::{StressError, StressRange, compute_stress, recompute_all};
