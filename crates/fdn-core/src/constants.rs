//! Global constants for fdn-core

/// Minimum footprint width and length accepted by the box builder
pub const MIN_FOOTPRINT_SIZE: f32 = 0.1;

/// Signed areas at or below this magnitude are treated as degenerate polygons
pub const DEGENERATE_AREA_EPSILON: f32 = 1e-6;

/// Ground plane height; foundation corners are flattened onto it
pub const GROUND_Z: f32 = 0.0;

/// Default grid spacing for snapping
pub const DEFAULT_GRID_SPACING: f32 = 1.0;

/// Default foundation thickness (m)
pub const DEFAULT_THICKNESS: f32 = 0.5;

/// Thickness range offered by the tool panel (m)
pub const THICKNESS_RANGE: (f32, f32) = (0.1, 5.0);

/// Default applied load (N), 100 kN
pub const DEFAULT_LOAD: f32 = 100_000.0;

/// Planar decay coefficient of the uniform load pattern
pub const UNIFORM_DECAY: f32 = 0.1;

/// Exponential decay coefficient of the point load patterns
pub const POINT_LOAD_DECAY: f32 = 2.0;

/// Fraction of stress lost between the bottom and the top face
pub const DEPTH_ATTENUATION: f32 = 0.3;

/// Gravitational acceleration used for self weight (m/s²)
pub const GRAVITY: f32 = 9.81;

/// Default attraction distance for explicit snap points
pub const SNAP_POINT_THRESHOLD: f32 = 0.5;

/// Default display radius of a snap point marker
pub const SNAP_POINT_RADIUS: f32 = 0.1;
