//! Grid snapping

use serde::{Deserialize, Serialize};

use crate::Point3;
use crate::constants::DEFAULT_GRID_SPACING;

/// Uniform snapping grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    /// Grid cell size (must be positive)
    pub spacing: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_GRID_SPACING,
        }
    }
}

impl GridConfig {
    /// Create a grid with the given spacing
    pub fn new(spacing: f32) -> Self {
        Self { spacing }
    }

    /// Spacing is finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.spacing.is_finite() && self.spacing > 0.0
    }

    /// This grid, or the default one if the spacing is unusable
    pub fn sanitized(self) -> Self {
        if self.is_valid() { self } else { Self::default() }
    }

    /// Round a single coordinate to the nearest grid multiple
    ///
    /// An invalid grid leaves the value unchanged.
    #[inline]
    pub fn snap_scalar(&self, value: f32) -> f32 {
        if !self.is_valid() {
            return value;
        }
        (value / self.spacing).round() * self.spacing
    }
}

/// Round each coordinate of `point` to the nearest multiple of `cfg.spacing`
pub fn snap(point: Point3, cfg: GridConfig) -> Point3 {
    Point3::new(
        cfg.snap_scalar(point.x),
        cfg.snap_scalar(point.y),
        cfg.snap_scalar(point.z),
    )
}

/// Snap when `enabled`, identity otherwise
pub fn snap_if(point: Point3, cfg: GridConfig, enabled: bool) -> Point3 {
    if enabled { snap(point, cfg) } else { point }
}
