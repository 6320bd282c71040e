//! Tool panel settings snapshot

use serde::{Deserialize, Serialize};

use fdn_core::constants::{DEFAULT_LOAD, DEFAULT_THICKNESS, THICKNESS_RANGE};
use fdn_core::{GridConfig, LoadType, Material};

/// Values read from the tool panel for a single event
///
/// The editor never holds on to these; the caller builds a fresh snapshot
/// for every pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Foundation thickness (m)
    pub thickness: f32,
    /// Applied load (N)
    pub load_value: f32,
    pub load_type: LoadType,
    pub material: Material,
    /// Snap picks to the grid (and to snap points)
    pub snap_enabled: bool,
    pub grid: GridConfig,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_THICKNESS,
            load_value: DEFAULT_LOAD,
            load_type: LoadType::default(),
            material: Material::default(),
            snap_enabled: true,
            grid: GridConfig::default(),
        }
    }
}

impl ToolSettings {
    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
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

    pub fn with_snap(mut self, enabled: bool) -> Self {
        self.snap_enabled = enabled;
        self
    }

    pub fn with_grid_spacing(mut self, spacing: f32) -> Self {
        self.grid = GridConfig::new(spacing);
        self
    }

    /// Set the load from kilonewtons, as entered in the panel
    pub fn with_load_kn(self, load_type: LoadType, kilonewtons: f32) -> Self {
        self.with_load(load_type, kilonewtons * 1000.0)
    }

    /// Clamp thickness to the panel range and the load to non-negative
    ///
    /// Non-finite values and an unusable grid fall back to the defaults.
    pub fn clamped(mut self) -> Self {
        self.thickness = if self.thickness.is_finite() {
            self.thickness.clamp(THICKNESS_RANGE.0, THICKNESS_RANGE.1)
        } else {
            DEFAULT_THICKNESS
        };
        self.load_value = if self.load_value.is_finite() {
            self.load_value.max(0.0)
        } else {
            DEFAULT_LOAD
        };
        self.grid = self.grid.sanitized();
        self
    }
}
