//! Interaction state and editor actions

use fdn_core::{LoadType, Point3};

/// Active interaction mode; exactly one at a time
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// No tool active
    #[default]
    Idle,
    /// Box placement; `start` is the first corner once clicked
    CreatingFoundation { start: Option<Point3> },
    /// Polygon outline being collected, committed by finishing
    CreatingPolygon { points: Vec<Point3> },
    /// Guide polyline; each click after the first commits a segment
    CreatingGuideLine { points: Vec<Point3> },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_creating_foundation(&self) -> bool {
        matches!(self, InteractionState::CreatingFoundation { .. })
    }

    pub fn is_creating_polygon(&self) -> bool {
        matches!(self, InteractionState::CreatingPolygon { .. })
    }

    pub fn is_creating_guide_line(&self) -> bool {
        matches!(self, InteractionState::CreatingGuideLine { .. })
    }

    /// Picks are flattened onto the ground plane in foundation modes
    pub fn flattens_to_ground(&self) -> bool {
        self.is_creating_foundation() || self.is_creating_polygon()
    }

    /// Points clicked but not yet committed
    pub fn pending_points(&self) -> &[Point3] {
        match self {
            InteractionState::Idle => &[],
            InteractionState::CreatingFoundation { start } => start.as_slice(),
            InteractionState::CreatingPolygon { points }
            | InteractionState::CreatingGuideLine { points } => points,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "Idle",
            InteractionState::CreatingFoundation { .. } => "Foundation",
            InteractionState::CreatingPolygon { .. } => "Polygon foundation",
            InteractionState::CreatingGuideLine { .. } => "Guide line",
        }
    }
}

/// Actions queued by the shell and processed by [`crate::dispatch_action`]
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Enter box foundation mode
    EnterFoundationMode,
    /// Enter polygon foundation mode
    EnterPolygonMode,
    /// Enter guide-line mode
    EnterGuideLineMode,
    /// Drop pending input and return to idle
    Cancel,
    /// Click at a screen position
    PointerDown { screen_x: f32, screen_y: f32 },
    /// Cursor moved to a screen position
    PointerMove { screen_x: f32, screen_y: f32 },
    /// Close and commit the polygon being drawn
    FinishPolygon,
    /// Delete a committed foundation by index
    RemoveFoundation(usize),
    /// Apply a new load to every committed foundation
    ApplyLoad { load_type: LoadType, load_value: f32 },
    /// Apply the panel's current load to every committed foundation
    ApplyPanelLoad,
    /// Recompute every stress field from stored specs
    RecomputeAll,
    /// Add an attracting snap point
    AddSnapPoint {
        position: Point3,
        radius: Option<f32>,
    },
    /// Show or hide guide lines and snap points
    ToggleGuideLines,
    /// Remove all guide lines and snap points
    ClearGuideLines,
}
