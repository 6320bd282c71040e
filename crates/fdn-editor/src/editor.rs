//! Foundation editor: interaction state machine and owner of committed entities

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use fdn_core::constants::GROUND_Z;
use fdn_core::{
    BoxFootprint, Foundation, FoundationError, FoundationSpec, GuideLine,
    GuideLines, LoadType, Point3, StressRange, recompute_all, snap_if,
};

use crate::config::EditorConfig;
use crate::scene::{
    GUIDE_LINES_OBJECT, ObjectRole, PREVIEW_OBJECT, SNAP_POINTS_OBJECT, SceneGeometry,
    ScenePalette, SceneSink,
};
use crate::settings::ToolSettings;
use crate::state::{EditorAction, InteractionState};

/// Editor-level errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error(transparent)]
    Foundation(#[from] FoundationError),

    #[error("Not drawing a polygon")]
    NotInPolygonMode,

    #[error("Foundation not found: {0}")]
    FoundationNotFound(usize),
}

impl EditorError {
    /// Errors the user can fix by retrying; the editor state stays clean
    pub fn is_recoverable(&self) -> bool {
        match self {
            EditorError::Foundation(e) => e.is_recoverable(),
            EditorError::NotInPolygonMode | EditorError::FoundationNotFound(_) => true,
        }
    }
}

/// What an event or action changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Nothing happened (idle, pick miss)
    Ignored,
    /// Interaction mode switched
    ModeChanged,
    /// First point of a box or guide line recorded
    StartPlaced,
    /// Polygon vertex added; holds the vertex count so far
    PolygonVertexAdded(usize),
    /// Foundation committed at this index
    FoundationCommitted(usize),
    /// Foundation removed from this index
    FoundationRemoved(usize),
    /// Guide line committed at this index
    GuideLineCommitted(usize),
    /// Stress fields recomputed
    Recomputed,
    /// Guide lines or snap points changed
    GuidesUpdated,
}

/// Interaction state machine owning committed foundations and guide lines
#[derive(Debug)]
pub struct Editor {
    state: InteractionState,
    foundations: Vec<Foundation>,
    guides: GuideLines,
    stress_range: Option<StressRange>,
    palette: ScenePalette,
    snap_point_threshold: f32,
    pending_actions: Vec<EditorAction>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_config(&EditorConfig::default())
    }
}

impl Editor {
    /// Create an idle editor with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle editor from a loaded configuration
    pub fn with_config(config: &EditorConfig) -> Self {
        let mut guides = GuideLines::new();
        guides.set_visible(config.show_guide_lines);
        Self {
            state: InteractionState::Idle,
            foundations: Vec::new(),
            guides,
            stress_range: None,
            palette: config.palette,
            snap_point_threshold: config.snap_point_threshold,
            pending_actions: Vec::new(),
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Committed foundations in commit order
    pub fn foundations(&self) -> &[Foundation] {
        &self.foundations
    }

    pub fn guide_lines(&self) -> &GuideLines {
        &self.guides
    }

    /// Global stress range across all committed foundations
    pub fn stress_range(&self) -> Option<StressRange> {
        self.stress_range
    }

    // ============== Modes ==============

    /// Switch to box foundation mode, discarding pending input
    pub fn enter_foundation_mode(&mut self, sink: &mut dyn SceneSink) {
        self.set_state(InteractionState::CreatingFoundation { start: None }, sink);
    }

    /// Switch to polygon foundation mode, discarding pending input
    pub fn enter_polygon_mode(&mut self, sink: &mut dyn SceneSink) {
        self.set_state(InteractionState::CreatingPolygon { points: Vec::new() }, sink);
    }

    /// Switch to guide-line mode, discarding pending input
    pub fn enter_guideline_mode(&mut self, sink: &mut dyn SceneSink) {
        self.set_state(
            InteractionState::CreatingGuideLine { points: Vec::new() },
            sink,
        );
    }

    /// Drop pending input without committing and return to idle
    pub fn cancel(&mut self, sink: &mut dyn SceneSink) {
        self.set_state(InteractionState::Idle, sink);
    }

    fn set_state(&mut self, state: InteractionState, sink: &mut dyn SceneSink) {
        sink.remove(PREVIEW_OBJECT);
        info!("Interaction mode: {} -> {}", self.state.name(), state.name());
        self.state = state;
    }

    // ============== Pointer events ==============

    /// Flatten (in foundation modes), grid-snap and snap-point attract a pick
    fn resolve_point(&self, raw: Point3, settings: &ToolSettings) -> Point3 {
        let flatten = self.state.flattens_to_ground();
        let mut p = raw;
        if flatten {
            p.z = GROUND_Z;
        }
        p = snap_if(p, settings.grid, settings.snap_enabled);
        if settings.snap_enabled && !self.guides.snap_points().is_empty() {
            p = self
                .guides
                .snap_to_nearest_point(p, self.snap_point_threshold);
            if flatten {
                p.z = GROUND_Z;
            }
        }
        p
    }

    /// Handle a click at world position `raw`
    pub fn pointer_down(
        &mut self,
        raw: Point3,
        settings: &ToolSettings,
        sink: &mut dyn SceneSink,
    ) -> Result<EditOutcome, EditorError> {
        let p = self.resolve_point(raw, settings);
        match &mut self.state {
            InteractionState::Idle => Ok(EditOutcome::Ignored),

            InteractionState::CreatingFoundation { start: None } => {
                self.state = InteractionState::CreatingFoundation { start: Some(p) };
                debug!("Foundation start at {:?}", p);
                Ok(EditOutcome::StartPlaced)
            }

            InteractionState::CreatingFoundation { start: Some(start) } => {
                let spec = FoundationSpec::rectangle(*start, p, settings.thickness)
                    .with_load(settings.load_type, settings.load_value)
                    .with_material(settings.material);
                // Mode persists; the next click starts a new foundation
                self.state = InteractionState::CreatingFoundation { start: None };
                sink.remove(PREVIEW_OBJECT);
                self.commit(spec, sink)
            }

            InteractionState::CreatingPolygon { points } => {
                points.push(p);
                let count = points.len();
                debug!("Polygon vertex {} at {:?}", count, p);
                Ok(EditOutcome::PolygonVertexAdded(count))
            }

            InteractionState::CreatingGuideLine { points } => {
                points.push(p);
                let [.., a, b] = points.as_slice() else {
                    return Ok(EditOutcome::StartPlaced);
                };
                let index = self.guides.push(GuideLine::new(*a, *b));
                info!("Committed guide line {}: {:?} -> {:?}", index, a, b);
                sink.remove(PREVIEW_OBJECT);
                self.publish_guides(sink);
                Ok(EditOutcome::GuideLineCommitted(index))
            }
        }
    }

    /// Refresh the preview for a cursor at world position `raw`
    ///
    /// Only the preview object is touched; committed geometry is not
    /// recomputed.
    pub fn pointer_move(&mut self, raw: Point3, settings: &ToolSettings, sink: &mut dyn SceneSink) {
        let p = self.resolve_point(raw, settings);
        match &self.state {
            InteractionState::CreatingFoundation { start: Some(start) } => {
                let preview = BoxFootprint::from_corners(*start, p, settings.thickness)
                    .and_then(|footprint| footprint.mesh());
                match preview {
                    Ok(mesh) => {
                        self.push_preview(SceneGeometry::Mesh(&mesh), sink);
                    }
                    // Too small to show; drop whatever was shown before
                    Err(_) => sink.remove(PREVIEW_OBJECT),
                }
            }

            InteractionState::CreatingPolygon { points } if !points.is_empty() => {
                let mut segments: Vec<GuideLine> = points
                    .windows(2)
                    .map(|w| GuideLine::new(w[0], w[1]))
                    .collect();
                if let Some(last) = points.last() {
                    segments.push(GuideLine::new(*last, p));
                }
                if points.len() >= 2 {
                    segments.push(GuideLine::new(p, points[0]));
                }
                self.push_preview(SceneGeometry::Lines(&segments), sink);
            }

            InteractionState::CreatingGuideLine { points } => {
                if let Some(last) = points.last() {
                    let segment = [GuideLine::new(*last, p)];
                    self.push_preview(SceneGeometry::Lines(&segment), sink);
                }
            }

            _ => {}
        }
    }

    fn push_preview(&self, geometry: SceneGeometry<'_>, sink: &mut dyn SceneSink) {
        sink.remove(PREVIEW_OBJECT);
        sink.upsert(
            PREVIEW_OBJECT,
            geometry,
            &self.palette.style(ObjectRole::Preview),
        );
    }

    /// Close the polygon being drawn and commit it as a foundation
    ///
    /// On a degenerate outline the points are discarded and polygon mode
    /// stays active.
    pub fn finish_polygon(
        &mut self,
        settings: &ToolSettings,
        sink: &mut dyn SceneSink,
    ) -> Result<EditOutcome, EditorError> {
        let InteractionState::CreatingPolygon { points } = &mut self.state else {
            return Err(EditorError::NotInPolygonMode);
        };
        let outline = std::mem::take(points);
        sink.remove(PREVIEW_OBJECT);
        let spec = FoundationSpec::polygon(outline, settings.thickness)
            .with_load(settings.load_type, settings.load_value)
            .with_material(settings.material);
        self.commit(spec, sink)
    }

    /// Build, compute and append a foundation; nothing is kept on failure
    fn commit(
        &mut self,
        spec: FoundationSpec,
        sink: &mut dyn SceneSink,
    ) -> Result<EditOutcome, EditorError> {
        let foundation = match Foundation::from_spec(spec) {
            Ok(foundation) => foundation,
            Err(e) => {
                if e.is_recoverable() {
                    warn!("Foundation rejected: {}", e);
                } else {
                    error!("Foundation build failed: {}", e);
                }
                return Err(e.into());
            }
        };

        sink.upsert(
            &foundation.scene_name(),
            SceneGeometry::Mesh(&foundation.mesh),
            &self.palette.style(ObjectRole::Foundation),
        );
        info!(
            "Committed foundation {} ({:.2} x {:.2} m, max stress {:.1} Pa)",
            foundation.id,
            foundation.spec.footprint.width(),
            foundation.spec.footprint.length(),
            foundation.max_stress()
        );
        self.foundations.push(foundation);
        self.refresh_color_range(sink);
        Ok(EditOutcome::FoundationCommitted(self.foundations.len() - 1))
    }

    // ============== Committed foundations ==============

    /// Delete a committed foundation and its scene object
    pub fn remove_foundation(
        &mut self,
        index: usize,
        sink: &mut dyn SceneSink,
    ) -> Result<Foundation, EditorError> {
        if index >= self.foundations.len() {
            return Err(EditorError::FoundationNotFound(index));
        }
        let foundation = self.foundations.remove(index);
        sink.remove(&foundation.scene_name());
        info!("Removed foundation {}", foundation.id);
        self.refresh_color_range(sink);
        Ok(foundation)
    }

    /// Recompute every stress field from the stored specs and republish
    pub fn recompute_all(
        &mut self,
        sink: &mut dyn SceneSink,
    ) -> Result<Option<StressRange>, EditorError> {
        let (arrays, range) = recompute_all(&self.foundations).map_err(FoundationError::from)?;
        for (foundation, stress) in self.foundations.iter_mut().zip(arrays) {
            foundation.mesh.stress = stress;
            sink.upsert(
                &foundation.scene_name(),
                SceneGeometry::Mesh(&foundation.mesh),
                &self.palette.style(ObjectRole::Foundation),
            );
        }
        self.stress_range = range;
        if let Some(range) = range {
            sink.set_color_range(range.min, range.max);
        }
        Ok(range)
    }

    /// Rewrite every committed foundation's load and recompute
    pub fn apply_load(
        &mut self,
        load_type: LoadType,
        load_value: f32,
        sink: &mut dyn SceneSink,
    ) -> Result<Option<StressRange>, EditorError> {
        let previous: Vec<(LoadType, f32)> = self
            .foundations
            .iter()
            .map(|f| (f.spec.load_type, f.spec.load_value))
            .collect();
        for foundation in &mut self.foundations {
            foundation.spec.load_type = load_type;
            foundation.spec.load_value = load_value;
        }
        let result = self.recompute_all(sink);
        if result.is_err() {
            // Keep specs consistent with the stress arrays still shown
            for (foundation, (prev_type, prev_value)) in self.foundations.iter_mut().zip(previous) {
                foundation.spec.load_type = prev_type;
                foundation.spec.load_value = prev_value;
            }
        }
        result
    }

    fn refresh_color_range(&mut self, sink: &mut dyn SceneSink) {
        self.stress_range = StressRange::from_values(
            self.foundations
                .iter()
                .flat_map(|f| f.mesh.stress.iter().copied()),
        );
        if let Some(range) = self.stress_range {
            sink.set_color_range(range.min, range.max);
        }
    }

    // ============== Guide lines ==============

    /// Add an attracting snap point
    pub fn add_snap_point(&mut self, position: Point3, radius: Option<f32>, sink: &mut dyn SceneSink) {
        self.guides.add_snap_point(position, radius);
        self.publish_guides(sink);
    }

    /// Show or hide guide lines and snap points
    pub fn toggle_guide_lines(&mut self, sink: &mut dyn SceneSink) -> bool {
        let visible = self.guides.toggle_visibility();
        self.publish_guides(sink);
        visible
    }

    /// Remove all guide lines and snap points
    pub fn clear_guide_lines(&mut self, sink: &mut dyn SceneSink) {
        self.guides.clear();
        self.publish_guides(sink);
    }

    fn publish_guides(&self, sink: &mut dyn SceneSink) {
        sink.remove(GUIDE_LINES_OBJECT);
        sink.remove(SNAP_POINTS_OBJECT);
        if !self.guides.is_visible() {
            return;
        }
        if !self.guides.is_empty() {
            sink.upsert(
                GUIDE_LINES_OBJECT,
                SceneGeometry::Lines(self.guides.lines()),
                &self.palette.style(ObjectRole::GuideLines),
            );
        }
        if !self.guides.snap_points().is_empty() {
            sink.upsert(
                SNAP_POINTS_OBJECT,
                SceneGeometry::Points(self.guides.snap_points()),
                &self.palette.style(ObjectRole::SnapPoints),
            );
        }
    }

    // ============== Action queue ==============

    /// Queue an action
    pub fn queue_action(&mut self, action: EditorAction) {
        self.pending_actions.push(action);
    }

    /// Take pending actions
    pub fn take_pending_actions(&mut self) -> Vec<EditorAction> {
        std::mem::take(&mut self.pending_actions)
    }
}

pub type SharedEditor = Arc<Mutex<Editor>>;

/// Create a new shared editor
pub fn create_shared_editor(config: &EditorConfig) -> SharedEditor {
    Arc::new(Mutex::new(Editor::with_config(config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MemorySink, StoredGeometry};
    use approx::assert_relative_eq;
    use fdn_core::GeometryError;

    fn no_snap() -> ToolSettings {
        ToolSettings::default().with_snap(false)
    }

    #[test]
    fn test_idle_ignores_clicks() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let outcome = editor
            .pointer_down(Point3::new(1.0, 1.0, 0.0), &no_snap(), &mut sink)
            .unwrap();
        assert_eq!(outcome, EditOutcome::Ignored);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_start_is_flattened_then_snapped() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        editor.enter_foundation_mode(&mut sink);
        editor
            .pointer_down(Point3::new(1.4, 2.6, 3.7), &ToolSettings::default(), &mut sink)
            .unwrap();
        assert_eq!(
            editor.state(),
            &InteractionState::CreatingFoundation {
                start: Some(Point3::new(1.0, 3.0, 0.0))
            }
        );
    }

    #[test]
    fn test_unusable_grid_never_commits_nan() {
        let config = EditorConfig::from_ron("(tool_defaults: (grid: (spacing: 0.0)))").unwrap();
        let raw_zero = ToolSettings::default().with_grid_spacing(0.0);
        for settings in [config.tool_defaults, raw_zero] {
            let mut editor = Editor::with_config(&config);
            let mut sink = MemorySink::new();
            editor.enter_foundation_mode(&mut sink);
            editor.pointer_down(Point3::ZERO, &settings, &mut sink).unwrap();
            let outcome = editor
                .pointer_down(Point3::new(5.0, 3.0, 0.0), &settings, &mut sink)
                .unwrap();
            assert_eq!(outcome, EditOutcome::FoundationCommitted(0));
            let foundation = &editor.foundations()[0];
            assert!(foundation.mesh.vertices.iter().all(|v| v.is_finite()));
            assert!(foundation.mesh.stress.iter().all(|s| s.is_finite()));
            let range = editor.stress_range().unwrap();
            assert!(range.min.is_finite() && range.max.is_finite());
        }
    }

    #[test]
    fn test_nan_pick_rejected() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        editor.enter_foundation_mode(&mut sink);
        editor.pointer_down(Point3::ZERO, &no_snap(), &mut sink).unwrap();
        let err = editor
            .pointer_down(Point3::new(f32::NAN, 3.0, 0.0), &no_snap(), &mut sink)
            .unwrap_err();
        assert!(err.is_recoverable());
        assert!(editor.foundations().is_empty());
        assert_eq!(editor.stress_range(), None);
    }

    #[test]
    fn test_too_small_resets_start() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        editor.enter_foundation_mode(&mut sink);
        editor.pointer_down(Point3::ZERO, &no_snap(), &mut sink).unwrap();
        let err = editor
            .pointer_down(Point3::new(0.05, 5.0, 0.0), &no_snap(), &mut sink)
            .unwrap_err();
        assert!(err.is_recoverable());
        assert!(matches!(
            err,
            EditorError::Foundation(FoundationError::Geometry(
                GeometryError::GeometryTooSmall { .. }
            ))
        ));
        assert_eq!(
            editor.state(),
            &InteractionState::CreatingFoundation { start: None }
        );
        assert!(editor.foundations().is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_mode_persists_across_commits() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let settings = no_snap();
        editor.enter_foundation_mode(&mut sink);
        for i in 0..3 {
            let x = i as f32 * 10.0;
            editor.pointer_down(Point3::new(x, 0.0, 0.0), &settings, &mut sink).unwrap();
            let outcome = editor
                .pointer_down(Point3::new(x + 2.0, 2.0, 0.0), &settings, &mut sink)
                .unwrap();
            assert_eq!(outcome, EditOutcome::FoundationCommitted(i));
        }
        assert_eq!(editor.foundations().len(), 3);
        assert_eq!(sink.count_role(ObjectRole::Foundation), 3);
        assert!(editor.state().is_creating_foundation());
    }

    #[test]
    fn test_preview_single_object() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let settings = no_snap();
        editor.enter_foundation_mode(&mut sink);

        // No start yet: nothing to preview
        editor.pointer_move(Point3::new(1.0, 1.0, 0.0), &settings, &mut sink);
        assert!(sink.is_empty());

        editor.pointer_down(Point3::ZERO, &settings, &mut sink).unwrap();
        for i in 1..5 {
            let p = Point3::new(i as f32, i as f32 * 0.5, 0.0);
            editor.pointer_move(p, &settings, &mut sink);
            assert_eq!(sink.count_role(ObjectRole::Preview), 1);
        }
        assert_eq!(sink.len(), 1);
        assert!(editor.foundations().is_empty());

        // Shrinking below the minimum hides the preview
        editor.pointer_move(Point3::new(0.05, 3.0, 0.0), &settings, &mut sink);
        assert!(!sink.contains(PREVIEW_OBJECT));
    }

    #[test]
    fn test_preview_is_flattened() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let settings = no_snap().with_thickness(0.5);
        editor.enter_foundation_mode(&mut sink);
        editor.pointer_down(Point3::ZERO, &settings, &mut sink).unwrap();
        editor.pointer_move(Point3::new(2.0, 2.0, 7.0), &settings, &mut sink);
        let StoredGeometry::Mesh(mesh) = &sink.get(PREVIEW_OBJECT).unwrap().geometry else {
            panic!("preview is not a mesh");
        };
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min.z, 0.0);
        assert_eq!(max.z, 0.5);
    }

    #[test]
    fn test_mode_switch_clears_preview_and_pending() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let settings = no_snap();
        editor.enter_guideline_mode(&mut sink);
        editor.pointer_down(Point3::ZERO, &settings, &mut sink).unwrap();
        editor.pointer_move(Point3::new(3.0, 0.0, 0.0), &settings, &mut sink);
        assert!(sink.contains(PREVIEW_OBJECT));

        editor.enter_foundation_mode(&mut sink);
        assert!(!sink.contains(PREVIEW_OBJECT));
        assert_eq!(
            editor.state(),
            &InteractionState::CreatingFoundation { start: None }
        );
        assert!(editor.guide_lines().is_empty());
    }

    #[test]
    fn test_polygon_commit() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let settings = no_snap().with_thickness(0.6);
        editor.enter_polygon_mode(&mut sink);
        let outline = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 3.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ];
        for (i, p) in outline.iter().enumerate() {
            let outcome = editor.pointer_down(*p, &settings, &mut sink).unwrap();
            assert_eq!(outcome, EditOutcome::PolygonVertexAdded(i + 1));
        }
        editor.pointer_move(Point3::new(0.5, 0.5, 0.0), &settings, &mut sink);
        let StoredGeometry::Lines(segments) = &sink.get(PREVIEW_OBJECT).unwrap().geometry else {
            panic!("polygon preview is not lines");
        };
        // 5 outline edges, cursor edge, closing edge
        assert_eq!(segments.len(), 7);

        let outcome = editor.finish_polygon(&settings, &mut sink).unwrap();
        assert_eq!(outcome, EditOutcome::FoundationCommitted(0));
        assert!(!sink.contains(PREVIEW_OBJECT));
        let foundation = &editor.foundations()[0];
        assert_eq!(foundation.mesh.vertex_count(), 12);
        assert_relative_eq!(foundation.volume(), 6.0 * 0.6, max_relative = 1e-5);
        assert_eq!(
            editor.state(),
            &InteractionState::CreatingPolygon { points: Vec::new() }
        );
    }

    #[test]
    fn test_degenerate_polygon_recoverable() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let settings = no_snap();
        editor.enter_polygon_mode(&mut sink);
        editor.pointer_down(Point3::ZERO, &settings, &mut sink).unwrap();
        editor.pointer_down(Point3::X, &settings, &mut sink).unwrap();
        let err = editor.finish_polygon(&settings, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            EditorError::Foundation(FoundationError::Geometry(
                GeometryError::DegeneratePolygon(_)
            ))
        ));
        assert!(err.is_recoverable());
        assert!(editor.state().pending_points().is_empty());
        assert!(editor.state().is_creating_polygon());
        assert!(editor.foundations().is_empty());
    }

    #[test]
    fn test_finish_polygon_outside_mode() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        assert_eq!(
            editor.finish_polygon(&no_snap(), &mut sink),
            Err(EditorError::NotInPolygonMode)
        );
    }

    #[test]
    fn test_color_range_spans_all_foundations() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        editor.enter_foundation_mode(&mut sink);
        let light = no_snap().with_load(LoadType::Uniform, 10_000.0);
        let heavy = no_snap().with_load(LoadType::PointCenter, 500_000.0);
        editor.pointer_down(Point3::ZERO, &light, &mut sink).unwrap();
        editor.pointer_down(Point3::new(2.0, 2.0, 0.0), &light, &mut sink).unwrap();
        editor.pointer_down(Point3::new(5.0, 0.0, 0.0), &heavy, &mut sink).unwrap();
        editor.pointer_down(Point3::new(7.0, 2.0, 0.0), &heavy, &mut sink).unwrap();

        let range = editor.stress_range().unwrap();
        assert_eq!(sink.color_range(), Some(range));
        for foundation in editor.foundations() {
            for s in &foundation.mesh.stress {
                assert!(*s >= range.min && *s <= range.max);
            }
        }
        let light_max = editor.foundations()[0].max_stress();
        assert!(light_max < range.max);
        let colors = sink
            .vertex_colors(&editor.foundations()[1].scene_name())
            .unwrap();
        assert_eq!(colors.len(), 8);
    }

    #[test]
    fn test_remove_foundation() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let settings = no_snap();
        editor.enter_foundation_mode(&mut sink);
        editor.pointer_down(Point3::ZERO, &settings, &mut sink).unwrap();
        editor.pointer_down(Point3::new(2.0, 2.0, 0.0), &settings, &mut sink).unwrap();
        let name = editor.foundations()[0].scene_name();

        assert_eq!(
            editor.remove_foundation(3, &mut sink).unwrap_err(),
            EditorError::FoundationNotFound(3)
        );
        let removed = editor.remove_foundation(0, &mut sink).unwrap();
        assert_eq!(removed.scene_name(), name);
        assert!(!sink.contains(&name));
        assert!(editor.foundations().is_empty());
        assert_eq!(editor.stress_range(), None);
    }

    #[test]
    fn test_apply_load_scales_stress_only() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let settings = no_snap().with_load(LoadType::Uniform, 100_000.0);
        editor.enter_foundation_mode(&mut sink);
        editor.pointer_down(Point3::ZERO, &settings, &mut sink).unwrap();
        editor.pointer_down(Point3::new(5.0, 3.0, 0.0), &settings, &mut sink).unwrap();
        let before = editor.foundations()[0].clone();

        let range = editor
            .apply_load(LoadType::Uniform, 200_000.0, &mut sink)
            .unwrap()
            .unwrap();
        let after = &editor.foundations()[0];
        assert_eq!(after.id, before.id);
        assert_eq!(after.mesh.vertices, before.mesh.vertices);
        assert_eq!(after.mesh.faces, before.mesh.faces);
        for (new, old) in after.mesh.stress.iter().zip(&before.mesh.stress) {
            assert_relative_eq!(*new, old * 2.0, max_relative = 1e-5);
        }
        assert_eq!(sink.color_range(), Some(range));
    }

    #[test]
    fn test_apply_invalid_load_keeps_previous_specs() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let settings = no_snap();
        editor.enter_foundation_mode(&mut sink);
        editor.pointer_down(Point3::ZERO, &settings, &mut sink).unwrap();
        editor.pointer_down(Point3::new(1.0, 1.0, 0.0), &settings, &mut sink).unwrap();

        let err = editor
            .apply_load(LoadType::Linear, -1.0, &mut sink)
            .unwrap_err();
        assert!(err.is_recoverable());
        let spec = &editor.foundations()[0].spec;
        assert_eq!(spec.load_type, LoadType::Uniform);
        assert_eq!(spec.load_value, settings.load_value);
    }

    #[test]
    fn test_snap_point_attraction() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let settings = ToolSettings::default().with_grid_spacing(0.1);
        editor.add_snap_point(Point3::new(2.05, 1.0, 0.0), None, &mut sink);
        assert!(sink.contains(SNAP_POINTS_OBJECT));

        editor.enter_guideline_mode(&mut sink);
        editor.pointer_down(Point3::new(2.2, 1.1, 0.0), &settings, &mut sink).unwrap();
        assert_eq!(
            editor.state().pending_points(),
            &[Point3::new(2.05, 1.0, 0.0)]
        );

        // Snapping off: no attraction either
        editor.pointer_down(Point3::new(2.2, 1.1, 0.0), &settings.with_snap(false), &mut sink).unwrap();
        assert_eq!(editor.state().pending_points()[1], Point3::new(2.2, 1.1, 0.0));
    }

    #[test]
    fn test_guide_visibility_and_clear() {
        let mut editor = Editor::new();
        let mut sink = MemorySink::new();
        let settings = no_snap();
        editor.enter_guideline_mode(&mut sink);
        editor.pointer_down(Point3::ZERO, &settings, &mut sink).unwrap();
        editor.pointer_down(Point3::X, &settings, &mut sink).unwrap();
        assert!(sink.contains(GUIDE_LINES_OBJECT));

        assert!(!editor.toggle_guide_lines(&mut sink));
        assert!(!sink.contains(GUIDE_LINES_OBJECT));
        assert_eq!(editor.guide_lines().len(), 1);

        assert!(editor.toggle_guide_lines(&mut sink));
        assert!(sink.contains(GUIDE_LINES_OBJECT));

        editor.clear_guide_lines(&mut sink);
        assert!(editor.guide_lines().is_empty());
        assert!(!sink.contains(GUIDE_LINES_OBJECT));
    }

    #[test]
    fn test_action_queue() {
        let mut editor = Editor::new();
        editor.queue_action(EditorAction::EnterFoundationMode);
        editor.queue_action(EditorAction::Cancel);
        assert_eq!(
            editor.take_pending_actions(),
            vec![EditorAction::EnterFoundationMode, EditorAction::Cancel]
        );
        assert!(editor.take_pending_actions().is_empty());
    }
}
