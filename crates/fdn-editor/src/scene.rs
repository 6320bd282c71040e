//! Collaborator interfaces: scene sink, picking source, tool panel
//!
//! The renderer, the ray caster and the widget toolkit live outside this
//! crate. The editor only talks to them through these traits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use fdn_core::{ColorScale, FoundationMesh, GuideLine, Point3, SnapPoint, StressRange};

use crate::settings::ToolSettings;

/// Name of the single live preview object
pub const PREVIEW_OBJECT: &str = "preview";

/// Name of the combined guide-line object
pub const GUIDE_LINES_OBJECT: &str = "auxiliary_lines";

/// Name of the combined snap-point marker object
pub const SNAP_POINTS_OBJECT: &str = "snap_points";

/// Geometry handed to the scene for one named object
#[derive(Debug, Clone, Copy)]
pub enum SceneGeometry<'a> {
    /// Solid mesh, with its per-vertex stress
    Mesh(&'a FoundationMesh),
    /// Line segments
    Lines(&'a [GuideLine]),
    /// Point markers
    Points(&'a [SnapPoint]),
}

/// What an object represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectRole {
    Foundation,
    Preview,
    GuideLines,
    SnapPoints,
}

/// Display parameters for a scene object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectStyle {
    pub role: ObjectRole,
    /// Base colour (RGBA); alpha is the opacity
    pub color: [f32; 4],
    pub line_width: f32,
    pub show_edges: bool,
    /// Colour by the stress scalars through the shared range
    pub use_scalars: bool,
}

/// Colours for each object role
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenePalette {
    pub foundation: [f32; 4],
    pub preview: [f32; 4],
    pub guide_line: [f32; 4],
    pub guide_line_width: f32,
    pub snap_point: [f32; 4],
}

impl Default for ScenePalette {
    fn default() -> Self {
        Self {
            foundation: [0.82, 0.71, 0.55, 1.0],
            preview: [0.30, 0.69, 0.31, 0.4],
            guide_line: [1.0, 1.0, 0.0, 1.0],
            guide_line_width: 2.0,
            snap_point: [1.0, 0.0, 0.0, 0.5],
        }
    }
}

impl ScenePalette {
    pub fn style(&self, role: ObjectRole) -> ObjectStyle {
        match role {
            ObjectRole::Foundation => ObjectStyle {
                role,
                color: self.foundation,
                line_width: 1.0,
                show_edges: true,
                use_scalars: true,
            },
            ObjectRole::Preview => ObjectStyle {
                role,
                color: self.preview,
                line_width: 1.0,
                show_edges: true,
                use_scalars: false,
            },
            ObjectRole::GuideLines => ObjectStyle {
                role,
                color: self.guide_line,
                line_width: self.guide_line_width,
                show_edges: false,
                use_scalars: false,
            },
            ObjectRole::SnapPoints => ObjectStyle {
                role,
                color: self.snap_point,
                line_width: 1.0,
                show_edges: false,
                use_scalars: false,
            },
        }
    }
}

/// Handle returned by [`SceneSink::upsert`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub String);

impl SceneHandle {
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Receiver of geometry to render
///
/// Upserting under an existing name replaces the previous visual. Removing
/// an absent name is a no-op.
pub trait SceneSink {
    fn upsert(&mut self, name: &str, geometry: SceneGeometry<'_>, style: &ObjectStyle)
    -> SceneHandle;

    fn remove(&mut self, name: &str);

    /// Shared stress colour scale for every foundation
    fn set_color_range(&mut self, min: f32, max: f32);
}

/// World-space intersection of a screen ray with the pickable surface
pub trait PickingSource {
    fn pick(&self, screen_x: f32, screen_y: f32) -> Option<Point3>;
}

impl<F> PickingSource for F
where
    F: Fn(f32, f32) -> Option<Point3>,
{
    fn pick(&self, screen_x: f32, screen_y: f32) -> Option<Point3> {
        self(screen_x, screen_y)
    }
}

/// Source of the current tool settings, polled once per event
pub trait ToolPanel {
    fn settings(&self) -> ToolSettings;
}

impl ToolPanel for ToolSettings {
    fn settings(&self) -> ToolSettings {
        *self
    }
}

/// Owned copy of geometry held by [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoredGeometry {
    Mesh(FoundationMesh),
    Lines(Vec<GuideLine>),
    Points(Vec<SnapPoint>),
}

impl From<SceneGeometry<'_>> for StoredGeometry {
    fn from(geometry: SceneGeometry<'_>) -> Self {
        match geometry {
            SceneGeometry::Mesh(mesh) => StoredGeometry::Mesh(mesh.clone()),
            SceneGeometry::Lines(lines) => StoredGeometry::Lines(lines.to_vec()),
            SceneGeometry::Points(points) => StoredGeometry::Points(points.to_vec()),
        }
    }
}

/// Object held by [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub geometry: StoredGeometry,
    pub style: ObjectStyle,
}

/// Headless scene that keeps copies of everything pushed to it
#[derive(Debug, Default)]
pub struct MemorySink {
    objects: HashMap<String, StoredObject>,
    color_range: Option<StressRange>,
    upserts: usize,
    removals: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&StoredObject> {
        self.objects.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Names of live objects, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.objects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Live objects with the given role
    pub fn count_role(&self, role: ObjectRole) -> usize {
        self.objects.values().filter(|o| o.style.role == role).count()
    }

    pub fn color_range(&self) -> Option<StressRange> {
        self.color_range
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts
    }

    pub fn removal_count(&self) -> usize {
        self.removals
    }

    /// Per-vertex colours of a stored mesh through the shared range
    pub fn vertex_colors(&self, name: &str) -> Option<Vec<[f32; 4]>> {
        let range = self.color_range?;
        match &self.objects.get(name)?.geometry {
            StoredGeometry::Mesh(mesh) => Some(ColorScale::new(range).colorize(mesh)),
            _ => None,
        }
    }
}

impl SceneSink for MemorySink {
    fn upsert(
        &mut self,
        name: &str,
        geometry: SceneGeometry<'_>,
        style: &ObjectStyle,
    ) -> SceneHandle {
        self.upserts += 1;
        self.objects.insert(
            name.to_string(),
            StoredObject {
                geometry: geometry.into(),
                style: *style,
            },
        );
        SceneHandle(name.to_string())
    }

    fn remove(&mut self, name: &str) {
        if self.objects.remove(name).is_some() {
            self.removals += 1;
        }
    }

    fn set_color_range(&mut self, min: f32, max: f32) {
        self.color_range = Some(StressRange::new(min, max));
    }
}
