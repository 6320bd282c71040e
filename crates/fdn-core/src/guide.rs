//! Guide lines and snap points
//!
//! Purely visual construction aids; they never affect foundation geometry
//! except through snap-point attraction.

use serde::{Deserialize, Serialize};

use crate::Point3;
use crate::constants::SNAP_POINT_RADIUS;

/// A committed guide segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub start: Point3,
    pub end: Point3,
}

impl GuideLine {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// A point that attracts nearby picks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapPoint {
    pub position: Point3,
    /// Display radius of the marker
    pub radius: f32,
}

/// Guide lines and snap points owned by the editor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideLines {
    lines: Vec<GuideLine>,
    snap_points: Vec<SnapPoint>,
    visible: bool,
}

impl Default for GuideLines {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            snap_points: Vec::new(),
            visible: true,
        }
    }
}

impl GuideLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line, returning its index
    pub fn push(&mut self, line: GuideLine) -> usize {
        self.lines.push(line);
        self.lines.len() - 1
    }

    pub fn lines(&self) -> &[GuideLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a snap point with the given marker radius (default radius if `None`)
    pub fn add_snap_point(&mut self, position: Point3, radius: Option<f32>) {
        self.snap_points.push(SnapPoint {
            position,
            radius: radius.unwrap_or(SNAP_POINT_RADIUS),
        });
    }

    pub fn snap_points(&self) -> &[SnapPoint] {
        &self.snap_points
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Toggle visibility, returning the new state
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Remove all lines and snap points
    pub fn clear(&mut self) {
        self.lines.clear();
        self.snap_points.clear();
    }

    /// Nearest snap point strictly within `threshold` of `point`, or `point`
    pub fn snap_to_nearest_point(&self, point: Point3, threshold: f32) -> Point3 {
        self.snap_points
            .iter()
            .map(|s| (s.position, s.position.distance(point)))
            .filter(|(_, d)| *d < threshold)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(point, |(p, _)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_index() {
        let mut guides = GuideLines::new();
        assert!(guides.is_empty());
        assert_eq!(guides.push(GuideLine::new(Point3::ZERO, Point3::X)), 0);
        assert_eq!(guides.push(GuideLine::new(Point3::X, Point3::Y)), 1);
        assert_eq!(guides.len(), 2);
        assert_eq!(guides.lines()[0].length(), 1.0);
    }

    #[test]
    fn test_snap_to_nearest_point() {
        let mut guides = GuideLines::new();
        let p = Point3::new(1.2, 0.9, 0.0);
        assert_eq!(guides.snap_to_nearest_point(p, 0.5), p);

        guides.add_snap_point(Point3::new(1.0, 1.0, 0.0), None);
        guides.add_snap_point(Point3::new(1.5, 1.0, 0.0), Some(0.2));
        assert_eq!(
            guides.snap_to_nearest_point(p, 0.5),
            Point3::new(1.0, 1.0, 0.0)
        );
        // Out of range
        assert_eq!(guides.snap_to_nearest_point(p, 0.1), p);
        assert_eq!(guides.snap_points()[0].radius, SNAP_POINT_RADIUS);
    }

    #[test]
    fn test_visibility_and_clear() {
        let mut guides = GuideLines::new();
        guides.push(GuideLine::new(Point3::ZERO, Point3::X));
        guides.add_snap_point(Point3::ZERO, None);
        assert!(guides.is_visible());
        assert!(!guides.toggle_visibility());
        guides.clear();
        assert!(guides.is_empty());
        assert!(guides.snap_points().is_empty());
        assert!(!guides.is_visible());
    }
}
