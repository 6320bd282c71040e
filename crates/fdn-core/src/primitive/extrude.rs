//! Polygon extrusion
//!
//! The polygon becomes the top cap; its copy translated by `-thickness`
//! along Z becomes the bottom cap; side quads join matching edges.

use glam::Vec2;

use super::{GeometryError, GeometryResult, check_thickness};
use crate::Point3;
use crate::constants::DEGENERATE_AREA_EPSILON;
use crate::mesh::{Face, FoundationMesh};

/// Signed area of the polygon's XY projection (positive when counter-clockwise)
pub fn polygon_signed_area(vertices: &[Point3]) -> f32 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f32 = (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

/// Area-weighted centroid of the XY projection, falling back to the vertex
/// average for zero-area input
pub fn polygon_centroid(vertices: &[Point3]) -> Vec2 {
    if vertices.is_empty() {
        return Vec2::ZERO;
    }
    let area = polygon_signed_area(vertices);
    if area.abs() <= DEGENERATE_AREA_EPSILON {
        let sum: Vec2 = vertices.iter().map(|v| v.truncate()).sum();
        return sum / vertices.len() as f32;
    }

    let n = vertices.len();
    let mut c = Vec2::ZERO;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        c += Vec2::new((a.x + b.x) * cross, (a.y + b.y) * cross);
    }
    c / (6.0 * area)
}

/// True when two non-adjacent edges of the closed outline cross
pub fn polygon_self_intersects(vertices: &[Point3]) -> bool {
    let n = vertices.len();
    if n < 4 {
        return false;
    }
    let edge = |i: usize| (vertices[i].truncate(), vertices[(i + 1) % n].truncate());
    for i in 0..n {
        for j in (i + 2)..n {
            // First and last edges share vertex 0
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a, b) = edge(i);
            let (c, d) = edge(j);
            if segments_cross(a, b, c, d) {
                return true;
            }
        }
    }
    false
}

fn orient(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

fn segments_cross(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let d1 = orient(a, b, c);
    let d2 = orient(a, b, d);
    let d3 = orient(c, d, a);
    let d4 = orient(c, d, b);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

/// Extrude a planar polygon downward into a closed solid
///
/// Vertices `0..n` form the top cap in input order, `n..2n` the bottom cap.
/// Face winding is made outward regardless of the input orientation.
pub fn build_polygon(vertices: &[Point3], thickness: f32) -> GeometryResult<FoundationMesh> {
    check_thickness(thickness)?;
    let n = vertices.len();
    if n < 3 {
        return Err(GeometryError::DegeneratePolygon(format!(
            "{n} vertices (at least 3 required)"
        )));
    }
    if let Some(v) = vertices.iter().find(|v| !v.is_finite()) {
        return Err(GeometryError::NonFinitePoint(format!("{v:?}")));
    }
    let area = polygon_signed_area(vertices);
    if area.abs() <= DEGENERATE_AREA_EPSILON {
        return Err(GeometryError::DegeneratePolygon("zero area".into()));
    }
    if polygon_self_intersects(vertices) {
        return Err(GeometryError::DegeneratePolygon("self-intersecting".into()));
    }

    let offset = Point3::new(0.0, 0.0, -thickness);
    let mut positions = Vec::with_capacity(n * 2);
    positions.extend_from_slice(vertices);
    positions.extend(vertices.iter().map(|v| *v + offset));

    // Walk the outline counter-clockwise so all faces wind outward
    let order: Vec<u32> = if area > 0.0 {
        (0..n as u32).collect()
    } else {
        (0..n as u32).rev().collect()
    };
    let bottom = n as u32;

    let mut faces: Vec<Face> = Vec::with_capacity(n + 2);
    faces.push(order.clone());
    faces.push(order.iter().rev().map(|&i| i + bottom).collect());
    for k in 0..n {
        let i = order[k];
        let j = order[(k + 1) % n];
        faces.push(vec![i, i + bottom, j + bottom, j]);
    }

    Ok(FoundationMesh::new(positions, faces)?)
}
