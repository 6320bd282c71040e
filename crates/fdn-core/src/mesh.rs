//! Foundation mesh representation
//!
//! Polygonal faces (quads and n-gons) indexing into a shared vertex array,
//! plus a per-vertex stress scalar.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Point3;

/// A polygonal face: three or more indices into the vertex array
pub type Face = Vec<u32>;

/// Mesh-related errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidIndex {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("Face {face} has {len} indices (at least 3 required)")]
    DegenerateFace { face: usize, len: usize },
}

/// Closed volumetric mesh of a foundation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationMesh {
    /// Vertex positions
    pub vertices: Vec<Point3>,
    /// Faces, each a loop of vertex indices
    pub faces: Vec<Face>,
    /// Per-vertex stress (Pa), same length as `vertices`
    pub stress: Vec<f32>,
}

impl FoundationMesh {
    /// Create a mesh with a zeroed stress array, validating every face index
    pub fn new(vertices: Vec<Point3>, faces: Vec<Face>) -> Result<Self, MeshError> {
        let stress = vec![0.0; vertices.len()];
        let mesh = Self {
            vertices,
            faces,
            stress,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Check that every face has at least 3 indices and all are in range
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::DegenerateFace {
                    face: face_idx,
                    len: face.len(),
                });
            }
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::InvalidIndex {
                    face: face_idx,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Replace the stress array; returns false (and leaves the mesh untouched)
    /// when the length does not match the vertex count
    pub fn set_stress(&mut self, stress: Vec<f32>) -> bool {
        if stress.len() != self.vertices.len() {
            return false;
        }
        self.stress = stress;
        true
    }

    /// Largest stress value, if any vertex exists
    pub fn max_stress(&self) -> Option<f32> {
        self.stress.iter().copied().reduce(f32::max)
    }

    /// Fan-triangulate every face into a flat index buffer
    pub fn triangle_indices(&self) -> Vec<u32> {
        let count: usize = self.faces.iter().map(|f| f.len().saturating_sub(2) * 3).sum();
        let mut indices = Vec::with_capacity(count);
        for face in &self.faces {
            for i in 1..face.len().saturating_sub(1) {
                indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
            }
        }
        indices
    }

    /// Axis-aligned bounding box (min, max)
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v))),
        )
    }

    /// True when every undirected edge is shared by exactly two faces
    pub fn is_closed(&self) -> bool {
        if self.faces.is_empty() {
            return false;
        }
        let mut edges: HashMap<(u32, u32), u32> = HashMap::new();
        for face in &self.faces {
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                *edges.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        edges.values().all(|&count| count == 2)
    }
}
