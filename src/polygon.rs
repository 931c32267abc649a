//! Convex planar polygons with a cached supporting plane.

use crate::plane::Plane;
use crate::vertex::Vertex;

/// A convex polygon: an ordered loop of at least three coplanar vertices
/// whose winding agrees with the cached supporting plane's normal.
///
/// Each polygon carries an optional metadata value that is cloned onto
/// every fragment split off from it, so per-polygon properties (a surface
/// id, a color) survive boolean operations.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,
    /// Supporting plane, computed from the first three vertices.
    pub plane: Plane,
    pub metadata: Option<S>,
}

impl<S: Clone> Polygon<S> {
    /// Build a polygon from a vertex loop.
    ///
    /// # Panics
    /// If `vertices` has fewer than three entries.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        assert!(vertices.len() >= 3, "degenerate polygon");
        let plane = Plane::from_vertices(&vertices);
        Polygon {
            vertices,
            plane,
            metadata,
        }
    }

    /// Reverse the winding: reverse the vertex order, flip every vertex
    /// normal and flip the supporting plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Fan-triangulate the polygon. Valid because the loop is convex.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let mut triangles = Vec::with_capacity(self.vertices.len().saturating_sub(2));
        for i in 1..self.vertices.len().saturating_sub(1) {
            triangles.push([self.vertices[0], self.vertices[i], self.vertices[i + 1]]);
        }
        triangles
    }

    pub fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }

    pub fn metadata_mut(&mut self) -> Option<&mut S> {
        self.metadata.as_mut()
    }

    pub fn set_metadata(&mut self, data: S) {
        self.metadata = Some(data);
    }
}
