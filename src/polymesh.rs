//! Indexed boundary mesh consumed and produced by the CSG engine.

use crate::errors::ValidationError;
use crate::float_types::{Real, WELD_EPSILON};
use crate::vertex::Vertex;
use nalgebra::Vector3;
use std::collections::HashSet;

/// A boundary mesh: a vertex list plus faces stored as winding-ordered
/// loops of vertex indices.
///
/// The CSG engine imports one polygon per face and exports welded,
/// re-triangulated meshes. Faces are assumed convex; nothing verifies
/// that the surface is closed — an open input simply produces an open
/// output.
#[derive(Debug, Clone, Default)]
pub struct PolyMesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Vec<usize>>,
}

/// A directed boundary edge: present in one face, with no opposite-facing
/// twin in any other face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderEdge {
    /// Face owning the edge.
    pub face: usize,
    /// Slot in the face loop: the edge runs `faces[face][slot]` →
    /// `faces[face][(slot + 1) % len]`.
    pub slot: usize,
    pub tail: usize,
    pub head: usize,
}

impl PolyMesh {
    /// Create an empty mesh.
    pub const fn new() -> Self {
        PolyMesh {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// `true` when every face is a triangle.
    pub fn is_triangular(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }

    /// Append a vertex, returning its index.
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Append a face given its vertex indices in winding order, returning
    /// the face index.
    pub fn add_face(&mut self, indices: &[usize]) -> Result<usize, ValidationError> {
        if indices.len() < 3 {
            return Err(ValidationError::TooFewVertices(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i >= self.vertices.len()) {
            return Err(ValidationError::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            });
        }
        self.faces.push(indices.to_vec());
        Ok(self.faces.len() - 1)
    }

    /// Return a triangulated copy. Faces are fan-triangulated, which is
    /// exact for the convex faces this crate deals in.
    pub fn triangulate(&self) -> PolyMesh {
        let mut mesh = self.clone();
        mesh.triangulate_in_place();
        mesh
    }

    /// Fan-triangulate every face in place.
    pub fn triangulate_in_place(&mut self) {
        if self.is_triangular() {
            return;
        }
        let mut triangles = Vec::with_capacity(self.faces.len());
        for face in &self.faces {
            for i in 1..face.len() - 1 {
                triangles.push(vec![face[0], face[i], face[i + 1]]);
            }
        }
        self.faces = triangles;
    }

    /// Return a copy translated by `(dx, dy, dz)`.
    pub fn translate(&self, dx: Real, dy: Real, dz: Real) -> PolyMesh {
        let offset = Vector3::new(dx, dy, dz);
        let mut mesh = self.clone();
        for v in &mut mesh.vertices {
            v.pos += offset;
        }
        mesh
    }

    /// Directed edges that have no opposite-facing twin. A closed,
    /// consistently-wound surface has none.
    pub fn border_edges(&self) -> Vec<BorderEdge> {
        let mut directed = HashSet::new();
        for face in &self.faces {
            for (i, &tail) in face.iter().enumerate() {
                directed.insert((tail, face[(i + 1) % face.len()]));
            }
        }

        let mut borders = Vec::new();
        for (f, face) in self.faces.iter().enumerate() {
            for (i, &tail) in face.iter().enumerate() {
                let head = face[(i + 1) % face.len()];
                if !directed.contains(&(head, tail)) {
                    borders.push(BorderEdge {
                        face: f,
                        slot: i,
                        tail,
                        head,
                    });
                }
            }
        }
        borders
    }

    /// `true` when the mesh has no border edges.
    pub fn is_closed(&self) -> bool {
        self.border_edges().is_empty()
    }

    /// Repair the hairline seams welding leaves behind: merge border
    /// vertices that coincide within the weld tolerance, and split border
    /// edges at border vertices lying on their interior (T-junctions).
    /// Runs to a fixed point; faces touched by a split are re-triangulated.
    pub fn close_seams(&mut self) {
        let mut split_any = false;

        loop {
            let borders = self.border_edges();
            if borders.is_empty() {
                break;
            }

            let mut border_verts: Vec<usize> = Vec::new();
            for edge in &borders {
                if !border_verts.contains(&edge.tail) {
                    border_verts.push(edge.tail);
                }
                if !border_verts.contains(&edge.head) {
                    border_verts.push(edge.head);
                }
            }

            if self.merge_one_coincident_pair(&border_verts) {
                self.drop_degenerate_faces();
                continue;
            }

            if self.split_one_t_junction(&border_verts, &borders) {
                self.drop_degenerate_faces();
                split_any = true;
                continue;
            }

            break;
        }

        if split_any {
            self.triangulate_in_place();
        }
    }

    /// Merge the first pair of distinct border vertices closer than the
    /// weld tolerance. Returns whether a merge happened.
    fn merge_one_coincident_pair(&mut self, border_verts: &[usize]) -> bool {
        for (i, &a) in border_verts.iter().enumerate() {
            for &b in &border_verts[i + 1..] {
                if self.vertices[a].distance_to(&self.vertices[b]) < WELD_EPSILON {
                    for face in &mut self.faces {
                        for index in face.iter_mut() {
                            if *index == b {
                                *index = a;
                            }
                        }
                    }
                    return true;
                }
            }
        }
        false
    }

    /// Split the first border edge that has an unrelated border vertex on
    /// its interior. Returns whether a split happened.
    fn split_one_t_junction(&mut self, border_verts: &[usize], borders: &[BorderEdge]) -> bool {
        for &v in border_verts {
            for edge in borders {
                if edge.tail == v || edge.head == v {
                    continue;
                }
                let p = self.vertices[v].pos;
                let a = self.vertices[edge.tail].pos;
                let b = self.vertices[edge.head].pos;

                let ab = b - a;
                let len2 = ab.norm_squared();
                if len2 == 0.0 {
                    continue;
                }
                let t = (p - a).dot(&ab) / len2;
                if t <= 0.0 || t >= 1.0 {
                    continue;
                }
                let on_segment = (p - (a + ab * t)).norm() < WELD_EPSILON;
                // Endpoint-coincident vertices are the merge case, not a split.
                let interior = (p - a).norm() >= WELD_EPSILON && (p - b).norm() >= WELD_EPSILON;
                if on_segment && interior {
                    self.faces[edge.face].insert(edge.slot + 1, v);
                    return true;
                }
            }
        }
        false
    }

    /// Remove repeated consecutive indices from every face loop and drop
    /// faces left with fewer than three distinct vertices.
    fn drop_degenerate_faces(&mut self) {
        for face in &mut self.faces {
            face.dedup();
            if face.len() > 1 && face.first() == face.last() {
                face.pop();
            }
        }
        self.faces.retain(|face| {
            let mut distinct: Vec<usize> = Vec::with_capacity(face.len());
            for &i in face {
                if !distinct.contains(&i) {
                    distinct.push(i);
                }
            }
            distinct.len() >= 3
        });
    }
}
