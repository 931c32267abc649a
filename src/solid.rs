//! `BooleanSolid` and the boolean set operations on solids.

use crate::bsp::Node;
use crate::float_types::{Real, WELD_EPSILON};
use crate::polygon::Polygon;
use crate::polymesh::PolyMesh;
use crate::vertex::Vertex;
use nalgebra::Point3;
use std::collections::HashMap;
use std::fmt::Debug;

/// A closed solid's boundary as a flat, unordered polygon list.
///
/// All four operations (`union`, `subtract`, `intersect`, `inverse`) are
/// pure: they never mutate the receiver or the argument. Each binary
/// operation deep-clones both operands' polygons into two private BSP
/// trees, runs a fixed sequence of `clip_to`/`invert`/`build` steps on
/// them, and flattens the result back into a polygon list. The trees live
/// only for the duration of one operation.
#[derive(Debug, Clone)]
pub struct BooleanSolid<S: Clone> {
    pub polygons: Vec<Polygon<S>>,

    /// Metadata carried onto results of operations on this solid.
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Default for BooleanSolid<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> BooleanSolid<S> {
    /// A solid with no boundary at all.
    pub const fn new() -> Self {
        BooleanSolid {
            polygons: Vec::new(),
            metadata: None,
        }
    }

    /// Build a solid from an existing polygon list.
    pub fn from_polygons(polygons: Vec<Polygon<S>>, metadata: Option<S>) -> Self {
        BooleanSolid { polygons, metadata }
    }

    pub fn num_polygons(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Import a solid's boundary from a mesh, one polygon per face. If the
    /// mesh is not triangular it is triangulated via a copy first; the
    /// input mesh is never modified.
    pub fn from_mesh(mesh: &PolyMesh, metadata: Option<S>) -> Self {
        let triangulated;
        let mesh = if mesh.is_triangular() {
            mesh
        } else {
            triangulated = mesh.triangulate();
            &triangulated
        };

        let polygons = mesh
            .faces
            .iter()
            .map(|face| {
                let vertices: Vec<Vertex> = face.iter().map(|&i| mesh.vertices[i]).collect();
                Polygon::new(vertices, metadata.clone())
            })
            .collect();

        BooleanSolid { polygons, metadata }
    }

    /// Export the boundary into a fresh mesh: weld coincident vertices at
    /// the [`WELD_EPSILON`] tolerance, emit faces against the welded
    /// indices, re-triangulate and close the seams left by welding.
    pub fn to_mesh(&self) -> PolyMesh {
        let mut mesh = PolyMesh::new();
        self.to_mesh_into(&mut mesh);
        mesh
    }

    /// Like [`to_mesh`](Self::to_mesh), but appending into a
    /// caller-supplied mesh.
    pub fn to_mesh_into(&self, mesh: &mut PolyMesh) {
        let base = mesh.vertices.len();
        let mut weld = WeldMap::new(WELD_EPSILON);

        for polygon in &self.polygons {
            let mut face = Vec::with_capacity(polygon.vertices.len());
            for v in &polygon.vertices {
                face.push(base + weld.index_of(v));
            }
            // Welding can collapse a sliver; drop faces that no longer
            // span three distinct vertices.
            if distinct_count(&face) >= 3 {
                mesh.faces.push(face);
            }
        }
        mesh.vertices.extend(weld.into_vertices());

        mesh.triangulate_in_place();
        mesh.close_seams();
    }

    /// Return a new solid representing space in either this solid or `other`.
    ///
    /// ```text
    ///     a.union(b)
    ///
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |       |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |       |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    pub fn union(&self, other: &BooleanSolid<S>) -> BooleanSolid<S> {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.clip_to(&b);
        b.clip_to(&a);
        // Clipping the inverse of b against a removes the second copy of
        // boundary faces the two solids share; without this pass coplanar
        // overlap would be emitted twice.
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        BooleanSolid {
            polygons: a.all_polygons(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new solid representing space in this solid but not in
    /// `other`, via `A − B = ¬(¬A ∪ B)`.
    ///
    /// If either operand has no polygons the result is a clone of `self` —
    /// including when `self` itself is empty. The asymmetry against
    /// [`intersect`](Self::intersect) is long-standing observable behavior
    /// and is kept.
    ///
    /// ```text
    ///     a.subtract(b)
    ///
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |       |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    pub fn subtract(&self, other: &BooleanSolid<S>) -> BooleanSolid<S> {
        if self.polygons.is_empty() || other.polygons.is_empty() {
            return self.clone();
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        BooleanSolid {
            polygons: a.all_polygons(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new solid representing space in both this solid and
    /// `other`, via `A ∩ B = ¬(¬A ∪ ¬B)`.
    ///
    /// If either operand has no polygons the result is empty.
    ///
    /// ```text
    ///     a.intersect(b)
    ///
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    pub fn intersect(&self, other: &BooleanSolid<S>) -> BooleanSolid<S> {
        if self.polygons.is_empty() || other.polygons.is_empty() {
            return BooleanSolid {
                polygons: Vec::new(),
                metadata: self.metadata.clone(),
            };
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        BooleanSolid {
            polygons: a.all_polygons(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new solid with solid and empty space switched: every
    /// polygon's winding reversed. No tree is built.
    pub fn inverse(&self) -> BooleanSolid<S> {
        let mut solid = self.clone();
        for p in &mut solid.polygons {
            p.flip();
        }
        solid
    }
}

/// One-call union of two meshes.
pub fn mesh_union(mesh1: &PolyMesh, mesh2: &PolyMesh) -> PolyMesh {
    let a: BooleanSolid<()> = BooleanSolid::from_mesh(mesh1, None);
    let b: BooleanSolid<()> = BooleanSolid::from_mesh(mesh2, None);
    a.union(&b).to_mesh()
}

/// One-call intersection of two meshes.
pub fn mesh_intersection(mesh1: &PolyMesh, mesh2: &PolyMesh) -> PolyMesh {
    let a: BooleanSolid<()> = BooleanSolid::from_mesh(mesh1, None);
    let b: BooleanSolid<()> = BooleanSolid::from_mesh(mesh2, None);
    a.intersect(&b).to_mesh()
}

/// One-call subtraction (`mesh1 − mesh2`) of two meshes.
pub fn mesh_subtraction(mesh1: &PolyMesh, mesh2: &PolyMesh) -> PolyMesh {
    let a: BooleanSolid<()> = BooleanSolid::from_mesh(mesh1, None);
    let b: BooleanSolid<()> = BooleanSolid::from_mesh(mesh2, None);
    a.subtract(&b).to_mesh()
}

/// Incremental vertex welder over a uniform spatial hash grid.
///
/// Cells are one weld tolerance wide, so any previously-placed vertex
/// within tolerance of a query lives in the query's cell or one of its 26
/// neighbors; each lookup scans at most those.
struct WeldMap {
    tolerance: Real,
    grid: HashMap<(i64, i64, i64), Vec<usize>>,
    vertices: Vec<Vertex>,
}

impl WeldMap {
    fn new(tolerance: Real) -> Self {
        WeldMap {
            tolerance,
            grid: HashMap::new(),
            vertices: Vec::new(),
        }
    }

    fn cell(&self, pos: &Point3<Real>) -> (i64, i64, i64) {
        (
            (pos.x / self.tolerance).floor() as i64,
            (pos.y / self.tolerance).floor() as i64,
            (pos.z / self.tolerance).floor() as i64,
        )
    }

    /// Index of the unique vertex representing `v`, inserting it if no
    /// already-placed vertex lies within tolerance.
    fn index_of(&mut self, v: &Vertex) -> usize {
        let (cx, cy, cz) = self.cell(&v.pos);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &idx in bucket {
                        if (self.vertices[idx].pos - v.pos).norm() < self.tolerance {
                            return idx;
                        }
                    }
                }
            }
        }

        let idx = self.vertices.len();
        self.vertices.push(*v);
        self.grid.entry((cx, cy, cz)).or_default().push(idx);
        idx
    }

    fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

fn distinct_count(indices: &[usize]) -> usize {
    let mut seen = Vec::with_capacity(indices.len());
    for &i in indices {
        if !seen.contains(&i) {
            seen.push(i);
        }
    }
    seen.len()
}
