//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use boolsolid::{
    float_types::Real,
    polygon::Polygon,
    polymesh::PolyMesh,
    vertex::Vertex,
};
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Returns the approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box(polygons: &[Polygon<()>]) -> [Real; 6] {
    let mut min_x = Real::MAX;
    let mut min_y = Real::MAX;
    let mut min_z = Real::MAX;
    let mut max_x = Real::MIN;
    let mut max_y = Real::MIN;
    let mut max_z = Real::MIN;

    for poly in polygons {
        for v in &poly.vertices {
            let p = v.pos;
            if p.x < min_x {
                min_x = p.x;
            }
            if p.y < min_y {
                min_y = p.y;
            }
            if p.z < min_z {
                min_z = p.z;
            }
            if p.x > max_x {
                max_x = p.x;
            }
            if p.y > max_y {
                max_y = p.y;
            }
            if p.z > max_z {
                max_z = p.z;
            }
        }
    }

    [min_x, min_y, min_z, max_x, max_y, max_z]
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon<()> {
    let mut verts = Vec::new();
    for p in points {
        let pos = Point3::new(p[0], p[1], p[2]);
        // Polygon::new re-computes the plane, an arbitrary normal will do.
        let normal = Vector3::z();
        verts.push(Vertex::new(pos, normal));
    }
    Polygon::new(verts, None)
}

/// Signed volume enclosed by a polygon soup, by the divergence theorem:
/// `V = Σ a · (b × c) / 6` over a fan triangulation of every polygon.
/// Positive for a closed, outward-wound boundary.
pub fn signed_volume(polygons: &[Polygon<()>]) -> Real {
    let mut six_v = 0.0;
    for poly in polygons {
        for tri in poly.triangulate() {
            let a = tri[0].pos.coords;
            let b = tri[1].pos.coords;
            let c = tri[2].pos.coords;
            six_v += a.dot(&b.cross(&c));
        }
    }
    six_v / 6.0
}

/// Signed volume of a triangulated mesh; see [`signed_volume`].
pub fn mesh_volume(mesh: &PolyMesh) -> Real {
    let mesh = mesh.triangulate();
    let mut six_v = 0.0;
    for face in &mesh.faces {
        let a = mesh.vertices[face[0]].pos.coords;
        let b = mesh.vertices[face[1]].pos.coords;
        let c = mesh.vertices[face[2]].pos.coords;
        six_v += a.dot(&b.cross(&c));
    }
    six_v / 6.0
}

/// Whether `point` lies inside the closed surface described by `polygons`,
/// by ray-crossing parity. The ray direction is deliberately irrational so
/// it does not graze the axis-aligned edges the tests use.
pub fn contains_point(polygons: &[Polygon<()>], point: Point3<Real>) -> bool {
    let dir = Vector3::new(0.577_350_3, 0.211_324_9, 0.788_675_1).normalize();
    let mut crossings = 0;
    for poly in polygons {
        for tri in poly.triangulate() {
            if ray_hits_triangle(&point, &dir, &tri[0].pos, &tri[1].pos, &tri[2].pos) {
                crossings += 1;
            }
        }
    }
    crossings % 2 == 1
}

/// Möller–Trumbore ray/triangle test, counting hits with `t > 0` only.
fn ray_hits_triangle(
    origin: &Point3<Real>,
    dir: &Vector3<Real>,
    a: &Point3<Real>,
    b: &Point3<Real>,
    c: &Point3<Real>,
) -> bool {
    let eps: Real = 1e-12;
    let ab = b - a;
    let ac = c - a;
    let p = dir.cross(&ac);
    let det = ab.dot(&p);
    if det.abs() < eps {
        return false;
    }
    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(&p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return false;
    }
    let q = s.cross(&ab);
    let v = dir.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return false;
    }
    ac.dot(&q) * inv_det > eps
}
