//! Primitive mesh constructors used as CSG operands.

use crate::float_types::Real;
use crate::polymesh::PolyMesh;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// An axis-aligned box with one corner at `origin` and the opposite corner
/// at `origin + size`. Faces are quads wound counter-clockwise seen from
/// outside; vertex normals point from the box center through each corner.
pub fn cuboid(origin: Point3<Real>, size: Vector3<Real>) -> PolyMesh {
    let center = origin + size / 2.0;
    let corners = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (1.0, 0.0, 1.0),
        (1.0, 1.0, 1.0),
        (0.0, 1.0, 1.0),
    ];

    let mut mesh = PolyMesh::new();
    for (x, y, z) in corners {
        let pos = Point3::new(
            origin.x + size.x * x,
            origin.y + size.y * y,
            origin.z + size.z * z,
        );
        mesh.add_vertex(Vertex::new(pos, (pos - center).normalize()));
    }

    let faces: [[usize; 4]; 6] = [
        [0, 3, 2, 1], // bottom (z = min)
        [4, 5, 6, 7], // top (z = max)
        [0, 1, 5, 4], // front (y = min)
        [2, 3, 7, 6], // back (y = max)
        [0, 4, 7, 3], // left (x = min)
        [1, 2, 6, 5], // right (x = max)
    ];
    for face in faces {
        mesh.faces.push(face.to_vec());
    }
    mesh
}

/// An axis-aligned cube with one corner at the origin and edge length
/// `size`.
pub fn cube(size: Real) -> PolyMesh {
    cuboid(Point3::origin(), Vector3::new(size, size, size))
}
