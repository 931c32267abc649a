//! Oriented half-space used to classify and split polygons.

use crate::float_types::{EPSILON, Real};
use crate::polygon::Polygon;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

// Classification of a vertex relative to a plane. A polygon's aggregate
// classification is the bitwise OR of its vertex classifications, so
// FRONT | BACK == SPANNING.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// An oriented half-space: points `p` with `normal · p = w` lie on the
/// plane, larger dot products lie in front of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    /// Create a new plane from a normal vector and offset. The normal is
    /// normalized.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Plane {
            normal: normal.normalize(),
            w,
        }
    }

    /// Create a plane from three points, with the normal following the
    /// right-hand rule: `(b - a) × (c - a)`.
    ///
    /// Collinear points yield a (near-)zero cross product and the
    /// normalized normal is non-finite; this is not guarded, the
    /// degenerate plane propagates into whatever is built from it.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        Plane {
            normal,
            w: normal.dot(&a.coords),
        }
    }

    /// Supporting plane of a vertex loop, from its first three vertices.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        Self::from_points(&vertices[0].pos, &vertices[1].pos, &vertices[2].pos)
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane in place (reverse normal and offset).
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Return a flipped copy of this plane.
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Classify a point against the plane using the signed distance
    /// `normal · p − w` and the fixed [`EPSILON`] tolerance.
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.normal.dot(&point.coords) - self.w;
        if t < -EPSILON {
            BACK
        } else if t > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Classify a polygon against the plane: the OR of its vertex
    /// classifications, one of `COPLANAR`, `FRONT`, `BACK` or `SPANNING`.
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Split `polygon` by this plane, returning four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// A coplanar polygon goes into `coplanar_front` when its own normal
    /// agrees with this plane's normal, otherwise `coplanar_back`. That
    /// sign test is what disambiguates geometrically-identical coplanar
    /// faces contributed by the two operand solids; routing it the other
    /// way either duplicates or deletes overlapping boundary faces.
    ///
    /// A spanning polygon is cut along the plane. Fragments that end up
    /// with fewer than three vertices are dropped, not reported.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon<S: Clone>(
        &self,
        polygon: &Polygon<S>,
    ) -> (
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
        Vec<Polygon<S>>,
    ) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                // Walk the edge loop, routing each vertex to the side(s)
                // it belongs to and interpolating a new vertex wherever an
                // edge crosses the plane.
                let mut f = Vec::with_capacity(polygon.vertices.len() + 1);
                let mut b = Vec::with_capacity(polygon.vertices.len() + 1);

                for i in 0..polygon.vertices.len() {
                    let j = (i + 1) % polygon.vertices.len();
                    let ti = types[i];
                    let tj = types[j];
                    let vi = &polygon.vertices[i];
                    let vj = &polygon.vertices[j];

                    if ti != BACK {
                        f.push(*vi);
                    }
                    if ti != FRONT {
                        b.push(*vi);
                    }
                    if (ti | tj) == SPANNING {
                        // With a unit normal the signed distances of the two
                        // endpoints differ by more than 2*EPSILON here, so
                        // the denominator cannot vanish.
                        let t = (self.w - self.normal.dot(&vi.pos.coords))
                            / self.normal.dot(&(vj.pos - vi.pos));
                        let v = vi.interpolate(vj, t);
                        f.push(v);
                        b.push(v);
                    }
                }

                if f.len() >= 3 {
                    front.push(Polygon::new(f, polygon.metadata.clone()));
                }
                if b.len() >= 3 {
                    back.push(Polygon::new(b, polygon.metadata.clone()));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
