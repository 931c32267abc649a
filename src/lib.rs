//! Boolean operations (union, intersection, subtraction) on closed solids,
//! implemented with BSP trees.
//!
//! A [`BooleanSolid`] holds a solid's boundary as a flat list of convex
//! polygons. The binary operations clone both operands' polygons into two
//! temporary [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning)
//! trees, clip each tree's polygons against the other so that only the
//! fragments on the result's boundary survive, merge the survivors, and
//! flatten them back into a polygon list. Inversion is a pure winding
//! flip, which lets subtraction and intersection be expressed through
//! union:
//!
//! ```text
//!     A − B     = ¬(¬A ∪ B)
//!     A ∩ B     = ¬(¬A ∪ ¬B)
//! ```
//!
//! Meshes come in and out through [`PolyMesh`], an indexed face/vertex
//! representation; exporting welds coincident vertices and closes the
//! hairline seams welding can open. The convenience functions
//! [`mesh_union`], [`mesh_intersection`] and [`mesh_subtraction`] do the
//! whole round trip in one call:
//!
//! ```
//! use boolsolid::{mesh_subtraction, shapes};
//!
//! let block = shapes::cube(1.0);
//! let bite = shapes::cube(1.0).translate(0.5, 0.5, 0.5);
//! let notched = mesh_subtraction(&block, &bite);
//! assert!(notched.is_closed());
//! ```
//!
//! All tolerances are fixed: polygon splitting classifies vertices at
//! [`float_types::EPSILON`], vertex welding at
//! [`float_types::WELD_EPSILON`]. Inputs are expected to be closed,
//! consistently-wound boundaries of convex-faced solids; nothing validates
//! that, and open or self-intersecting input produces unspecified (but
//! non-panicking) geometry.

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

#[cfg(all(feature = "f64", feature = "f32"))]
compile_error!("Features `f64` and `f32` are mutually exclusive");

#[cfg(not(any(feature = "f64", feature = "f32")))]
compile_error!("Either feature `f64` or `f32` must be enabled");

pub mod bsp;
pub mod errors;
pub mod float_types;
pub mod plane;
pub mod polygon;
pub mod polymesh;
pub mod shapes;
pub mod solid;
pub mod vertex;

pub use errors::ValidationError;
pub use polymesh::PolyMesh;
pub use solid::{BooleanSolid, mesh_intersection, mesh_subtraction, mesh_union};
pub use vertex::Vertex;
