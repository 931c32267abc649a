//! Scalar type selection and the tolerances used across the crate.

/// Our Real scalar type.
#[cfg(feature = "f32")]
pub type Real = f32;
/// Our Real scalar type.
#[cfg(feature = "f64")]
pub type Real = f64;

/// Tolerance for classifying a point against a plane.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Tolerance for classifying a point against a plane.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-5;

/// Absolute distance below which two vertices are welded into one during
/// mesh export and seam repair.
#[cfg(feature = "f32")]
pub const WELD_EPSILON: Real = 1e-6;
/// Absolute distance below which two vertices are welded into one during
/// mesh export and seam repair.
#[cfg(feature = "f64")]
pub const WELD_EPSILON: Real = 1e-10;
