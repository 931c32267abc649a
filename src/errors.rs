//! Validation errors

/// Problems detected while assembling a [`PolyMesh`](crate::polymesh::PolyMesh).
///
/// The CSG core itself never reports errors: degenerate split fragments are
/// dropped silently and near-degenerate input degrades numerically rather
/// than failing. Only the mesh-construction surface rejects input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A face was given fewer than three vertices.
    #[error("face has {0} vertices, a face needs at least 3")]
    TooFewVertices(usize),
    /// A face referenced a vertex index outside the mesh's vertex list.
    #[error("face references vertex {index}, but the mesh has {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },
}
