use thiserror::Error;

pub type MeshResult<T> = Result<T, MeshError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidVertexIndex {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("index buffer has {index_count} entries, which is not a whole number of triangles")]
    IncompleteTriangle { index_count: usize },

    #[error("mesh has {normals} normals for {vertices} vertices")]
    NormalCountMismatch { normals: usize, vertices: usize },

    #[error("mesh has {colors} colors for {vertices} vertices")]
    ColorCountMismatch { colors: usize, vertices: usize },

    #[error("{vertex_count} vertices cannot be addressed with 16-bit indices")]
    IndexOverflow { vertex_count: usize },
}
