use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("{columns}x{rows} grid has {count} vertices, more than a u16 index buffer can address")]
    TooManyVertices {
        columns: usize,
        rows: usize,
        count: usize,
    },
}
