use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RayTracerError {
    #[error("Attempted to calculate an inverse of a non-invertible matrix")]
    NonInvertible,

    #[error("Cannot multiply a {}x{} matrix by a {}x{} operand", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Operation is only defined for square matrices, got {rows}x{columns}")]
    NotSquare { rows: usize, columns: usize },

    #[error("Matrix rows must be non-empty and of equal length")]
    RaggedMatrix,

    #[error("Invalid matrix entry: {0}")]
    MatrixParse(String),

    #[error("A transform requires a 4x4 matrix, got {rows}x{columns}")]
    NotHomogeneous { rows: usize, columns: usize },

    #[error("Invalid material parameter {field}: {value}")]
    InvalidMaterial { field: &'static str, value: f64 },
}
