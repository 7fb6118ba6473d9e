use thiserror::Error;

/// Top-level error type for the slicegeom toolpath geometry kernel.
#[derive(Debug, Error)]
pub enum SlicegeomError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric inputs.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("polygon needs at least {min} points, got {actual}")]
    TooFewPoints { min: usize, actual: usize },
}

/// Errors related to geometric operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`SlicegeomError`].
pub type Result<T> = std::result::Result<T, SlicegeomError>;
