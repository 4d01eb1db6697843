use thiserror::Error;

/// Errors raised by network construction, training and inference.
///
/// Precondition variants are always returned before any activation, error or
/// weight in the network has been touched.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: &'static str,
    },

    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("the network has no layers")]
    EmptyNetwork,

    #[error("no training rows were supplied")]
    EmptyDataset,

    #[error("output became non-finite while generating row {row}")]
    Diverged { row: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for network operations
pub type Result<T> = std::result::Result<T, NetworkError>;
