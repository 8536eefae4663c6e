#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("no residual edge from {from} to {to}")]
    EdgeNotFound { from: usize, to: usize },

    #[error("cost matrix must be square, got {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },

    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cost matrix is empty")]
    EmptyMatrix,

    #[error("assignment not found after {adjustments} adjustments")]
    AssignmentDiverged { adjustments: usize },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
