//! Error types for cable geometry, sampling and table export

use thiserror::Error;

/// Errors raised by the cable geometry and field sampling layers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CableError {
    /// Unrecognized shape identifier
    #[error("unknown cable shape: {0:?} (expected straight, sine or coil)")]
    InvalidShape(String),

    /// Index accessor called outside `[0, len)`
    #[error("index {index} out of range for cable of {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    /// Sampling parameters that cannot produce rings
    #[error("invalid sampling parameters: {0}")]
    InvalidSampling(String),
}

/// Errors raised while writing or reading flat numeric tables
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Row that is not exactly three comma-separated reals
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Point and vector tables are not index-aligned
    #[error("row count mismatch: {points} points vs {vectors} vectors")]
    RowCountMismatch { points: usize, vectors: usize },
}
