use std::path::PathBuf;
use thiserror::Error;

// Unified error type for sparsestore

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("cannot store an explicit zero at ({row}, {col})")]
    ExplicitZero { row: usize, col: usize },
    #[error("failed to reserve storage for {requested} entries")]
    AllocationFailed { requested: usize },
    #[error("invalid CSR layout: {0}")]
    InvalidLayout(String),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl MatrixError {
    /// True for the one rejection that leaves a cell implicitly zero.
    pub fn is_explicit_zero(&self) -> bool {
        matches!(self, MatrixError::ExplicitZero { .. })
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;
