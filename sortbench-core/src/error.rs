//! Error types shared by every sortbench crate.

use std::time::Duration;
use thiserror::Error;

/// Result alias used throughout sortbench
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors raised while preparing, measuring or rendering a benchmark run
#[derive(Debug, Error)]
pub enum BenchError {
    /// Rejected before any measurement starts (bad size, malformed range, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The algorithm panicked or produced an output that is not a sorted permutation
    #[error("algorithm '{algorithm}' failed at size {size}: {message}")]
    AlgorithmFailure {
        algorithm: String,
        size: usize,
        message: String,
    },

    /// The measurement itself could not be taken
    #[error("measurement of '{algorithm}' at size {size} failed: {reason}")]
    MeasurementFailure {
        algorithm: String,
        size: usize,
        reason: String,
    },

    /// A single measurement exceeded its wall-clock budget
    #[error("algorithm '{algorithm}' exceeded the {budget:?} budget at size {size}")]
    Timeout {
        algorithm: String,
        size: usize,
        budget: Duration,
    },

    /// No output could be produced for the collected results
    #[error("render failed: {0}")]
    RenderFailure(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// The (algorithm, size) pair an error belongs to, if it is tied to one.
    pub fn attribution(&self) -> Option<(&str, usize)> {
        match self {
            BenchError::AlgorithmFailure {
                algorithm, size, ..
            }
            | BenchError::MeasurementFailure {
                algorithm, size, ..
            }
            | BenchError::Timeout {
                algorithm, size, ..
            } => Some((algorithm.as_str(), *size)),
            _ => None,
        }
    }
}
