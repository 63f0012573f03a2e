//! Rendering errors

use sortbench_core::BenchError;
use thiserror::Error;

/// Errors produced while rendering a report
#[derive(Debug, Error)]
pub enum RenderError {
    /// Nothing to plot along the x axis
    #[error("cannot render a chart without any sizes")]
    EmptyDomain,

    /// Output format could not be determined or is not supported
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for BenchError {
    fn from(err: RenderError) -> Self {
        BenchError::RenderFailure(err.to_string())
    }
}
