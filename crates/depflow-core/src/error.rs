//! Errors raised by configurable propagation runs

use thiserror::Error;

/// Errors produced while configuring or running a dependency analysis.
///
/// Malformed programs are not errors: they reach the analysis as
/// [`Primitive::Error`](crate::ast::Primitive::Error) and behave as no-ops.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Propagation performed more edge relaxations than allowed
    #[error("dependency propagation did not converge within {limit} iterations")]
    IterationLimit { limit: usize },

    #[error("invalid analysis configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read analysis configuration: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
