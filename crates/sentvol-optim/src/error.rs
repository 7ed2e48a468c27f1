//! Optimiser errors.

use thiserror::Error;

/// Errors that can occur during optimisation.
#[derive(Error, Debug)]
pub enum OptimError {
    /// Convergence failure
    #[error("failed to converge after {iterations} iterations (best objective: {objective})")]
    ConvergenceFailure { iterations: usize, objective: f64 },

    /// Invalid parameter bounds
    #[error("invalid parameter bounds: {0}")]
    InvalidBounds(String),
}
