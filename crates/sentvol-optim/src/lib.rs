//! Derivative-free optimisation for simulated-likelihood objectives.
//!
//! The simulated log-likelihood exposes no gradient, so the driver here is a
//! bounded Nelder–Mead simplex search: vector in, scalar out, parameter
//! bounds enforced by clamping trial vertices into the box.

mod error;
mod nelder_mead;

pub use error::OptimError;
pub use nelder_mead::{NelderMead, NelderMeadConfig};

/// Optimisation result.
#[derive(Debug, Clone)]
pub struct OptimisationResult {
    /// Best parameters found
    pub parameters: Vec<f64>,
    /// Objective value at the best parameters
    pub objective: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Number of objective evaluations
    pub function_evaluations: usize,
    /// Convergence status
    pub converged: bool,
}
