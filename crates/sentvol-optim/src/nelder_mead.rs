//! Bounded Nelder–Mead simplex minimisation.

use nalgebra::DVector;

use crate::error::OptimError;
use crate::OptimisationResult;

// Standard simplex coefficients
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Configuration for the Nelder–Mead solver.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Convergence tolerance on the simplex objective spread
    pub objective_tolerance: f64,
    /// Convergence tolerance on the simplex diameter
    pub parameter_tolerance: f64,
    /// Relative size of the initial simplex edges
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            objective_tolerance: 1e-6,
            parameter_tolerance: 1e-8,
            initial_step: 0.1,
        }
    }
}

/// Nelder–Mead simplex solver with box bounds.
///
/// Trial vertices are clamped into `[lower, upper]`, which is where the
/// parameter-bounds discipline for the likelihood objective lives (e.g.
/// keeping ρ_pv inside (−1, 1)); the objective itself validates nothing.
pub struct NelderMead {
    config: NelderMeadConfig,
}

impl NelderMead {
    /// Create a new solver with default configuration.
    pub fn new() -> Self {
        Self {
            config: NelderMeadConfig::default(),
        }
    }

    /// Create a new solver with custom configuration.
    pub fn with_config(config: NelderMeadConfig) -> Self {
        Self { config }
    }

    /// Minimise `objective` starting from `initial`, inside the box
    /// `[lower, upper]` (elementwise, infinities allowed).
    ///
    /// Returns an `OptimisationResult` on convergence, or
    /// `OptimError::ConvergenceFailure` when the iteration budget runs out.
    pub fn minimise<F>(
        &self,
        initial: &[f64],
        lower: &[f64],
        upper: &[f64],
        mut objective: F,
    ) -> Result<OptimisationResult, OptimError>
    where
        F: FnMut(&[f64]) -> f64,
    {
        let n = initial.len();
        if lower.len() != n || upper.len() != n {
            return Err(OptimError::InvalidBounds(
                "bounds length does not match parameter length".to_string(),
            ));
        }
        if lower.iter().zip(upper.iter()).any(|(lo, hi)| lo > hi) {
            return Err(OptimError::InvalidBounds(
                "lower bound exceeds upper bound".to_string(),
            ));
        }

        let lower = DVector::from_column_slice(lower);
        let upper = DVector::from_column_slice(upper);
        let clamp = |x: &DVector<f64>| -> DVector<f64> {
            DVector::from_fn(n, |i, _| x[i].clamp(lower[i], upper[i]))
        };

        let mut func_evals = 0;
        let mut eval = |x: &DVector<f64>, evals: &mut usize| -> f64 {
            *evals += 1;
            objective(x.as_slice())
        };

        // Initial simplex: the start point plus one perturbed vertex per
        // coordinate, stepping inward when the outward step leaves the box.
        let x0 = clamp(&DVector::from_column_slice(initial));
        let mut vertices = Vec::with_capacity(n + 1);
        vertices.push(x0.clone());
        for i in 0..n {
            let step = self.config.initial_step * x0[i].abs().max(1.0);
            let mut v = x0.clone();
            v[i] += step;
            let mut v = clamp(&v);
            if v[i] == x0[i] {
                v[i] = (x0[i] - step).clamp(lower[i], upper[i]);
            }
            vertices.push(v);
        }
        let mut values: Vec<f64> = vertices.iter().map(|v| eval(v, &mut func_evals)).collect();

        for iteration in 0..self.config.max_iterations {
            // Order vertices by objective; NaN sorts worst.
            let mut order: Vec<usize> = (0..=n).collect();
            order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
            let best = order[0];
            let second_worst = order[n - 1];
            let worst = order[n];

            let spread = values[worst] - values[best];
            let diameter = vertices
                .iter()
                .map(|v| (v - &vertices[best]).norm())
                .fold(0.0_f64, f64::max);
            if spread.abs() <= self.config.objective_tolerance * (1.0 + values[best].abs())
                || diameter <= self.config.parameter_tolerance
            {
                return Ok(OptimisationResult {
                    parameters: vertices[best].as_slice().to_vec(),
                    objective: values[best],
                    iterations: iteration,
                    function_evaluations: func_evals,
                    converged: true,
                });
            }

            // Centroid of all vertices but the worst
            let mut centroid = DVector::zeros(n);
            for (idx, v) in vertices.iter().enumerate() {
                if idx != worst {
                    centroid += v;
                }
            }
            centroid /= n as f64;

            let reflected = clamp(&(&centroid + REFLECT * (&centroid - &vertices[worst])));
            let f_reflected = eval(&reflected, &mut func_evals);

            if f_reflected < values[best] {
                let expanded = clamp(&(&centroid + EXPAND * (&reflected - &centroid)));
                let f_expanded = eval(&expanded, &mut func_evals);
                if f_expanded < f_reflected {
                    vertices[worst] = expanded;
                    values[worst] = f_expanded;
                } else {
                    vertices[worst] = reflected;
                    values[worst] = f_reflected;
                }
                continue;
            }

            if f_reflected < values[second_worst] {
                vertices[worst] = reflected;
                values[worst] = f_reflected;
                continue;
            }

            // Contract toward the better of the reflected and worst points
            let contracted = if f_reflected < values[worst] {
                clamp(&(&centroid + CONTRACT * (&reflected - &centroid)))
            } else {
                clamp(&(&centroid + CONTRACT * (&vertices[worst] - &centroid)))
            };
            let f_contracted = eval(&contracted, &mut func_evals);
            if f_contracted < values[worst].min(f_reflected) {
                vertices[worst] = contracted;
                values[worst] = f_contracted;
                continue;
            }

            // Shrink the whole simplex toward the best vertex
            let best_vertex = vertices[best].clone();
            for (idx, v) in vertices.iter_mut().enumerate() {
                if idx != best {
                    *v = clamp(&(&best_vertex + SHRINK * (&*v - &best_vertex)));
                    values[idx] = eval(v, &mut func_evals);
                }
            }
        }

        let best = (0..=n)
            .min_by(|&a, &b| values[a].total_cmp(&values[b]))
            .unwrap_or(0);
        Err(OptimError::ConvergenceFailure {
            iterations: self.config.max_iterations,
            objective: values[best],
        })
    }
}

impl Default for NelderMead {
    fn default() -> Self {
        Self::new()
    }
}
