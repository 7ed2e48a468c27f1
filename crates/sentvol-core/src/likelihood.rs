use crate::context::{DegeneracyPolicy, SimContext};
use crate::kernel;
use crate::noise::correlate;
use crate::params::JointParams;
use crate::simulate::joint_step;
use crate::stats::st_dev;

/// Negated simulated log-likelihood of the observed series under `x`.
///
/// Matches the derivative-free optimizer callback convention: parameter
/// vector in (slot order as in [`JointParams::from_slice`]), scalar out, a
/// gradient slot that is accepted but never written. Minimizing the returned
/// value maximizes the simulated likelihood.
pub fn simulated_neg_log_likelihood(
    x: &[f64],
    grad: Option<&mut [f64]>,
    ctx: &mut SimContext,
) -> f64 {
    // Derivative-free objective: the gradient slot stays untouched.
    let _ = grad;
    neg_log_likelihood(&JointParams::from_slice(x), ctx)
}

/// Same objective with named parameters.
///
/// For each observation, all `n_sim` particles are reset to the previous
/// observed (price, volatility) pair and advanced `m_sim` substeps with the
/// simulator's update rule, reading sentiment from the substep grid. The
/// likelihood of the observed pair is then a product-Gaussian-kernel density
/// estimate over the particle cloud, with an undersmoothed Silverman
/// bandwidth per dimension, and its log is accumulated.
pub fn neg_log_likelihood(params: &JointParams, ctx: &mut SimContext) -> f64 {
    let n_obs = ctx.n_obs;
    let n_sim = ctx.n_sim;
    let m_sim = ctx.m_sim;
    let delta = ctx.dt / m_sim as f64;
    let sqrt_delta = delta.sqrt();
    let h_frac = kernel::bandwidth_factor(n_sim);

    // Correlated shocks for the whole call. The raw draws are fixed for the
    // life of the context (common random numbers); only ρ_pv varies here.
    for n in 0..n_sim * m_sim {
        ctx.wiener_volatility[n] = ctx.raw_volatility[n];
        ctx.wiener_price[n] = correlate(params.rho_pv, ctx.raw_price[n], ctx.wiener_volatility[n]);
    }

    let mut ll = 0.0;
    for i in 1..n_obs {
        for j in 0..n_sim {
            let mut p = ctx.price[i - 1];
            let mut v = ctx.volatility[i - 1];
            for k in 0..m_sim {
                let shock = j * m_sim + k;
                let sent = ctx.sentiment[(i - 1) * m_sim + k].abs();
                joint_step(
                    params,
                    delta,
                    sqrt_delta,
                    sent,
                    ctx.wiener_price[shock],
                    ctx.wiener_volatility[shock],
                    &mut p,
                    &mut v,
                );
            }
            ctx.sim_price[j] = p;
            ctx.sim_volatility[j] = v;
        }

        let h_price = h_frac * st_dev(&ctx.sim_price);
        let h_volatility = h_frac * st_dev(&ctx.sim_volatility);

        let mut kernel_sum = 0.0;
        for j in 0..n_sim {
            let k_p = kernel::gaussian(ctx.price[i], ctx.sim_price[j], h_price);
            let k_v = kernel::gaussian(ctx.volatility[i], ctx.sim_volatility[j], h_volatility);
            kernel_sum += k_p * k_v;
        }
        ll += (kernel_sum / n_sim as f64).ln();

        // Optional short-circuit once the total has degenerated; a zero or
        // subnormal total trips this too, mirroring the abnormality check.
        if let DegeneracyPolicy::Sentinel(cap) = ctx.policy {
            if !ll.is_normal() {
                return cap;
            }
        }
    }

    -ll
}
