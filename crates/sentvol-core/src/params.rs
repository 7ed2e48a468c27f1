use serde::{Deserialize, Serialize};

/// Parameters of the joint price–volatility–sentiment process:
///
/// dP = γ_p (μ_p − P) dt + P √|V| dW_p
/// dV = γ_v (μ_v + β_v |S| − V) dt + σ_v √|V| dW_v
///
/// with corr(dW_p, dW_v) = ρ_pv. The model constrains ρ_pv to (−1, 1) but
/// this crate performs no validation; out-of-domain values propagate as NaN
/// through the shock correlation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointParams {
    /// Mean-reversion speed of the price (γ_p)
    pub gamma_p: f64,
    /// Long-run price level (μ_p)
    pub mu_p: f64,
    /// Mean-reversion speed of the volatility (γ_v)
    pub gamma_v: f64,
    /// Long-run volatility level (μ_v)
    pub mu_v: f64,
    /// Sentiment sensitivity of the volatility target (β_v)
    pub beta_v: f64,
    /// Volatility-of-volatility scale (σ_v)
    pub sigma_v: f64,
    /// Price–volatility shock correlation (ρ_pv)
    pub rho_pv: f64,
}

impl JointParams {
    /// Length of the optimizer parameter vector.
    pub const DIM: usize = 7;

    pub fn new(
        gamma_p: f64,
        mu_p: f64,
        gamma_v: f64,
        mu_v: f64,
        beta_v: f64,
        sigma_v: f64,
        rho_pv: f64,
    ) -> Self {
        Self {
            gamma_p,
            mu_p,
            gamma_v,
            mu_v,
            beta_v,
            sigma_v,
            rho_pv,
        }
    }

    /// Unpack from an optimizer parameter vector.
    ///
    /// Slot order: `gamma_p, mu_p, gamma_v, mu_v, beta_v, sigma_v, rho_pv`.
    pub fn from_slice(x: &[f64]) -> Self {
        assert!(x.len() >= Self::DIM, "parameter vector needs {} slots", Self::DIM);
        Self {
            gamma_p: x[0],
            mu_p: x[1],
            gamma_v: x[2],
            mu_v: x[3],
            beta_v: x[4],
            sigma_v: x[5],
            rho_pv: x[6],
        }
    }

    /// Pack into the optimizer slot order.
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.gamma_p,
            self.mu_p,
            self.gamma_v,
            self.mu_v,
            self.beta_v,
            self.sigma_v,
            self.rho_pv,
        ]
    }
}
