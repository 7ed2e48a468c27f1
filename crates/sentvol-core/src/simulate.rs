use crate::noise::{correlate, NormalSource};
use crate::params::JointParams;

/// One Euler–Maruyama substep of the joint process, in place.
///
/// Both diffusion terms read the pre-update volatility. The absolute value
/// under the square root keeps the step defined when volatility dips below
/// zero; it alters the effective diffusion there instead of implementing a
/// boundary condition, and is kept as-is.
#[inline]
pub(crate) fn joint_step(
    params: &JointParams,
    delta: f64,
    sqrt_delta: f64,
    sentiment_abs: f64,
    w_p: f64,
    w_v: f64,
    price: &mut f64,
    volatility: &mut f64,
) {
    let sqrt_vol = volatility.abs().sqrt();
    let mp = params.gamma_p * (params.mu_p - *price);
    let mv = params.gamma_v * (params.mu_v + params.beta_v * sentiment_abs - *volatility);
    *price += mp * delta + w_p * *price * sqrt_vol * sqrt_delta;
    *volatility += mv * delta + w_v * params.sigma_v * sqrt_vol * sqrt_delta;
}

/// Simulate one full sample path of (price, volatility), writing in place.
///
/// `price` and `volatility` are caller-allocated output buffers of equal
/// length `n_obs`; `sentiment` holds one value per observation and is read
/// at the observation index. Each observation interval is advanced through
/// `m_obs` Euler–Maruyama substeps of size `dt / m_obs`, drawing the
/// volatility shock first and correlating the price shock against it.
///
/// Deterministic given the source's seed. There is no return code; numerical
/// failure shows up only as non-finite values in the output buffers.
pub fn simulate_joint_process<R: NormalSource>(
    rng: &mut R,
    params: &JointParams,
    sentiment: &[f64],
    dt: f64,
    m_obs: usize,
    p0: f64,
    v0: f64,
    price: &mut [f64],
    volatility: &mut [f64],
) {
    let n_obs = price.len();
    assert_eq!(volatility.len(), n_obs, "price and volatility buffers must have equal length");
    assert!(sentiment.len() >= n_obs, "sentiment series shorter than the observation grid");
    assert!(m_obs > 0, "at least one substep per observation");

    let delta = dt / m_obs as f64;
    let sqrt_delta = delta.sqrt();

    price[0] = p0;
    volatility[0] = v0;

    for i in 1..n_obs {
        let mut p = price[i - 1];
        let mut v = volatility[i - 1];
        let sent = sentiment[i].abs();

        for _ in 0..m_obs {
            let w_v = rng.standard_normal();
            let w_p = correlate(params.rho_pv, rng.standard_normal(), w_v);
            joint_step(params, delta, sqrt_delta, sent, w_p, w_v, &mut p, &mut v);
        }

        price[i] = p;
        volatility[i] = v;
    }
}
