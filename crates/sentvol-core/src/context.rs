use crate::noise::NormalSource;

/// What the likelihood evaluator does when the running log-likelihood
/// degenerates (zero kernel bandwidth, −∞, NaN).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DegeneracyPolicy {
    /// Let IEEE special values flow out unchanged.
    Propagate,
    /// Short-circuit the observation loop and return this large finite
    /// value instead. Changes the objective's shape near degenerate
    /// parameter regions, so it is opt-in.
    Sentinel(f64),
}

/// Observed series and pre-sized scratch buffers for one estimation run.
///
/// The raw normal draws are fixed for the lifetime of the context and reused
/// by every likelihood evaluation on it (common random numbers); only the
/// derived correlated shocks change with ρ_pv. The evaluator writes into the
/// scratch buffers but never reallocates them, so one context supports any
/// number of sequential optimizer calls. Concurrent evaluations need one
/// context each.
pub struct SimContext {
    /// Observed price series, length `n_obs`.
    pub(crate) price: Vec<f64>,
    /// Observed volatility series, length `n_obs`.
    pub(crate) volatility: Vec<f64>,
    /// Sentiment on the substep grid, length ≥ `(n_obs − 1) · m_sim`.
    pub(crate) sentiment: Vec<f64>,
    /// Raw draws for the price shock's independent component.
    pub(crate) raw_price: Vec<f64>,
    /// Raw draws for the volatility shock.
    pub(crate) raw_volatility: Vec<f64>,
    /// Correlated price shocks, rebuilt once per evaluation.
    pub(crate) wiener_price: Vec<f64>,
    /// Volatility shocks, rebuilt once per evaluation.
    pub(crate) wiener_volatility: Vec<f64>,
    /// Particle price cross-section, length `n_sim`.
    pub(crate) sim_price: Vec<f64>,
    /// Particle volatility cross-section, length `n_sim`.
    pub(crate) sim_volatility: Vec<f64>,
    pub(crate) n_obs: usize,
    pub(crate) n_sim: usize,
    pub(crate) m_sim: usize,
    pub(crate) dt: f64,
    pub(crate) policy: DegeneracyPolicy,
}

impl SimContext {
    /// Build a context, drawing the shared raw noise from `rng` once.
    pub fn new<R: NormalSource>(
        price: Vec<f64>,
        volatility: Vec<f64>,
        sentiment: Vec<f64>,
        n_sim: usize,
        m_sim: usize,
        dt: f64,
        policy: DegeneracyPolicy,
        rng: &mut R,
    ) -> Self {
        let draws = n_sim * m_sim;
        let mut raw_price = vec![0.0; draws];
        let mut raw_volatility = vec![0.0; draws];
        rng.fill_standard_normal(&mut raw_price);
        rng.fill_standard_normal(&mut raw_volatility);
        Self::with_raw_noise(
            price,
            volatility,
            sentiment,
            raw_price,
            raw_volatility,
            n_sim,
            m_sim,
            dt,
            policy,
        )
    }

    /// Build a context around externally drawn raw noise. The noise lives for
    /// the whole optimization run; replacing it between evaluations would
    /// break the smoothness the optimizer relies on.
    #[allow(clippy::too_many_arguments)]
    pub fn with_raw_noise(
        price: Vec<f64>,
        volatility: Vec<f64>,
        sentiment: Vec<f64>,
        raw_price: Vec<f64>,
        raw_volatility: Vec<f64>,
        n_sim: usize,
        m_sim: usize,
        dt: f64,
        policy: DegeneracyPolicy,
    ) -> Self {
        let n_obs = price.len();
        assert_eq!(volatility.len(), n_obs, "price and volatility series must have equal length");
        assert!(n_obs >= 1, "need at least one observation");
        assert!(n_sim >= 2, "need at least two particles for a sample standard deviation");
        assert!(m_sim >= 1, "at least one substep per observation");
        assert!(
            sentiment.len() >= n_obs.saturating_sub(1) * m_sim,
            "sentiment series shorter than the substep grid"
        );
        let draws = n_sim * m_sim;
        assert_eq!(raw_price.len(), draws, "raw price noise must hold n_sim * m_sim draws");
        assert_eq!(raw_volatility.len(), draws, "raw volatility noise must hold n_sim * m_sim draws");

        Self {
            price,
            volatility,
            sentiment,
            raw_price,
            raw_volatility,
            wiener_price: vec![0.0; draws],
            wiener_volatility: vec![0.0; draws],
            sim_price: vec![0.0; n_sim],
            sim_volatility: vec![0.0; n_sim],
            n_obs,
            n_sim,
            m_sim,
            dt,
            policy,
        }
    }

    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    pub fn n_sim(&self) -> usize {
        self.n_sim
    }

    pub fn m_sim(&self) -> usize {
        self.m_sim
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn policy(&self) -> DegeneracyPolicy {
        self.policy
    }

    pub fn observed_price(&self) -> &[f64] {
        &self.price
    }

    pub fn observed_volatility(&self) -> &[f64] {
        &self.volatility
    }
}
