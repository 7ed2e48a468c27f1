/// Linearly interpolate a per-observation sentiment series onto the substep
/// grid used by the likelihood evaluator.
///
/// Produces `(coarse.len() − 1) · m_sim` values; block `i`, offset `k` is the
/// value at fraction `k / m_sim` between observations `i` and `i + 1`, so the
/// evaluator's index `(i − 1) · m_sim + k` reads the interval leading into
/// observation `i`.
pub fn interpolate_sentiment(coarse: &[f64], m_sim: usize) -> Vec<f64> {
    assert!(m_sim >= 1, "at least one substep per observation");
    if coarse.len() < 2 {
        return Vec::new();
    }

    let mut fine = Vec::with_capacity((coarse.len() - 1) * m_sim);
    for pair in coarse.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        for k in 0..m_sim {
            let frac = k as f64 / m_sim as f64;
            fine.push(lo + (hi - lo) * frac);
        }
    }
    fine
}
