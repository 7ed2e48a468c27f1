//! 1-D Gaussian kernel with a Silverman-type, deliberately undersmoothed
//! bandwidth rule. The joint density at an observed (price, volatility) pair
//! is approximated by the product of the two 1-D kernels; correlation between
//! the dimensions enters only through the shared simulated paths.

use std::f64::consts::PI;

/// Per-dimension kernels in the product approximation.
const DIM: f64 = 1.0;
/// Undersmoothing exponent added on top of the Silverman rate.
const UNDERSMOOTH: f64 = 0.5;

/// Bandwidth per unit of sample standard deviation:
/// h = (4/(d+2))^{1/(d+4)} · n^{−(1+u)/(d+4)} · sd, with d = 1, u = 0.5.
pub fn bandwidth_factor(n_sim: usize) -> f64 {
    let c = (4.0 / (DIM + 2.0)).powf(1.0 / (DIM + 4.0));
    c * (n_sim as f64).powf(-(1.0 + UNDERSMOOTH) / (DIM + 4.0))
}

/// Gaussian kernel with bandwidth `h` evaluated at `x` for a particle at
/// `center`. A zero bandwidth divides by zero; the resulting NaN/Inf is
/// surfaced to the caller rather than masked here.
#[inline]
pub fn gaussian(x: f64, center: f64, h: f64) -> f64 {
    let z = x - center;
    (-(z * z) / (2.0 * h * h)).exp() / (h * (2.0 * PI).sqrt())
}
