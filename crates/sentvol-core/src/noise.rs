use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, StandardNormal};

/// Seeded source of standard-normal draws.
///
/// The simulator and the context constructor are generic over this trait so
/// tests can replay a fixed sequence instead of a real generator.
pub trait NormalSource {
    fn standard_normal(&mut self) -> f64;

    fn fill_standard_normal(&mut self, out: &mut [f64]) {
        for slot in out.iter_mut() {
            *slot = self.standard_normal();
        }
    }
}

/// ChaCha20-backed normal source, deterministic given its seed.
pub struct NoiseGenerator {
    rng: ChaCha20Rng,
}

impl NoiseGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Derive an independent stream from a global seed.
    pub fn from_stream(global_seed: u64, stream_id: u64) -> Self {
        // Combine seeds deterministically
        let seed = global_seed.wrapping_add(stream_id.wrapping_mul(0x9e3779b97f4a7c15));
        Self::new(seed)
    }
}

impl NormalSource for NoiseGenerator {
    fn standard_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted. Test double.
pub struct ReplaySource {
    values: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "replay sequence must not be empty");
        Self { values, cursor: 0 }
    }
}

impl NormalSource for ReplaySource {
    fn standard_normal(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

/// Cholesky-style correlation of an independent draw with the volatility
/// shock: W_p = √(1 − ρ²)·z + ρ·W_v. |ρ| ≥ 1 yields NaN, by contract.
#[inline]
pub fn correlate(rho: f64, raw: f64, w_v: f64) -> f64 {
    (1.0 - rho * rho).sqrt() * raw + rho * w_v
}
