use sentvol_core::noise::{correlate, NormalSource};
use sentvol_core::stats::correlation;
use sentvol_core::NoiseGenerator;

fn shock_sequences(rho: f64, n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = NoiseGenerator::new(seed);
    let mut w_v = Vec::with_capacity(n);
    let mut w_p = Vec::with_capacity(n);
    for _ in 0..n {
        let v = rng.standard_normal();
        let p = correlate(rho, rng.standard_normal(), v);
        w_v.push(v);
        w_p.push(p);
    }
    (w_v, w_p)
}

#[test]
fn zero_rho_gives_independent_shocks() {
    let (w_v, w_p) = shock_sequences(0.0, 200_000, 42);
    let corr = correlation(&w_p, &w_v);
    println!("rho = 0: sample correlation {:.5}", corr);
    assert!(corr.abs() < 0.01, "sample correlation {} too far from 0", corr);
}

#[test]
fn sample_correlation_converges_to_rho() {
    for &rho in &[-0.5, 0.3, 0.9] {
        let (w_v, w_p) = shock_sequences(rho, 200_000, 42);
        let corr = correlation(&w_p, &w_v);
        println!("rho = {}: sample correlation {:.5}", rho, corr);
        assert!(
            (corr - rho).abs() < 0.01,
            "sample correlation {} too far from {}",
            corr,
            rho
        );
    }
}

#[test]
fn out_of_domain_rho_propagates_nan() {
    // |rho| >= 1 is the caller's problem; the construction yields NaN
    assert!(correlate(1.5, 0.3, -0.2).is_nan());
    assert!(correlate(-1.01, 0.3, -0.2).is_nan());
}
