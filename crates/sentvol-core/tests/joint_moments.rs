use sentvol_core::{simulate_joint_process, JointParams, NoiseGenerator};

fn tail_mean(xs: &[f64]) -> f64 {
    let tail = &xs[xs.len() / 2..];
    tail.iter().sum::<f64>() / tail.len() as f64
}

#[test]
fn mean_reversion_toward_long_run_levels() {
    // Fast reversion so the time average settles quickly; constant sentiment
    // shifts the volatility target to mu_v + beta_v * |s|.
    let params = JointParams::new(2.0, 50.0, 2.0, 0.04, 0.05, 0.2, -0.3);
    let sent_level = 0.8;
    let vol_target = params.mu_v + params.beta_v * sent_level;

    let n_obs = 200;
    let n_paths = 16;
    let sentiment = vec![sent_level; n_obs];

    let mut price_avg = 0.0;
    let mut vol_avg = 0.0;
    for path_id in 0..n_paths {
        let mut price = vec![0.0; n_obs];
        let mut volatility = vec![0.0; n_obs];
        let mut rng = NoiseGenerator::from_stream(42, path_id);
        simulate_joint_process(
            &mut rng,
            &params,
            &sentiment,
            0.5,
            20,
            params.mu_p,
            vol_target,
            &mut price,
            &mut volatility,
        );
        price_avg += tail_mean(&price);
        vol_avg += tail_mean(&volatility);
    }
    price_avg /= n_paths as f64;
    vol_avg /= n_paths as f64;

    println!("Mean reversion:");
    println!("  price  target {:.4}, time average {:.4}", params.mu_p, price_avg);
    println!("  vol    target {:.4}, time average {:.4}", vol_target, vol_avg);

    assert!(
        (price_avg - params.mu_p).abs() < 1.0,
        "price time average {} too far from {}",
        price_avg,
        params.mu_p
    );
    assert!(
        (vol_avg - vol_target).abs() < 0.01,
        "volatility time average {} too far from {}",
        vol_avg,
        vol_target
    );
}

#[test]
fn end_to_end_scenario() {
    // dt = 1, M = 10, N = 100, p0 = 100, v0 = 0.04, zero sentiment
    let params = JointParams::new(0.1, 100.0, 2.0, 0.04, 0.01, 0.3, -0.5);
    let n_obs = 100;
    let n_paths = 32;
    let sentiment = vec![0.0; n_obs];

    let mut price_avg = 0.0;
    let mut vol_avg = 0.0;
    for path_id in 0..n_paths {
        let mut price = vec![0.0; n_obs];
        let mut volatility = vec![0.0; n_obs];
        let mut rng = NoiseGenerator::from_stream(7, path_id);
        simulate_joint_process(
            &mut rng,
            &params,
            &sentiment,
            1.0,
            10,
            100.0,
            0.04,
            &mut price,
            &mut volatility,
        );
        assert!(price.iter().all(|p| p.is_finite()));
        assert!(volatility.iter().all(|v| v.is_finite()));
        price_avg += tail_mean(&price);
        vol_avg += tail_mean(&volatility);
    }
    price_avg /= n_paths as f64;
    vol_avg /= n_paths as f64;

    println!("End-to-end scenario:");
    println!("  late-horizon price mean  {:.4} (target 100)", price_avg);
    println!("  late-horizon vol mean    {:.5} (target 0.04)", vol_avg);

    // Weak price reversion (gamma_p = 0.1) leaves substantial path-level
    // variance; the bands reflect that.
    assert!(
        (price_avg - 100.0).abs() < 15.0,
        "late-horizon price mean {} outside band around 100",
        price_avg
    );
    assert!(
        (vol_avg - 0.04).abs() < 0.02,
        "late-horizon volatility mean {} outside band around 0.04",
        vol_avg
    );
}
