use clap::{Parser, Subcommand};
use serde_json::json;

use sentvol_core::{
    interpolate_sentiment, simulate_joint_process, simulated_neg_log_likelihood, DegeneracyPolicy,
    JointParams, NoiseGenerator, SimContext,
};
use sentvol_optim::{NelderMead, NelderMeadConfig};

#[derive(Parser)]
#[command(name = "sentvol")]
#[command(about = "Simulation and estimation of a joint price-volatility-sentiment process")]
#[command(long_about = "Forward-simulates a correlated price/volatility SDE driven by a \
sentiment series, and fits its parameters to an observed series by simulated maximum likelihood")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate one joint (price, volatility) path and print a JSON summary
    Simulate {
        /// Observation interval
        #[arg(long, default_value = "1.0")]
        dt: f64,

        /// Number of observations
        #[arg(long, default_value = "100")]
        observations: usize,

        /// Euler-Maruyama substeps per observation
        #[arg(long, default_value = "10")]
        substeps: usize,

        /// Initial price
        #[arg(long, default_value = "100.0")]
        p0: f64,

        /// Initial volatility
        #[arg(long, default_value = "0.04")]
        v0: f64,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Model parameters (JSON object)
        #[arg(long)]
        params: Option<String>,
    },

    /// Fit parameters to a synthetic observed series by simulated maximum likelihood
    Estimate {
        /// Observation interval
        #[arg(long, default_value = "1.0")]
        dt: f64,

        /// Number of observations
        #[arg(long, default_value = "100")]
        observations: usize,

        /// Substeps per observation (simulation and likelihood grids)
        #[arg(long, default_value = "10")]
        substeps: usize,

        /// Simulated particles per observation step
        #[arg(long, default_value = "64")]
        particles: usize,

        /// Random seed (data and common-random-number draws)
        #[arg(long, default_value = "42")]
        seed: u64,

        /// True model parameters for the synthetic data (JSON object)
        #[arg(long)]
        params: Option<String>,

        /// Optimizer starting point (JSON object; default perturbs the truth)
        #[arg(long)]
        start: Option<String>,

        /// Nelder-Mead iteration budget
        #[arg(long, default_value = "500")]
        max_iterations: usize,
    },
}

/// Demo parameter set; overridable through --params.
fn demo_params() -> JointParams {
    JointParams::new(0.1, 100.0, 2.0, 0.04, 0.01, 0.3, -0.5)
}

fn parse_params(json_str: Option<String>) -> anyhow::Result<JointParams> {
    match json_str {
        Some(s) => Ok(serde_json::from_str(&s)?),
        None => Ok(demo_params()),
    }
}

/// Synthetic coarse sentiment series, one value per observation.
fn demo_sentiment(n_obs: usize) -> Vec<f64> {
    (0..n_obs).map(|i| 0.5 * (0.1 * i as f64).sin()).collect()
}

pub fn run_simulate_command(
    dt: f64,
    observations: usize,
    substeps: usize,
    p0: f64,
    v0: f64,
    seed: u64,
    params: Option<String>,
) -> anyhow::Result<()> {
    let params = parse_params(params)?;
    let sentiment = demo_sentiment(observations);

    let mut price = vec![0.0; observations];
    let mut volatility = vec![0.0; observations];
    let mut rng = NoiseGenerator::new(seed);
    simulate_joint_process(
        &mut rng,
        &params,
        &sentiment,
        dt,
        substeps,
        p0,
        v0,
        &mut price,
        &mut volatility,
    );

    let tail = observations / 2;
    let tail_mean = |xs: &[f64]| xs[xs.len() - tail.max(1)..].iter().sum::<f64>() / tail.max(1) as f64;

    let summary = json!({
        "params": params,
        "dt": dt,
        "observations": observations,
        "substeps": substeps,
        "seed": seed,
        "price_head": &price[..observations.min(5)],
        "volatility_head": &volatility[..observations.min(5)],
        "price_tail_mean": tail_mean(&price),
        "volatility_tail_mean": tail_mean(&volatility),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn run_estimate_command(
    dt: f64,
    observations: usize,
    substeps: usize,
    particles: usize,
    seed: u64,
    params: Option<String>,
    start: Option<String>,
    max_iterations: usize,
) -> anyhow::Result<()> {
    let truth = parse_params(params)?;
    let coarse_sentiment = demo_sentiment(observations);

    // Synthetic observed series under the true parameters
    let mut price = vec![0.0; observations];
    let mut volatility = vec![0.0; observations];
    let mut rng = NoiseGenerator::from_stream(seed, 0);
    simulate_joint_process(
        &mut rng,
        &truth,
        &coarse_sentiment,
        dt,
        substeps,
        100.0,
        0.04,
        &mut price,
        &mut volatility,
    );

    // Context with noise drawn once, shared across all evaluations
    let fine_sentiment = interpolate_sentiment(&coarse_sentiment, substeps);
    let mut noise_rng = NoiseGenerator::from_stream(seed, 1);
    let mut ctx = SimContext::new(
        price,
        volatility,
        fine_sentiment,
        particles,
        substeps,
        dt,
        DegeneracyPolicy::Sentinel(1e10),
        &mut noise_rng,
    );

    let start: JointParams = match start {
        Some(s) => serde_json::from_str(&s)?,
        None => JointParams::new(
            truth.gamma_p * 1.5,
            truth.mu_p * 1.05,
            truth.gamma_v * 0.75,
            truth.mu_v * 1.5,
            truth.beta_v * 2.0,
            truth.sigma_v * 1.5,
            truth.rho_pv * 0.5,
        ),
    };

    let lower = [0.0, 0.0, 0.0, 0.0, 0.0, 1e-4, -0.99];
    let upper = [50.0, 1e4, 50.0, 10.0, 10.0, 10.0, 0.99];
    let solver = NelderMead::with_config(NelderMeadConfig {
        max_iterations,
        ..NelderMeadConfig::default()
    });
    let result = solver.minimise(&start.to_vec(), &lower, &upper, |x| {
        simulated_neg_log_likelihood(x, None, &mut ctx)
    })?;

    let fitted = JointParams::from_slice(&result.parameters);
    let summary = json!({
        "truth": truth,
        "start": start,
        "fitted": fitted,
        "objective": result.objective,
        "iterations": result.iterations,
        "function_evaluations": result.function_evaluations,
        "converged": result.converged,
        "observations": observations,
        "particles": particles,
        "substeps": substeps,
        "seed": seed,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
