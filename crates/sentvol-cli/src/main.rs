mod cli;

use clap::Parser;
use cli::{run_estimate_command, run_simulate_command, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            dt,
            observations,
            substeps,
            p0,
            v0,
            seed,
            params,
        } => {
            run_simulate_command(dt, observations, substeps, p0, v0, seed, params)?;
        }
        Commands::Estimate {
            dt,
            observations,
            substeps,
            particles,
            seed,
            params,
            start,
            max_iterations,
        } => {
            run_estimate_command(
                dt,
                observations,
                substeps,
                particles,
                seed,
                params,
                start,
                max_iterations,
            )?;
        }
    }

    Ok(())
}
