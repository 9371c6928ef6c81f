use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use morpion_run::{Algorithm, RunConfig, run};

#[derive(Parser, Debug)]
#[command(name = "morpion", about = "Morpion Solitaire 5T search with NRPA and NMCS")]
struct Args {
    /// Search algorithm: nrpa or nmcs
    #[arg(long, default_value = "nrpa")]
    algorithm: Algorithm,

    /// Nesting level. Without it, levels 1 through 5 run in turn
    #[arg(long)]
    level: Option<u32>,

    /// Lower-level searches per NRPA level
    #[arg(long, default_value_t = 100)]
    iterations: usize,

    /// NRPA learning rate
    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    /// Seed of the random stream
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Moves of the best game to lock in per outer step (default: all of it)
    #[arg(long)]
    commit: Option<usize>,

    /// Workers for root-parallel NRPA
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Wall-clock cap on each uniform NMCS playout, in milliseconds
    #[arg(long)]
    playout_budget_ms: Option<u64>,

    /// Write the board dump of the best game to this path
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    let levels = match args.level {
        Some(level) => level..=level,
        None => 1..=5,
    };

    for level in levels {
        let config = RunConfig {
            algorithm: args.algorithm,
            level,
            iterations: args.iterations,
            alpha: args.alpha,
            seed: args.seed,
            commit: args.commit,
            threads: args.threads,
            playout_budget: args.playout_budget_ms.map(Duration::from_millis),
        };
        let outcome = run(&config)?;
        info!("{}", outcome.report);

        if let Some(path) = &args.dump {
            fs::write(path, outcome.best.pretty().to_string())
                .with_context(|| format!("failed to write board dump to {}", path.display()))?;
            info!(path = %path.display(), moves = outcome.report.moves, "wrote board dump");
        }
    }
    Ok(())
}
