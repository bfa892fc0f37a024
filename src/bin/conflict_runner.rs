//! Headless Conflict Runner
//!
//! Runs one seeded simulation to completion (or a tick limit) and writes
//! the full output as JSON or a text summary.

use std::path::PathBuf;
use std::time::Instant;

use civ_conflict::conflict::{NoOpObserver, SimulationContext, SimulationOutput, TickDriver};
use civ_conflict::core::error::Result;
use civ_conflict::core::SimulationConfig;
use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Headless Conflict Runner - two civilizations, no console
#[derive(Parser, Debug)]
#[command(name = "conflict_runner")]
#[command(about = "Run the two-civilization simulation and report the outcome")]
struct Args {
    /// Maximum ticks to simulate (stops earlier on extinction)
    #[arg(long, default_value_t = 2000)]
    ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with simulation settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pace ticks in real time instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Speed multiplier for --realtime (0.1 to 20)
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Write the output here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("civ_conflict=warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut ctx = SimulationContext::from_config(config)?;
    let seed = ctx.seed();
    tracing::info!(seed, ticks = args.ticks, realtime = args.realtime, "conflict run starting");

    let start = Instant::now();
    if args.realtime {
        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(true);
            }
        });
        TickDriver::new(ctx.config().tick_interval_ms)
            .with_speed(args.speed)
            .with_max_ticks(args.ticks)
            .drive(&mut ctx, rx, &mut NoOpObserver)
            .await?;
    } else {
        ctx.run(args.ticks);
    }
    let output = SimulationOutput::new(&ctx, start.elapsed());

    let rendered = match args.format.as_str() {
        "json" => output.to_json()?,
        "text" => format!("{}\nSeed: {}", output.summary(), seed),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            output.to_json()?
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            eprintln!("Output written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
