//! Civ Conflict - Entry Point
//!
//! Interactive console for the two-civilization simulation. Sets up logging
//! and the async runtime, then reads commands until `quit`.

use civ_conflict::conflict::output::civ_line;
use civ_conflict::conflict::{InterruptGate, SimulationContext, TickDriver, TickReport};
use civ_conflict::core::error::Result;
use civ_conflict::core::{SimulationConfig, Side};

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LINES: usize = 10;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("civ_conflict=info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(Path::new(&path))?,
        None => SimulationConfig::default(),
    };

    let rt = Runtime::new()?;
    let mut ctx = SimulationContext::from_config(config)?;
    tracing::info!(seed = ctx.seed(), "Civ Conflict starting...");

    // One Ctrl-C listener for the whole session: it stops a real-time run,
    // and exits when nothing is running
    let gate = Arc::new(InterruptGate::default());
    let listener = Arc::clone(&gate);
    rt.spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if !listener.interrupt() {
                println!();
                std::process::exit(130);
            }
        }
    });

    println!("\n=== CIV CONFLICT ===");
    println!("Two civilizations, one galaxy");
    println!();
    println!("Commands:");
    println!("  start                   - Run in real time until Ctrl-C or extinction");
    println!("  pause                   - Pause the simulation");
    println!("  tick / t                - Advance simulation by one tick");
    println!("  run <n>                 - Run n simulation ticks");
    println!("  status / s              - Show detailed status");
    println!("  set <a|b> <field> <v>   - Edit a starting value (paused, at peace)");
    println!("  restart                 - Restart from the edited starting values");
    println!("  reset                   - Generate two new civilizations");
    println!("  log [n]                 - Show the last n log entries");
    println!("  quit / q                - Exit");
    println!();

    loop {
        display_status(&ctx);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "quit" | "q" => break,
            "tick" | "t" => match ctx.advance() {
                Ok(report) => print_report(&report),
                Err(e) => println!("{}", e),
            },
            "run" => match words.next().and_then(|n| n.parse::<u64>().ok()) {
                Some(n) => {
                    println!("Running {} ticks...", n);
                    let done = ctx.run(n);
                    println!("Completed {} ticks. Now at tick {}.", done, ctx.tick());
                }
                None => println!("Usage: run <number>"),
            },
            "start" => {
                let driver = TickDriver::new(ctx.config().tick_interval_ms);
                let mut observer = |report: &TickReport| {
                    for entry in &report.logs {
                        println!("{}", entry.display());
                    }
                };
                let rx = gate.arm();
                let result = rt.block_on(driver.drive(&mut ctx, rx, &mut observer));
                gate.disarm();
                match result {
                    Ok(result) => println!("Stopped after {} ticks ({:?}).", result.ticks, result.reason),
                    Err(e) => println!("{}", e),
                }
            }
            "pause" => {
                ctx.pause();
                println!("Paused at tick {}.", ctx.tick());
            }
            "status" | "s" => display_detailed_status(&ctx),
            "set" => {
                let side = words.next().and_then(Side::parse);
                match (side, words.next(), words.next()) {
                    (Some(side), Some(field), Some(value)) => match ctx.edit_initial(side, field, value) {
                        Ok(field) => {
                            println!("{} {} = {}", ctx.initial(side).name, field.label(), value);
                            if ctx.tick() > 0 {
                                println!("Takes effect on restart.");
                            }
                        }
                        Err(e) => println!("{}", e),
                    },
                    _ => println!("Usage: set <a|b> <field> <value>"),
                }
            }
            "restart" => {
                ctx.reset_to_initial();
                println!("Restarted from the starting values.");
            }
            "reset" => {
                ctx.reset();
                println!("New civilizations generated.");
            }
            "log" => {
                let n = words
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .unwrap_or(DEFAULT_LOG_LINES);
                for entry in ctx.log().recent(n) {
                    println!("  {:>5} {}", entry.tick, entry.display());
                }
            }
            _ => println!("Unknown command. Available: start, pause, tick, run <n>, status, set, restart, reset, log, quit"),
        }
    }

    println!(
        "\nGoodbye! Final state: {} after {} ticks.",
        ctx.phase().label(),
        ctx.tick()
    );
    Ok(())
}

fn print_report(report: &TickReport) {
    for entry in &report.logs {
        println!("{}", entry.display());
    }
    println!("Tick {} complete.", report.tick);
}

/// Display a brief status summary
fn display_status(ctx: &SimulationContext) {
    println!();
    println!("--- Tick {} | {} ---", ctx.tick(), ctx.phase().label());
    for civ in ctx.civs() {
        println!("  {}", civ_line(civ));
    }
    if let Some(name) = ctx.extinct_civilization() {
        println!("  {} is extinct. Use `reset` to start over.", name);
    }
    println!();
}

/// Display instincts, traits and events for both sides
fn display_detailed_status(ctx: &SimulationContext) {
    println!();
    println!("=== Detailed Status (Tick {}) ===", ctx.tick());
    println!();

    for side in Side::BOTH {
        let civ = ctx.civ(side);
        println!("{} ({} / {})", civ.name, civ.color_primary, civ.color_accent);
        println!(
            "  Instincts: survival {:.2}, development {:.2}",
            civ.instinct.survival_instinct, civ.instinct.development_desire
        );
        println!(
            "  Traits: aggressiveness {:.0}, diplomacy {:.0}",
            civ.aggressiveness, civ.diplomacy
        );
        match ctx.active_event(side) {
            Some(event) => println!("  Event: {} ({} ticks left)", event.kind.label(), event.remaining),
            None => println!("  Event: none"),
        }
        println!();
    }

    let stats = ctx.stats();
    println!(
        "Wars: {}, treaties: {}, crises: {}, booms: {}, singularities: {}",
        stats.wars_declared, stats.treaties_signed, stats.crises, stats.booms, stats.singularities
    );
    println!("History: {} samples, log: {} entries", ctx.history().len(), ctx.log().len());
    println!();
}
