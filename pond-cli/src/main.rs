use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use pond_core::Simulation;
use pond_types::PondConfig;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pond-cli")]
#[command(about = "Pike and carp pond simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Watch the pond tick by tick in the terminal.
    Run {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 20)]
        ticks: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Advance the simulation and print a JSON summary.
    Step {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 1)]
        ticks: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = false)]
        print_state: bool,
    },
    /// Write a JSONL snapshot trace of a run.
    Export {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 20)]
        ticks: u32,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct StepSummary {
    ticks: u32,
    seed: u64,
    final_tick: u64,
    pikes: u32,
    carps: u32,
    predations_last_tick: u64,
    total_predations: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "pond_cli=info,pond_core=info".to_owned()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            ticks,
            seed,
        } => run_command(config, ticks, seed),
        Commands::Step {
            config,
            ticks,
            seed,
            print_state,
        } => step_command(config, ticks, seed, print_state),
        Commands::Export {
            config,
            ticks,
            seed,
            out,
        } => export_command(config, ticks, seed, out),
    }
}

fn run_command(config_path: Option<PathBuf>, ticks: u32, seed: u64) -> Result<()> {
    let cfg = load_config(config_path)?;
    let delay = Duration::from_millis(cfg.tick_delay_ms);
    let mut sim = Simulation::new(cfg, seed)?;
    info!(seed, ticks, "starting pond run");

    let mut stdout = io::stdout();
    for tick in 0..ticks {
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        println!("Tick {}:", tick + 1);
        print!("{}", sim.render());
        stdout.flush()?;
        sim.step_n(1)?;
        thread::sleep(delay);
    }

    println!("Simulation ended.");
    let metrics = sim.metrics();
    info!(
        pikes = metrics.pikes,
        carps = metrics.carps,
        total_predations = metrics.total_predations,
        "final pond state"
    );
    Ok(())
}

fn step_command(
    config_path: Option<PathBuf>,
    ticks: u32,
    seed: u64,
    print_state: bool,
) -> Result<()> {
    let cfg = load_config(config_path)?;
    let mut sim = Simulation::new(cfg, seed)?;
    let ticks = ticks.max(1);
    sim.step_n(ticks)?;
    let snapshot = sim.snapshot();

    let summary = StepSummary {
        ticks,
        seed,
        final_tick: snapshot.tick,
        pikes: snapshot.metrics.pikes,
        carps: snapshot.metrics.carps,
        predations_last_tick: snapshot.metrics.predations_last_tick,
        total_predations: snapshot.metrics.total_predations,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    if print_state {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

fn export_command(
    config_path: Option<PathBuf>,
    ticks: u32,
    seed: u64,
    out: PathBuf,
) -> Result<()> {
    let cfg = load_config(config_path)?;
    let mut sim = Simulation::new(cfg, seed)?;
    let lines = sim.export_trace_jsonl(ticks)?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating output directory {}", parent.display()))?;
        }
    }
    fs::write(&out, lines.join("\n"))
        .with_context(|| format!("failed writing trace to {}", out.display()))?;
    println!("exported trace to {}", out.display());
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<PondConfig> {
    if let Some(path) = path {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg: PondConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML config {}", path.display()))?;
        Ok(cfg)
    } else {
        Ok(PondConfig::default())
    }
}
