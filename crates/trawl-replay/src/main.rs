use std::path::PathBuf;

use clap::Parser;

use trawl_replay::config::ReplayConfig;
use trawl_replay::logging::init_logging;
use trawl_replay::replay::ReplayRunner;

/// Replays recorded trawling sessions through the shoal depth tracker.
#[derive(Debug, Parser)]
#[command(
    name = "trawl-replay",
    author,
    version,
    about = "Deterministic shoal depth replay harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "replay/replay.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the JSONL event log to replay.
    #[arg(long, value_name = "FILE")]
    events: Option<PathBuf>,

    /// Override the shoal seed table.
    #[arg(long, value_name = "FILE")]
    seeds: Option<PathBuf>,

    /// Exit after validating the configuration (no replay is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ReplayConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(events) = cli.events {
        config.input.events = events;
    }

    if let Some(seeds) = cli.seeds {
        config.input.seeds = Some(seeds);
    }

    config.validate()?;

    let outputs = config.resolved_outputs()?;
    let run_id = config.run_id.clone();
    let slots = config.nets.slots;

    println!(
        "Loaded configuration '{run_id}' replaying {} with {slots} net{}",
        config.input.events.display(),
        if slots == 1 { "" } else { "s" }
    );

    let telemetry = init_logging(&config, &outputs)?;
    let runner = ReplayRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: replay skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Replay complete for '{run_id}': {} events, {} ticks ({:.1}% resolved), catch {}",
        summary.events_applied,
        summary.ticks,
        summary.resolved_tick_ratio * 100.0,
        summary.final_quantity
    );
    if summary.quantity_errors > 0 {
        println!("Quantity errors: {}", summary.quantity_errors);
    }
    println!("Timeline: {}", summary.timeline_path.display());
    println!("Summary: {}", summary.summary_path.display());
    if let Some(guard) = telemetry.as_ref() {
        println!("Telemetry log: {}", guard.path.display());
    }

    Ok(())
}
