use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rideshare_sim::ingest::{read_events, EventRecord};
use rideshare_sim::matching::MatchingAlgorithmType;
use rideshare_sim::scenario::{generate_events, ScenarioParams, SimulationConfig};
use rideshare_sim::simulation::Simulation;
use rideshare_sim::telemetry::SimReport;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "rideshare",
    about = "Discrete-event ride-matching simulation",
    long_about = "Replays rider and driver requests on a Manhattan grid, matching\n\
                  riders to drivers and reporting waits and distances."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the requests listed in an events file
    Run {
        /// Events file, one request per line
        events: PathBuf,
        #[command(flatten)]
        options: RunOptions,
    },
    /// Generate a random request batch and run it
    Generate {
        #[arg(long, default_value_t = 200)]
        riders: usize,
        #[arg(long, default_value_t = 40)]
        drivers: usize,
        /// Seed for a reproducible batch; random when omitted
        #[arg(long, env = "RIDESHARE_SEED")]
        seed: Option<u64>,
        /// Also write the generated batch as an events file
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        options: RunOptions,
    },
}

#[derive(clap::Args)]
struct RunOptions {
    /// Matching policy the dispatcher uses
    #[arg(value_enum, long, default_value_t = Matching::NearestIdle)]
    matching: Matching,
    /// Stop after this many events even if more are queued
    #[arg(long)]
    max_steps: Option<usize>,
    /// Report format
    #[arg(value_enum, long, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Matching {
    /// Shortest travel time among idle drivers
    NearestIdle,
    /// Earliest-registered idle driver
    FirstIdle,
}

impl From<Matching> for MatchingAlgorithmType {
    fn from(matching: Matching) -> Self {
        match matching {
            Matching::NearestIdle => MatchingAlgorithmType::NearestIdle,
            Matching::FirstIdle => MatchingAlgorithmType::FirstIdle,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

// ── Entry point ────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { events, options } => {
            let records = read_events(&events)
                .with_context(|| format!("failed to read events from {}", events.display()))?;
            simulate(&records, &options)
        }
        Commands::Generate {
            riders,
            drivers,
            seed,
            output,
            options,
        } => {
            let mut params = ScenarioParams {
                num_riders: riders,
                num_drivers: drivers,
                ..Default::default()
            };
            if let Some(seed) = seed {
                params = params.with_seed(seed);
            }
            let records = generate_events(&params);
            if let Some(path) = output {
                write_events(&path, &records)?;
            }
            simulate(&records, &options)
        }
    }
}

// ── Commands ───────────────────────────────────────────────────────

fn simulate(records: &[EventRecord], options: &RunOptions) -> Result<()> {
    if records.is_empty() {
        bail!("no requests to simulate");
    }
    let mut config = SimulationConfig::default().with_matching(options.matching.into());
    if let Some(max_steps) = options.max_steps {
        config = config.with_max_steps(max_steps);
    }
    tracing::info!(requests = records.len(), matching = ?config.matching, "starting simulation");

    let mut simulation = Simulation::new(config);
    simulation.load(records);
    let report = simulation.run();

    match options.format {
        Format::Text => print_report(&report),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn write_events(path: &Path, records: &[EventRecord]) -> Result<()> {
    let text: String = records.iter().map(|record| format!("{record}\n")).collect();
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "events written");
    Ok(())
}

fn print_report(report: &SimReport) {
    println!("events processed:      {}", report.events_processed);
    println!("simulation ended at:   {}", report.end_time);
    println!("riders requested:      {}", report.riders_requested);
    println!("riders satisfied:      {}", report.riders_satisfied);
    println!("riders cancelled:      {}", report.riders_cancelled);
    println!("drivers:               {}", report.drivers);
    println!("mean rider wait:       {:.2}", report.rider_wait_time);
    println!("mean driver distance:  {:.2}", report.driver_total_distance);
    println!("mean ride distance:    {:.2}", report.driver_ride_distance);
}
