//! bikeflow — run a bike-share network through one or more simulated days.
//!
//! Builds a clustered station layout (or loads one from a JSON config),
//! runs `--days` × 24 hourly steps with the chosen router, and prints the
//! network before and after along with per-hour totals.  Optionally writes
//! per-step CSV tables and the day snapshots as JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use bf_core::{SimConfig, Weather};
use bf_output::{CsvWriter, SimOutputObserver};
use bf_routing::RoutingStrategy;
use bf_sim::{BikeSim, NoopObserver, SimBuilder, SimObserver, Snapshot};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "bikeflow")]
#[command(about = "Stochastic bike redistribution across a station network")]
struct Cli {
    /// JSON file with a full or partial SimConfig; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of stations to generate
    #[arg(long)]
    stations: Option<usize>,

    /// Total bikes in the system
    #[arg(long)]
    bikes: Option<u32>,

    /// RNG seed.  Dock counts are random, so some seeds cannot hold every
    /// bike; lower --bikes or raise capacity_max in --config if a seed fails
    #[arg(long)]
    seed: Option<u64>,

    /// Starting hour of day, 0-23
    #[arg(long)]
    hour: Option<u8>,

    /// sunny, cloudy, rainy, snowy, or stormy
    #[arg(long)]
    weather: Option<Weather>,

    /// Days to simulate
    #[arg(long, default_value_t = 1)]
    days: u32,

    /// Route with the amplitude router instead of the categorical one
    #[arg(long)]
    alternate_router: bool,

    /// Directory for station_snapshots.csv and step_summaries.csv
    #[arg(long)]
    output: Option<PathBuf>,

    /// File to write every day snapshot to, as a JSON array
    #[arg(long)]
    json: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SimConfig::default(),
        };
        if let Some(n) = self.stations {
            config.station_count = n;
        }
        if let Some(b) = self.bikes {
            config.total_bikes = b;
        }
        if let Some(s) = self.seed {
            config.seed = s;
        }
        if let Some(h) = self.hour {
            config.start_hour = h;
        }
        if let Some(w) = self.weather {
            config.weather = w;
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let strategy = RoutingStrategy::from_flag(cli.alternate_router);

    println!("=== bikeflow ===");
    println!(
        "Stations: {}  |  Bikes: {}  |  Seed: {}  |  Router: {strategy}",
        config.station_count, config.total_bikes, config.seed
    );
    println!();

    let (bikes, seed) = (config.total_bikes, config.seed);
    let mut sim = SimBuilder::new(config).build().map_err(|e| {
        if e.is_capacity_shortfall() {
            anyhow::Error::new(e).context(format!(
                "seed {seed} drew too few docks for {bikes} bikes; \
                 lower --bikes or raise capacity_max in --config"
            ))
        } else {
            e.into()
        }
    })?;
    println!("Initial state ({}):", sim.clock());
    print_stations(&sim.snapshot());
    println!();

    let t0 = Instant::now();
    let snapshots = match &cli.output {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
            let mut obs = SimOutputObserver::new(CsvWriter::new(dir)?);
            let snapshots = run_days(&mut sim, cli.days, strategy, &mut obs)?;
            obs.finish()?;
            info!("wrote CSV output to {}", dir.display());
            snapshots
        }
        None => run_days(&mut sim, cli.days, strategy, &mut NoopObserver)?,
    };
    let elapsed = t0.elapsed();

    if let Some(path) = &cli.json {
        bf_output::json::write_snapshots(path, &snapshots)?;
        info!("wrote {} snapshots to {}", snapshots.len(), path.display());
    }

    println!();
    println!(
        "Simulated {} days ({} steps) in {:.3} s",
        cli.days,
        sim.step_count(),
        elapsed.as_secs_f64()
    );
    println!("Final state ({}):", sim.clock());
    print_stations(&sim.snapshot());

    Ok(())
}

fn run_days<O: SimObserver>(
    sim:      &mut BikeSim,
    days:     u32,
    strategy: RoutingStrategy,
    observer: &mut O,
) -> Result<Vec<Snapshot>> {
    let mut all = Vec::with_capacity(days as usize * 24);
    for day in 1..=days {
        let snapshots = sim.simulate_day_with(strategy, observer)?;
        println!("Day {day}:");
        print_hours(&snapshots);
        all.extend(snapshots);
    }
    Ok(all)
}

// ── Tables ────────────────────────────────────────────────────────────────────

fn print_stations(snapshot: &Snapshot) {
    println!(
        "{:<8} {:>12} {:>6} {:>6} {:>7}",
        "Station", "Location", "Bikes", "Docks", "Util"
    );
    println!("{}", "-".repeat(43));
    for s in &snapshot.stations {
        println!(
            "{:<8} {:>12} {:>6} {:>6} {:>6.0}%",
            s.id.0,
            format!("({:.1}, {:.1})", s.location.x, s.location.y),
            s.occupancy,
            s.capacity,
            s.utilization * 100.0
        );
    }
    println!(
        "Total: {} bikes, {} dropped",
        snapshot.total_bikes, snapshot.dropped_bikes
    );
}

fn print_hours(snapshots: &[Snapshot]) {
    println!("{:<6} {:>8} {:>7} {:>6}", "Hour", "Weather", "Moved", "Bikes");
    for s in snapshots {
        println!(
            "{:<6} {:>8} {:>7} {:>6}",
            s.hour.to_string(),
            s.weather.as_str(),
            s.movement,
            s.total_bikes
        );
    }
}
