//! Command-line front end: run one chain or a temperature sweep and write
//! the results as CSV.
//
//  cargo run --release -- run --size 64 --steps 200000 --seed 42 --output history.csv

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use csv::WriterBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ising::{run_sweep, Config, Simulation, TemperatureGrid};

#[derive(Parser)]
#[command(about = "Metropolis Monte Carlo for the 2D Ising model")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single chain and write its sample history
    Run {
        #[command(flatten)]
        params: Params,

        /// Temperature
        #[arg(long, default_value = "2.0")]
        temperature: f64,

        /// History CSV (step, observables)
        #[arg(long, default_value = "history.csv")]
        output: PathBuf,

        /// Optional CSV with every lattice snapshot, one row per lattice row
        #[arg(long)]
        snapshots: Option<PathBuf>,
    },
    /// Run independent chains over a temperature grid
    Sweep {
        #[command(flatten)]
        params: Params,

        /// Temperature range (start,stop,step)
        #[arg(long, default_value = "0.1,10.0,0.1", value_delimiter = ',')]
        temperatures: Vec<f64>,

        /// Samples at or before this step are excluded from averages
        #[arg(long, default_value = "0")]
        burn_in: usize,

        #[arg(long, default_value = "sweep.csv")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct Params {
    /// Lattice edge length
    #[arg(long, default_value = "128")]
    size: usize,

    /// Flip attempts per chain
    #[arg(long, default_value = "100000")]
    steps: usize,

    /// Record a sample every N attempts
    #[arg(long, default_value = "16")]
    sample_every: usize,

    /// Coupling constant J
    #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
    coupling: f64,

    /// RNG seed; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
}

impl Params {
    fn config(&self, temperature: f64) -> Config {
        let cfg = Config::new(self.size, self.steps, self.sample_every, temperature)
            .with_coupling(self.coupling);
        match self.seed {
            Some(seed) => cfg.with_seed(seed),
            None => cfg,
        }
    }
}

fn progress_bar(len: u64) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let bar = ProgressBar::new(len);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);
    Ok(bar)
}

fn run_single(
    cfg: &Config,
    output: &Path,
    snapshots: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let sim = Simulation::new(cfg)?;

    // Ctrl-C stops the chain at the next sampling boundary.
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))?;
    }

    let bar = progress_bar((cfg.total_steps / cfg.sample_every + 1) as u64)?;
    let history = sim.run_until(&stop, |_| bar.inc(1));
    bar.finish();

    let mut wtr = WriterBuilder::new().from_path(output)?;
    wtr.write_record(["step", "magnetization", "heat_capacity", "susceptibility"])?;
    for s in &history {
        wtr.write_record(&[
            s.step.to_string(),
            s.magnetization.to_string(),
            s.heat_capacity.to_string(),
            s.susceptibility.to_string(),
        ])?;
    }
    wtr.flush()?;
    tracing::info!(path = %output.display(), samples = history.len(), "history written");

    if let Some(path) = snapshots {
        // Rows have size + 2 fields, so no header.
        let mut wtr = WriterBuilder::new().has_headers(false).from_path(path)?;
        for s in &history {
            for (row_idx, row) in s.snapshot.rows().enumerate() {
                let mut record = Vec::with_capacity(row.len() + 2);
                record.push(s.step.to_string());
                record.push(row_idx.to_string());
                record.extend(row.iter().map(|v| v.to_string()));
                wtr.write_record(&record)?;
            }
        }
        wtr.flush()?;
        tracing::info!(path = %path.display(), "snapshots written");
    }

    if history.interrupted() {
        println!("Interrupted after {} steps → {}", history.steps_run(), output.display());
    } else {
        println!(
            "Run complete (seed {}, acceptance {:.3}) → {}",
            history.seed().map_or_else(|| "n/a".to_string(), |s| s.to_string()),
            history.acceptance_rate(),
            output.display()
        );
    }
    Ok(())
}

fn run_grid(
    base: &Config,
    grid: &TemperatureGrid,
    burn_in: usize,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let sweep = run_sweep(base, grid, burn_in)?;

    let mut wtr = WriterBuilder::new().from_path(output)?;
    wtr.write_record([
        "temperature",
        "final_magnetization",
        "mean_magnetization",
        "std_magnetization",
        "mean_abs_magnetization",
        "heat_capacity",
        "susceptibility",
    ])?;
    for p in &sweep.points {
        let mut record = vec![p.temperature.to_string(), p.final_magnetization.to_string()];
        match &p.summary {
            Some(s) => record.extend([
                s.mean_magnetization.to_string(),
                s.std_magnetization.to_string(),
                s.mean_abs_magnetization.to_string(),
                s.mean_heat_capacity.to_string(),
                s.mean_susceptibility.to_string(),
            ]),
            None => record.extend(std::iter::repeat(String::new()).take(5)),
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    println!(
        "Sweep complete ({} temperatures, master seed {}) → {}",
        sweep.points.len(),
        sweep.master_seed,
        output.display()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ising=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Run { params, temperature, output, snapshots } => {
            let cfg = params.config(*temperature);
            run_single(&cfg, output, snapshots.as_deref())
        }
        Command::Sweep { params, temperatures, burn_in, output } => {
            if temperatures.len() != 3 {
                return Err("--temperatures expects start,stop,step".into());
            }
            let grid = TemperatureGrid {
                start: temperatures[0],
                stop:  temperatures[1],
                step:  temperatures[2],
            };
            // Placeholder temperature; each grid point overrides it.
            let base = params.config(grid.start);
            run_grid(&base, &grid, *burn_in, output)
        }
    }
}
