// sweep.rs - Independent runs across a temperature grid

use rayon::prelude::*;
use tracing::info;

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::measure::Summary;
use crate::sampling::Simulation;
use crate::utils::rng::{entropy_seed, stream_rng};

/// Upper bound on the number of grid temperatures.
pub const MAX_GRID_POINTS: usize = 100_000;

/// Evenly spaced temperatures `start, start + step, …` up to `stop`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureGrid {
    pub start: f64,
    pub stop:  f64,
    pub step:  f64,
}

impl Default for TemperatureGrid {
    fn default() -> Self {
        Self { start: 0.1, stop: 10.0, step: 0.1 }
    }
}

impl TemperatureGrid {
    pub fn validate(&self) -> Result<()> {
        let Self { start, stop, step } = *self;
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(ConfigError::InvalidTemperatureGrid(format!(
                "bounds must be finite (start={start}, stop={stop}, step={step})"
            )));
        }
        if start <= 0.0 {
            return Err(ConfigError::InvalidTemperatureGrid(format!("start must be > 0, got {start}")));
        }
        if step <= 0.0 {
            return Err(ConfigError::InvalidTemperatureGrid(format!("step must be > 0, got {step}")));
        }
        if stop < start {
            return Err(ConfigError::InvalidTemperatureGrid(format!(
                "stop ({stop}) must be >= start ({start})"
            )));
        }
        self.point_count().map(|_| ())
    }

    /// Number of grid points, rejected above `MAX_GRID_POINTS`.
    fn point_count(&self) -> Result<usize> {
        // Tolerance keeps `stop` itself when it lies on the grid.
        let intervals = ((self.stop - self.start) / self.step + 1e-9).floor();
        if !intervals.is_finite() || intervals >= MAX_GRID_POINTS as f64 {
            return Err(ConfigError::InvalidTemperatureGrid(format!(
                "more than {MAX_GRID_POINTS} points (start={}, stop={}, step={})",
                self.start, self.stop, self.step
            )));
        }
        (intervals as usize).checked_add(1).ok_or_else(|| {
            ConfigError::InvalidTemperatureGrid("point count overflows".to_string())
        })
    }

    /// Grid points, computed by index so rounding does not accumulate.
    pub fn temperatures(&self) -> Result<Vec<f64>> {
        self.validate()?;
        let n = self.point_count()?;
        Ok((0..n).map(|i| self.start + i as f64 * self.step).collect())
    }
}

/// Outcome of one chain in a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub temperature: f64,
    /// Magnetization of the final configuration, Σs / size².
    pub final_magnetization: f64,
    /// Post-burn-in averages; `None` when no sample lies past `burn_in`.
    pub summary: Option<Summary>,
}

/// Result of a sweep. Rerunning with `base.with_seed(master_seed)`
/// reproduces `points` exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub master_seed: u64,
    /// One point per grid temperature, ascending.
    pub points: Vec<SweepPoint>,
}

/// Run one independent chain per grid temperature, in parallel.
///
/// Chain `i` is seeded from `(master_seed, i)`, so results do not depend on
/// thread scheduling. Each chain is itself strictly sequential.
pub fn run_sweep(base: &Config, grid: &TemperatureGrid, burn_in: usize) -> Result<Sweep> {
    let temps = grid.temperatures()?;
    base.validate()?;

    let master = base.seed.unwrap_or_else(entropy_seed);
    info!(n_temps = temps.len(), size = base.size, master_seed = master, "starting temperature sweep");

    let points = temps
        .par_iter()
        .enumerate()
        .map(|(idx, &t)| -> Result<SweepPoint> {
            let cfg = base.at_temperature(t);
            let history = Simulation::with_rng(&cfg, stream_rng(master, idx))?.run();
            let final_magnetization = history.last().map_or(0.0, |s| s.magnetization);
            Ok(SweepPoint {
                temperature: t,
                final_magnetization,
                summary: Summary::from_history(&history, burn_in),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Sweep { master_seed: master, points })
}
