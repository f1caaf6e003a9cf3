//! 2D Ising ferromagnet on a periodic lattice, sampled with single-spin-flip
//! Metropolis dynamics.
//!
//! The engine does no I/O: [`run`] validates a [`Config`], runs the chain and
//! returns an in-memory [`History`] for other code to render or export.

pub mod config;
pub mod error;
pub mod lattice;
pub mod energy;
pub mod metropolis;
pub mod observables;
pub mod sampling;
pub mod measure;
pub mod sweep;
pub mod utils;

pub use config::Config;
pub use error::{ConfigError, Result};
pub use lattice::{wrap, Lattice, Snapshot};
pub use observables::Observables;
pub use sampling::{run, run_with_rng, History, Sample, Simulation};
pub use sweep::{run_sweep, Sweep, SweepPoint, TemperatureGrid};
