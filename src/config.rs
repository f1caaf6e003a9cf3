// config.rs - Immutable run parameters (single source of truth)

use crate::error::{ConfigError, Result};

/// Parameters fixed before a run starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Edge length of the square lattice.
    pub size:         usize,
    /// Number of single-spin flip attempts.
    pub total_steps:  usize,
    /// Record a sample every `sample_every` attempts.
    pub sample_every: usize,
    pub temperature:  f64,
    /// Nearest-neighbour coupling J (J > 0 is ferromagnetic).
    pub coupling:     f64,
    /// Seed for the engine RNG; drawn from entropy when `None`.
    pub seed:         Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size:         128,
            total_steps:  100_000,
            sample_every: 16,
            temperature:  2.0,
            coupling:     1.0,
            seed:         None,
        }
    }
}

impl Config {
    pub fn new(size: usize, total_steps: usize, sample_every: usize, temperature: f64) -> Self {
        Self {
            size,
            total_steps,
            sample_every,
            temperature,
            coupling: 1.0,
            seed: None,
        }
    }

    pub fn with_coupling(mut self, coupling: f64) -> Self {
        self.coupling = coupling;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Same parameters at a different temperature.
    pub fn at_temperature(&self, temperature: f64) -> Self {
        Self { temperature, ..self.clone() }
    }

    /// Reject any parameter the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.sample_every == 0 {
            return Err(ConfigError::ZeroSamplingInterval);
        }
        // `!(t > 0)` also catches NaN.
        if !(self.temperature > 0.0) || !self.temperature.is_finite() {
            return Err(ConfigError::NonPositiveTemperature(self.temperature));
        }
        if self.coupling == 0.0 {
            return Err(ConfigError::ZeroCoupling);
        }
        if !self.coupling.is_finite() {
            return Err(ConfigError::NonFiniteCoupling(self.coupling));
        }
        Ok(())
    }
}
