// sampling.rs - Drives the Metropolis chain and records the sample history

use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::lattice::{Lattice, Snapshot};
use crate::metropolis::metropolis_step;
use crate::observables::Observables;
use crate::utils::rng::{chain_rng, entropy_seed};

/// One recorded point of the trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub step: usize,
    pub magnetization: f64,
    pub heat_capacity: f64,
    pub susceptibility: f64,
    /// Owned copy of the lattice; never aliases the live one.
    pub snapshot: Snapshot,
}

/// Samples in ascending step order, starting with step 0.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    seed: Option<u64>,
    size: usize,
    temperature: f64,
    steps_run: usize,
    accepted: usize,
    interrupted: bool,
    samples: Vec<Sample>,
}

impl History {
    fn new(config: &Config, seed: Option<u64>) -> Self {
        let capacity = config.total_steps / config.sample_every + 1;
        Self {
            seed,
            size: config.size,
            temperature: config.temperature,
            steps_run: 0,
            accepted: 0,
            interrupted: false,
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Seed of the engine RNG, `None` if the caller injected its own RNG.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn steps(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.step).collect()
    }

    pub fn magnetizations(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.magnetization).collect()
    }

    /// Lattice state after the last recorded sample.
    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.samples.last().map(|s| &s.snapshot)
    }

    /// Flip attempts actually executed.
    pub fn steps_run(&self) -> usize {
        self.steps_run
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.steps_run == 0 {
            0.0
        } else {
            self.accepted as f64 / self.steps_run as f64
        }
    }

    /// True if the run stopped early on request.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Owns the live lattice and the RNG for one run.
pub struct Simulation<R: Rng = ChaCha20Rng> {
    config: Config,
    seed: Option<u64>,
    lattice: Lattice,
    rng: R,
}

impl Simulation<ChaCha20Rng> {
    /// Validate `config` and build a seeded simulation. Without a configured
    /// seed one is drawn from entropy and kept on the History.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = entropy_seed();
                info!(seed, "no seed configured, drew one from entropy");
                seed
            }
        };
        let mut sim = Self::with_rng(config, chain_rng(seed))?;
        sim.seed = Some(seed);
        Ok(sim)
    }
}

impl<R: Rng> Simulation<R> {
    /// Build with a caller-supplied RNG. The same RNG initialises the
    /// lattice and drives every step.
    pub fn with_rng(config: &Config, mut rng: R) -> Result<Self> {
        config.validate()?;
        let lattice = Lattice::random_with(&mut rng, config.size);
        Ok(Self {
            config: config.clone(),
            seed: None,
            lattice,
            rng,
        })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    fn sample(&self, step: usize) -> Sample {
        let obs = Observables::measure(&self.lattice, self.config.coupling, self.config.temperature);
        Sample {
            step,
            magnetization: obs.magnetization,
            heat_capacity: obs.heat_capacity,
            susceptibility: obs.susceptibility,
            snapshot: self.lattice.snapshot(),
        }
    }

    /// Run every configured step and return the complete history.
    pub fn run(self) -> History {
        let never = AtomicBool::new(false);
        self.run_until(&never, |_| {})
    }

    /// Run until done or until `stop` is observed at a sampling boundary.
    ///
    /// `stop` is only checked right after a sample is recorded, so the
    /// history always ends on a complete sample. `on_sample` sees each
    /// sample as it is recorded.
    pub fn run_until(mut self, stop: &AtomicBool, mut on_sample: impl FnMut(&Sample)) -> History {
        let Config { size, total_steps, sample_every, temperature, coupling, .. } = self.config;
        info!(size, total_steps, sample_every, temperature, coupling, seed = ?self.seed, "starting run");

        let mut history = History::new(&self.config, self.seed);

        let first = self.sample(0);
        on_sample(&first);
        history.samples.push(first);

        if total_steps > 0 && stop.load(Ordering::Relaxed) {
            warn!(step = 0, "run interrupted before the first step");
            history.interrupted = true;
            return history;
        }

        for step in 1..=total_steps {
            let info = metropolis_step(&mut self.lattice, coupling, temperature, &mut self.rng);
            if info.accepted {
                history.accepted += 1;
            }
            history.steps_run = step;

            if step % sample_every == 0 {
                let sample = self.sample(step);
                debug!(step, magnetization = sample.magnetization, "sample recorded");
                on_sample(&sample);
                history.samples.push(sample);

                if step < total_steps && stop.load(Ordering::Relaxed) {
                    warn!(step, "run interrupted at sampling boundary");
                    history.interrupted = true;
                    break;
                }
            }
        }

        info!(
            samples = history.len(),
            acceptance_rate = history.acceptance_rate(),
            "run complete"
        );
        history
    }
}

/// Validate `config`, run the whole chain, return its history.
pub fn run(config: &Config) -> Result<History> {
    Ok(Simulation::new(config)?.run())
}

/// As `run`, with an injected random source.
pub fn run_with_rng<R: Rng>(config: &Config, rng: R) -> Result<History> {
    Ok(Simulation::with_rng(config, rng)?.run())
}
