// measure.rs - Aggregate statistics over a recorded history

use crate::sampling::History;

/// Welford online stats.
#[derive(Debug, Default, Clone)]
pub struct OnlineStats {
    n:    u64,
    mean: f64,
    m2:   f64,
}

impl OnlineStats {
    pub fn push(&mut self, x: f64) {
        self.n += 1;
        let delta  = x - self.mean;
        self.mean += delta / self.n as f64;
        let delta2 = x - self.mean;
        self.m2   += delta * delta2;
    }
    pub fn count(&self) -> u64 { self.n }
    pub fn mean(&self) -> f64 { self.mean }
    /// Unbiased sample variance; 0 with fewer than two values.
    pub fn var(&self)  -> f64 { if self.n > 1 { self.m2 / (self.n - 1) as f64 } else { 0.0 } }
    pub fn std(&self)  -> f64 { self.var().sqrt() }
}

/// Time averages of the per-sample observables after equilibration.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub n_samples:          usize,
    pub mean_magnetization: f64,
    pub std_magnetization:  f64,
    pub mean_abs_magnetization: f64,
    pub mean_heat_capacity: f64,
    pub mean_susceptibility: f64,
}

impl Summary {
    /// Average every sample with `step > burn_in`. `None` if none qualify.
    pub fn from_history(history: &History, burn_in: usize) -> Option<Self> {
        let mut m     = OnlineStats::default();
        let mut abs_m = OnlineStats::default();
        let mut c     = OnlineStats::default();
        let mut chi   = OnlineStats::default();

        for s in history.iter().filter(|s| s.step > burn_in) {
            m.push(s.magnetization);
            abs_m.push(s.magnetization.abs());
            c.push(s.heat_capacity);
            chi.push(s.susceptibility);
        }

        if m.count() == 0 {
            return None;
        }

        Some(Self {
            n_samples:              m.count() as usize,
            mean_magnetization:     m.mean(),
            std_magnetization:      m.std(),
            mean_abs_magnetization: abs_m.mean(),
            mean_heat_capacity:     c.mean(),
            mean_susceptibility:    chi.mean(),
        })
    }
}
