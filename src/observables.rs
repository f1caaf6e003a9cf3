// observables.rs - Thermodynamic observables of a single configuration

use crate::energy::total_energy;
use crate::lattice::Lattice;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Observables {
    /// Mean signed spin, Σs / size².
    pub magnetization: f64,
    pub heat_capacity: f64,
    pub susceptibility: f64,
}

impl Observables {
    /// Recompute every observable from scratch from the current lattice.
    pub fn measure(lattice: &Lattice, coupling: f64, temperature: f64) -> Self {
        let m_sum = lattice.spin_sum() as f64;
        let energy = total_energy(lattice, coupling);

        Self {
            magnetization: magnetization(lattice),
            heat_capacity: heat_capacity(energy, lattice.size(), temperature),
            susceptibility: susceptibility(m_sum, lattice.size(), temperature),
        }
    }
}

/// Σs / size², always in [-1, 1].
pub fn magnetization(lattice: &Lattice) -> f64 {
    lattice.spin_sum() as f64 / lattice.n_sites() as f64
}

/// `(1/T²) (E²/N − (E/N)²)` with `N = size²` and `E` the doubled-bond
/// total energy.
///
/// Single-configuration fluctuation estimator; not an ensemble average.
pub fn heat_capacity(energy: f64, size: usize, temperature: f64) -> f64 {
    let n = (size * size) as f64;
    (energy * energy / n - (energy / n).powi(2)) / (temperature * temperature)
}

/// `(1/(size·T)) (M²/N − (M/N)²)` with `N = size²` and `M` the raw spin sum.
pub fn susceptibility(m_sum: f64, size: usize, temperature: f64) -> f64 {
    let n = (size * size) as f64;
    (m_sum * m_sum / n - (m_sum / n).powi(2)) / (size as f64 * temperature)
}
