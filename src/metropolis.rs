// metropolis.rs - Single-spin-flip Metropolis update

use crate::energy::flip_delta;
use crate::lattice::Lattice;
use rand::Rng;

/// Returned by `metropolis_step`, lets the driver keep acceptance counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInfo {
    pub x: usize,
    pub y: usize,
    pub delta_e: f64,
    pub accepted: bool,
}

/// Boltzmann factor `exp(-ΔE / T)`, clamped to 1 for ΔE ≤ 0.
#[inline(always)]
pub fn acceptance_probability(delta_e: f64, temperature: f64) -> f64 {
    if delta_e <= 0.0 {
        1.0
    } else {
        (-delta_e / temperature).exp()
    }
}

/// Metropolis rule. Downhill and flat moves are taken without consulting
/// the RNG; uphill moves draw one uniform value in [0, 1).
#[inline(always)]
pub fn accept(delta_e: f64, temperature: f64, rng: &mut impl Rng) -> bool {
    if delta_e <= 0.0 {
        true
    } else {
        (-delta_e / temperature).exp() > rng.gen::<f64>()
    }
}

/// Propose a uniformly random site, flip it if the Metropolis rule accepts.
///
/// Draw order per step: row, column, then (only when ΔE > 0) the acceptance
/// variate. Replays depend on this order.
pub fn metropolis_step(
    lattice: &mut Lattice,
    coupling: f64,
    temperature: f64,
    rng: &mut impl Rng,
) -> StepInfo {
    let size = lattice.size();
    let x = rng.gen_range(0..size);
    let y = rng.gen_range(0..size);

    let delta_e = flip_delta(lattice, coupling, x, y);
    let accepted = accept(delta_e, temperature, rng);
    if accepted {
        lattice.flip(x, y);
    }

    StepInfo { x, y, delta_e, accepted }
}
