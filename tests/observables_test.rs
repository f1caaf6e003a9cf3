use approx::assert_relative_eq;
use ising::energy::total_energy;
use ising::lattice::Lattice;
use ising::observables::{heat_capacity, magnetization, susceptibility, Observables};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn test_aligned_lattice_observables() {
    let lat = Lattice::uniform(4, true);
    let obs = Observables::measure(&lat, 1.0, 2.0);

    assert_eq!(obs.magnetization, 1.0);
    // E = -64 (doubled bonds), N = 16: (4096/16 - 16) / 4
    assert_relative_eq!(obs.heat_capacity, 60.0, epsilon = 1e-12);
    // M = 16: (256/16 - 1) / (4 · 2)
    assert_relative_eq!(obs.susceptibility, 1.875, epsilon = 1e-12);

    let down = Observables::measure(&Lattice::uniform(4, false), 1.0, 2.0);
    assert_eq!(down.magnetization, -1.0);
    assert_relative_eq!(down.susceptibility, obs.susceptibility, epsilon = 1e-12);
}

#[test]
fn test_checkerboard_has_zero_magnetization() {
    let size = 6;
    let spins = (0..size * size)
        .map(|i| if (i / size + i % size) % 2 == 0 { 1 } else { -1 })
        .collect();
    let lat = Lattice::from_spins(size, spins).unwrap();
    let obs = Observables::measure(&lat, 1.0, 1.0);

    assert_eq!(obs.magnetization, 0.0);
    assert_eq!(obs.susceptibility, 0.0);
    assert_eq!(total_energy(&lat, 1.0), 4.0 * 36.0);
}

#[test]
fn test_single_site_fluctuations_vanish() {
    for (up, m) in [(true, 1.0), (false, -1.0)] {
        let obs = Observables::measure(&Lattice::uniform(1, up), 1.0, 0.7);
        assert_eq!(obs.magnetization, m);
        assert_relative_eq!(obs.heat_capacity, 0.0, epsilon = 1e-12);
        assert_relative_eq!(obs.susceptibility, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_formula_normalisations() {
    // size 3 → N = 9
    assert_relative_eq!(heat_capacity(-18.0, 3, 1.5), (324.0 / 9.0 - 4.0) / 2.25, epsilon = 1e-12);
    assert_relative_eq!(susceptibility(5.0, 3, 2.0), (25.0 / 9.0 - 25.0 / 81.0) / 6.0, epsilon = 1e-12);
}

#[test]
fn test_magnetization_in_range_for_random_lattices() {
    for seed in 0..20u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let lat = Lattice::random_with(&mut rng, 7);
        let m = magnetization(&lat);
        assert!((-1.0..=1.0).contains(&m));
        assert_relative_eq!(m, lat.spin_sum() as f64 / 49.0);
    }
}
