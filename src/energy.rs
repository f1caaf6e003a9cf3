// energy.rs - Nearest-neighbour bond energy on the periodic lattice

use crate::lattice::Lattice;

/// Sum of the four periodic neighbours of `(x, y)`.
#[inline(always)]
pub fn neighbor_sum(lattice: &Lattice, x: usize, y: usize) -> i32 {
    lattice.neighbor(x, y, -1, 0) as i32
        + lattice.neighbor(x, y, 1, 0) as i32
        + lattice.neighbor(x, y, 0, -1) as i32
        + lattice.neighbor(x, y, 0, 1) as i32
}

/// `-J s(x,y) Σ_nn s`: contribution of site `(x, y)` to the lattice energy.
#[inline(always)]
pub fn local_energy(lattice: &Lattice, coupling: f64, x: usize, y: usize) -> f64 {
    let s = lattice.get(x, y) as i32;
    -coupling * (s * neighbor_sum(lattice, x, y)) as f64
}

/// Energy change from flipping `(x, y)`.
///
/// Flipping negates the site's local energy, so ΔE = -2 E_local.
#[inline(always)]
pub fn flip_delta(lattice: &Lattice, coupling: f64, x: usize, y: usize) -> f64 {
    -2.0 * local_energy(lattice, coupling, x, y)
}

/// Σ local_energy over every site.
///
/// Every bond is counted from both ends, so this is twice the usual
/// Hamiltonian. Heat capacity is defined against this doubled sum.
pub fn total_energy(lattice: &Lattice, coupling: f64) -> f64 {
    let n = lattice.size();
    let mut e = 0.0;
    for x in 0..n {
        for y in 0..n {
            e += local_energy(lattice, coupling, x, y);
        }
    }
    e
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_lattice_energy() {
        let lat = Lattice::uniform(4, true);
        assert_eq!(local_energy(&lat, 1.0, 2, 3), -4.0);
        // 16 sites × -4, doubled-bond convention.
        assert_eq!(total_energy(&lat, 1.0), -64.0);
        assert_eq!(flip_delta(&lat, 1.0, 0, 0), 8.0);
    }

    #[test]
    fn test_coupling_sign_and_scale() {
        let lat = Lattice::uniform(3, false);
        assert_eq!(local_energy(&lat, -0.5, 1, 1), 2.0);
        assert_eq!(local_energy(&lat, 2.0, 0, 0), -8.0);
    }

    #[test]
    fn test_wraps_at_corner() {
        // Only the far corner is down; it neighbours (0,0) through both seams.
        let mut spins = vec![1i8; 9];
        spins[8] = -1;
        let lat = Lattice::from_spins(3, spins).unwrap();
        // (0,0) neighbours: (2,0)=+1, (1,0)=+1, (0,2)=+1, (0,1)=+1
        assert_eq!(neighbor_sum(&lat, 0, 0), 4);
        // (2,2) neighbours: (1,2), (0,2), (2,1), (2,0), all +1
        assert_eq!(neighbor_sum(&lat, 2, 2), 4);
        assert_eq!(local_energy(&lat, 1.0, 2, 2), 4.0);
        // (0,2) sees (2,2) above it through the seam.
        assert_eq!(neighbor_sum(&lat, 0, 2), 2);
    }

    #[test]
    fn test_size_one_sees_itself() {
        let lat = Lattice::uniform(1, true);
        assert_eq!(local_energy(&lat, 1.0, 0, 0), -4.0);
        assert_eq!(total_energy(&lat, 1.0), -4.0);
    }
}
