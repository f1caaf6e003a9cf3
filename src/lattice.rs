// lattice.rs - Square lattice of ±1 spins with periodic boundaries

use rand::Rng;

/// Map an index onto the torus `[0, size)`.
///
/// Callers only ever pass an in-range index offset by ±1, but any integer
/// is accepted. In-range values are returned unchanged.
#[inline(always)]
pub fn wrap(index: isize, size: usize) -> usize {
    index.rem_euclid(size as isize) as usize
}

/// A `size × size` grid of spins stored row-major. Every cell holds
/// exactly -1 or +1 and the size never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
    spins: Vec<i8>,
}

/// Independent copy of a lattice state, taken at a sampling point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub size: usize,
    pub spins: Vec<i8>,
}

impl Lattice {
    /// Fill every cell independently and uniformly with -1 or +1,
    /// using a caller-supplied RNG.
    pub fn random_with(rng: &mut impl Rng, size: usize) -> Self {
        let spins = (0..size * size)
            .map(|_| if rng.gen::<bool>() { 1 } else { -1 })
            .collect();
        Self { size, spins }
    }

    /// Fully aligned lattice, all +1 if `up`, otherwise all -1.
    pub fn uniform(size: usize, up: bool) -> Self {
        let spin = if up { 1 } else { -1 };
        Self { size, spins: vec![spin; size * size] }
    }

    /// Build from explicit row-major spins. Returns `None` if the length is
    /// not `size²` or any value is not ±1.
    pub fn from_spins(size: usize, spins: Vec<i8>) -> Option<Self> {
        if spins.len() != size * size || spins.iter().any(|&s| s != 1 && s != -1) {
            return None;
        }
        Some(Self { size, spins })
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> i8 {
        self.spins[x * self.size + y]
    }

    /// Spin at `(x + dx, y + dy)` with periodic wrap.
    #[inline(always)]
    pub fn neighbor(&self, x: usize, y: usize, dx: isize, dy: isize) -> i8 {
        let nx = wrap(x as isize + dx, self.size);
        let ny = wrap(y as isize + dy, self.size);
        self.get(nx, ny)
    }

    /// Negate the spin at `(x, y)`. The only mutation a run performs.
    #[inline(always)]
    pub fn flip(&mut self, x: usize, y: usize) {
        let idx = x * self.size + y;
        self.spins[idx] = -self.spins[idx];
    }

    /// Raw sum of all spins.
    pub fn spin_sum(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot { size: self.size, spins: self.spins.clone() }
    }
}

impl Snapshot {
    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> i8 {
        self.spins[x * self.size + y]
    }

    /// Iterate over lattice rows.
    pub fn rows(&self) -> impl Iterator<Item = &[i8]> + '_ {
        // chunks(0) panics; a snapshot always has size >= 1.
        self.spins.chunks(self.size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_wrap_edges() {
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(5, 5), 0);
        assert_eq!(wrap(3, 5), 3);
    }

    #[test]
    fn test_wrap_idempotent_and_bijective() {
        for size in 1..8usize {
            let mut seen = vec![false; size];
            for i in 0..size {
                let w = wrap(i as isize, size);
                assert_eq!(w, i);
                assert_eq!(wrap(w as isize, size), w);
                seen[w] = true;
            }
            assert!(seen.iter().all(|&s| s));

            // ±1 shifts are permutations of [0, size).
            for shift in [-1isize, 1] {
                let mut hit = vec![false; size];
                for i in 0..size {
                    hit[wrap(i as isize + shift, size)] = true;
                }
                assert!(hit.iter().all(|&h| h), "shift {shift} not bijective at size {size}");
            }
        }
    }

    #[test]
    fn test_size_one_is_self_periodic() {
        assert_eq!(wrap(-1, 1), 0);
        assert_eq!(wrap(1, 1), 0);
        let lat = Lattice::uniform(1, false);
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            assert_eq!(lat.neighbor(0, 0, dx, dy), -1);
        }
    }

    #[test]
    fn test_random_init_only_plus_minus_one() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let lat = Lattice::random_with(&mut rng, 16);
        assert_eq!(lat.n_sites(), 256);
        assert!(lat.spins().iter().all(|&s| s == 1 || s == -1));
        // Both values show up on a 256-site lattice.
        assert!(lat.spins().contains(&1) && lat.spins().contains(&-1));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut lat = Lattice::uniform(3, true);
        let snap = lat.snapshot();
        lat.flip(1, 2);
        assert_eq!(lat.get(1, 2), -1);
        assert_eq!(snap.get(1, 2), 1);
        assert_eq!(snap.rows().count(), 3);
    }

    #[test]
    fn test_from_spins_rejects_bad_values() {
        assert!(Lattice::from_spins(2, vec![1, -1, 1, -1]).is_some());
        assert!(Lattice::from_spins(2, vec![1, 0, 1, -1]).is_none());
        assert!(Lattice::from_spins(2, vec![1, -1, 1]).is_none());
    }
}
