use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Engine RNG for a single chain.
pub fn chain_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Fresh seed from the thread RNG, for runs without a configured seed.
pub fn entropy_seed() -> u64 {
    rand::thread_rng().next_u64()
}

/// SplitMix64 finaliser of `master` and `stream`: one deterministic,
/// decorrelated seed per stream.
pub fn stream_seed(master: u64, stream: usize) -> u64 {
    let mut x = master ^ (stream as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Per-stream deterministic RNG
pub fn stream_rng(master: u64, stream: usize) -> ChaCha20Rng {
    chain_rng(stream_seed(master, stream))
}
