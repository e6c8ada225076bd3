//! Deterministic random number generation.
//!
//! The engine's only randomness is the library shuffle, reseeded on every
//! episode reset, so a (seed, action trace) pair fully reproduces a game.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG for shuffles.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
