//! Seeded pseudo-random stream.
//!
//! Every kernel that needs randomness takes a `&mut SeededRng`; nothing in
//! this crate touches thread-local or OS entropy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use grimoire_shared::Vec3;

use crate::noise::Seed;

/// Deterministic random stream backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    /// Creates a stream from a seed.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed.value()),
        }
    }

    /// Uniform in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Uniform in [min, max). Returns `min` for an empty range.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.inner.gen_range(min..max)
        } else {
            min
        }
    }

    /// Uniform in [-1, 1).
    pub fn signed(&mut self) -> f32 {
        self.range(-1.0, 1.0)
    }

    /// True with probability `p` (clamped to [0, 1]).
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p.clamp(0.0, 1.0)
    }

    /// Uniform integer in [min, max].
    pub fn count(&mut self, min: u32, max: u32) -> u32 {
        if max > min {
            self.inner.gen_range(min..=max)
        } else {
            min
        }
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len.max(1))
    }

    /// Random vector with components in [-1, 1).
    pub fn signed_vec3(&mut self) -> Vec3 {
        Vec3::new(self.signed(), self.signed(), self.signed())
    }
}
