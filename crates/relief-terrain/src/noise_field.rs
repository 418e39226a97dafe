//! Seeded 2D coherent-noise field.

use noise::{NoiseFn, OpenSimplex};

/// A seeded 2D coherent-noise function.
///
/// Pure and stateless given a seed: the same `(seed, x, y)` triple always
/// produces the same value, and nearby inputs produce nearby outputs.
/// Callers pre-scale coordinates by whatever frequency they need.
pub struct NoiseField {
    noise: OpenSimplex,
    seed: u64,
}

impl NoiseField {
    /// Create a new field from a 64-bit seed.
    ///
    /// The underlying generator takes a 32-bit seed, so the high bits are
    /// truncated; two seeds that agree in their low 32 bits produce the
    /// same field.
    pub fn new(seed: u64) -> Self {
        Self {
            noise: OpenSimplex::new(seed as u32),
            seed,
        }
    }

    /// The seed this field was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sample the field at `(x, y)`. Returns a value in `[-1, 1]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise.get([x, y])
    }
}
