//! Multi-octave fractal elevation sampling over a [`NoiseField`].
//!
//! Composites several octaves of coherent noise, each at double the spatial
//! frequency and half the weight of the previous, then normalizes so the
//! result always lands in `[0, 1]` regardless of octave count.

use crate::noise_field::NoiseField;

/// Configuration for the fractal elevation sum.
#[derive(Clone, Debug)]
pub struct FbmParams {
    /// Number of octaves to composite. Must be at least 1.
    pub octaves: u32,
    /// Weight multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Frequency of the first octave, applied to grid coordinates.
    /// Default: 0.0075.
    pub frequency: f64,
    /// Constant offset added to both scaled coordinates before sampling,
    /// shifting the sample window away from the noise origin. Default: 150.
    pub offset: f64,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            frequency: 0.0075,
            offset: 150.0,
        }
    }
}

/// Evaluates fractal elevation at grid coordinates.
///
/// With default parameters this is a 4-octave sum with weights
/// `[1, 0.5, 0.25, 0.125]` at 1x/2x/4x/8x coordinate scale. Each raw octave
/// value is remapped from `[-1, 1]` to `[0, 1]` before weighting, so every
/// contribution is non-negative and the normalized sum stays in `[0, 1]`.
pub struct HeightfieldSampler {
    field: NoiseField,
    params: FbmParams,
}

impl HeightfieldSampler {
    /// Create a sampler over the given field.
    pub fn new(field: NoiseField, params: FbmParams) -> Self {
        Self { field, params }
    }

    /// Sample the elevation at a grid coordinate. Returns a value in `[0, 1]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut total = 0.0;
        let mut weight_sum = 0.0;
        let mut frequency = self.params.frequency;
        let mut weight = 1.0;

        for _ in 0..self.params.octaves {
            let raw = self
                .field
                .sample(x * frequency + self.params.offset, y * frequency + self.params.offset);
            total += (raw * 0.5 + 0.5) * weight;
            weight_sum += weight;

            frequency *= self.params.lacunarity;
            weight *= self.params.persistence;
        }

        total / weight_sum
    }

    /// The seed of the underlying noise field.
    pub fn seed(&self) -> u64 {
        self.field.seed()
    }

    /// The current parameters.
    pub fn params(&self) -> &FbmParams {
        &self.params
    }
}
