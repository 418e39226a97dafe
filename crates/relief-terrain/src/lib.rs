//! Heightfield synthesis: seeded coherent noise, fractal elevation sampling,
//! and the per-frame elevation grid.

mod grid;
mod heightfield;
mod noise_field;

pub use grid::ElevationGrid;
pub use heightfield::{FbmParams, HeightfieldSampler};
pub use noise_field::NoiseField;
