//! Dense per-frame elevation grid.

use tracing::debug;

use crate::heightfield::HeightfieldSampler;

/// A dense 2D grid of normalized elevation samples in `[0, 1]`.
///
/// Row-major, indexed `[row][col]`, with `cols` and `rows` both at least 2 so
/// the grid contains at least one cell. The maximum sampled elevation is
/// tracked during construction; it bounds the contour threshold sequence.
pub struct ElevationGrid {
    cols: usize,
    rows: usize,
    samples: Vec<f64>,
    max_elevation: f64,
}

impl ElevationGrid {
    /// Sample the full grid from `sampler`.
    ///
    /// Evaluates `cols * rows` fractal samples. Callers guarantee
    /// `cols >= 2` and `rows >= 2` (enforced by config validation).
    pub fn build(sampler: &HeightfieldSampler, cols: usize, rows: usize) -> Self {
        debug_assert!(cols >= 2 && rows >= 2, "grid needs at least one cell");

        let mut samples = Vec::with_capacity(cols * rows);
        let mut max_elevation = 0.0_f64;

        for row in 0..rows {
            for col in 0..cols {
                let elevation = sampler.sample(col as f64, row as f64);
                if elevation > max_elevation {
                    max_elevation = elevation;
                }
                samples.push(elevation);
            }
        }

        debug!(cols, rows, max_elevation, "sampled elevation grid");

        Self {
            cols,
            rows,
            samples,
            max_elevation,
        }
    }

    /// Build a grid directly from row-major sample data.
    ///
    /// Each inner vec is one row; all rows must have equal length. Intended
    /// for fixtures and hosts that bring their own elevation data.
    pub fn from_samples(rows_data: Vec<Vec<f64>>) -> Self {
        let rows = rows_data.len();
        let cols = rows_data.first().map(Vec::len).unwrap_or(0);
        debug_assert!(cols >= 2 && rows >= 2, "grid needs at least one cell");
        debug_assert!(
            rows_data.iter().all(|r| r.len() == cols),
            "all rows must have equal length"
        );

        let mut samples = Vec::with_capacity(cols * rows);
        let mut max_elevation = 0.0_f64;
        for row in rows_data {
            for elevation in row {
                if elevation > max_elevation {
                    max_elevation = elevation;
                }
                samples.push(elevation);
            }
        }

        Self {
            cols,
            rows,
            samples,
            max_elevation,
        }
    }

    /// Number of columns (samples per row).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The elevation sample at `[row][col]`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.samples[row * self.cols + col]
    }

    /// The maximum elevation observed while sampling this grid.
    pub fn max_elevation(&self) -> f64 {
        self.max_elevation
    }
}
