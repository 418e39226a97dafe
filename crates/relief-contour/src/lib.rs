//! Contour and fill extraction: a marching-squares sweep over an elevation
//! grid, one pass per isoline threshold.

mod cell;
mod extract;
mod geometry;

pub use cell::{CellCorners, crossing_fraction};
pub use extract::{ExtractParams, extract};
pub use geometry::ContourLayer;
