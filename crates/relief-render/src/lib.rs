//! Per-frame driver for the topographic-map core: builds the elevation grid,
//! emits the water mask, and sweeps the ascending threshold sequence through
//! the contour extractor.

mod frame;
mod renderer;

pub use frame::{FrameGeometry, thresholds};
pub use renderer::{RenderParams, TerrainRenderer};
