//! Frame output and the threshold sequence.

use glam::Vec3;
use relief_contour::ContourLayer;

/// The geometry produced by one frame pass.
///
/// Layers are ordered lowest threshold first; the presentation layer draws
/// them back to front so higher bands overdraw lower ones. Everything here
/// is transient and rebuilt on the next call.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameGeometry {
    /// Stride-2 subsample of below-sea-level grid points, at sea-level z.
    pub water_points: Vec<Vec3>,
    /// One contour + fill layer per threshold, ascending.
    pub layers: Vec<ContourLayer>,
}

impl FrameGeometry {
    /// Total isoline segments across all layers.
    pub fn total_segments(&self) -> usize {
        self.layers.iter().map(ContourLayer::segment_count).sum()
    }

    /// Total fill triangles across all layers.
    pub fn total_triangles(&self) -> usize {
        self.layers.iter().map(ContourLayer::triangle_count).sum()
    }
}

/// The ascending isoline threshold sequence for one frame.
///
/// Yields `land_threshold + i * isoline_inc` for `i = 0, 1, ...` while the
/// value stays at or below `max_elevation`. Computed by index rather than by
/// repeated addition, so the sequence length is exactly
/// `floor((max_elevation - land_threshold) / isoline_inc) + 1`, or zero when
/// the noise never reached the land threshold.
pub fn thresholds(
    land_threshold: f64,
    max_elevation: f64,
    isoline_inc: f64,
) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(move |i| land_threshold + i as f64 * isoline_inc)
        .take_while(move |t| *t <= max_elevation)
}
