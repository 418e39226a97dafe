//! Geometry output of a single marching-squares pass.

use glam::Vec3;

/// Contour and fill geometry for one isoline threshold.
///
/// Segments trace the isoline; triangles fill the band above it. Both are
/// unordered collections of world-space vertices, consumed by the
/// presentation layer and discarded after the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ContourLayer {
    /// The threshold this layer was extracted at.
    pub threshold: f64,
    /// Isoline segments, two endpoints each.
    pub segments: Vec<[Vec3; 2]>,
    /// Fill triangles covering the above-threshold portion of each cell.
    pub triangles: Vec<[Vec3; 3]>,
}

impl ContourLayer {
    /// Creates an empty layer for the given threshold.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            segments: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Pushes one isoline segment.
    #[inline]
    pub fn push_segment(&mut self, a: Vec3, b: Vec3) {
        self.segments.push([a, b]);
    }

    /// Pushes one fill triangle.
    #[inline]
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        self.triangles.push([a, b, c]);
    }

    /// Number of isoline segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of fill triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when the pass emitted no geometry at all.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.triangles.is_empty()
    }
}
