//! Cell classification for marching squares.

/// The four corner elevations of one grid cell, named by compass position.
///
/// ```text
/// NW(a) ---- NE(b)
///  |           |
/// SW(d) ---- SE(c)
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CellCorners {
    /// North-west corner (bit 8).
    pub nw: f64,
    /// North-east corner (bit 4).
    pub ne: f64,
    /// South-east corner (bit 2).
    pub se: f64,
    /// South-west corner (bit 1).
    pub sw: f64,
}

impl CellCorners {
    /// The 4-bit topology code for this cell at `threshold`.
    ///
    /// One bit per corner, set when that corner's elevation is strictly
    /// above the threshold: NW=8, NE=4, SE=2, SW=1.
    pub fn topology_code(&self, threshold: f64) -> u8 {
        let mut code = 0;
        if self.nw > threshold {
            code |= 8;
        }
        if self.ne > threshold {
            code |= 4;
        }
        if self.se > threshold {
            code |= 2;
        }
        if self.sw > threshold {
            code |= 1;
        }
        code
    }
}

/// Fraction along an edge from `from` to `to` at which `threshold` crosses.
///
/// Clamped to `[0, 1]`; a degenerate edge with zero elevation delta yields
/// the midpoint 0.5. Both guards only ever fire for edges the topology code
/// does not consume, so they never move a real crossing point.
#[inline]
pub fn crossing_fraction(from: f64, to: f64, threshold: f64) -> f64 {
    let delta = to - from;
    if delta == 0.0 {
        return 0.5;
    }
    ((threshold - from) / delta).clamp(0.0, 1.0)
}
