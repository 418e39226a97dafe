//! Marching-squares extraction of one isoline threshold.
//!
//! <https://en.wikipedia.org/wiki/Marching_squares>

use glam::{Vec2, Vec3};
use relief_terrain::ElevationGrid;

use crate::cell::{CellCorners, crossing_fraction};
use crate::geometry::ContourLayer;

/// Geometric parameters of an extraction pass.
#[derive(Clone, Debug)]
pub struct ExtractParams {
    /// World-space distance between adjacent grid samples.
    pub spacing: f32,
    /// World-space position of sample `(0, 0)`; the usual choice centers the
    /// grid on the origin.
    pub origin: Vec2,
    /// Multiplier mapping a threshold in `[0, 1]` to a z height.
    pub elevation_scale: f32,
    /// Constant z offset added after scaling.
    pub vertical_bias: f32,
    /// How far below its contour line a fill renders, to keep the outline on
    /// top without z-fighting.
    pub fill_drop: f32,
    /// Fully-covered cells (code 15) re-fill only when the NW corner is
    /// within this distance of the threshold; everything further from the
    /// band edge was already filled by a lower threshold's pass.
    pub cover_epsilon: f64,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            spacing: 4.0,
            origin: Vec2::new(-1000.0, -1000.0),
            elevation_scale: 200.0,
            vertical_bias: 0.0,
            fill_drop: 1.5,
            cover_epsilon: 0.025,
        }
    }
}

/// Runs one marching-squares pass over `grid` at `threshold`.
///
/// Pure function of its inputs: no shared state, so thresholds may be
/// extracted in any order or concurrently. Each cell is classified by its
/// 4-bit topology code and contributes at most two isoline segments and at
/// most four fill triangles. The two saddle codes (5 and 10) are always
/// resolved as fully connected: one four-point loop and a four-triangle fan,
/// never two separate diagonal strips.
pub fn extract(grid: &ElevationGrid, threshold: f64, params: &ExtractParams) -> ContourLayer {
    let mut layer = ContourLayer::new(threshold);

    let s = params.spacing;
    let contour_z = threshold as f32 * params.elevation_scale + params.vertical_bias;
    let fill_z = contour_z - params.fill_drop;

    for row in 0..grid.rows() - 1 {
        for col in 0..grid.cols() - 1 {
            let x = params.origin.x + col as f32 * s;
            let y = params.origin.y + row as f32 * s;

            let cell = CellCorners {
                nw: grid.get(row, col),
                ne: grid.get(row, col + 1),
                se: grid.get(row + 1, col + 1),
                sw: grid.get(row + 1, col),
            };

            let code = cell.topology_code(threshold);
            if code == 0 {
                continue;
            }

            // Edge crossings, one per cell edge. Only the crossings the
            // matched case consumes carry meaning.
            let top = Vec2::new(
                x + s * crossing_fraction(cell.nw, cell.ne, threshold) as f32,
                y,
            );
            let right = Vec2::new(
                x + s,
                y + s * crossing_fraction(cell.ne, cell.se, threshold) as f32,
            );
            let bottom = Vec2::new(
                x + s * crossing_fraction(cell.sw, cell.se, threshold) as f32,
                y + s,
            );
            let left = Vec2::new(
                x,
                y + s * crossing_fraction(cell.nw, cell.sw, threshold) as f32,
            );

            let nw_p = Vec2::new(x, y);
            let ne_p = Vec2::new(x + s, y);
            let se_p = Vec2::new(x + s, y + s);
            let sw_p = Vec2::new(x, y + s);

            let line = |p: Vec2| Vec3::new(p.x, p.y, contour_z);
            let fill = |p: Vec2| Vec3::new(p.x, p.y, fill_z);

            match code {
                // Single land corner: one crossing-to-crossing segment and a
                // corner triangle.
                1 => {
                    layer.push_triangle(fill(bottom), fill(left), fill(sw_p));
                    layer.push_segment(line(bottom), line(left));
                }
                2 => {
                    layer.push_triangle(fill(right), fill(bottom), fill(se_p));
                    layer.push_segment(line(right), line(bottom));
                }
                3 => {
                    layer.push_triangle(fill(right), fill(left), fill(sw_p));
                    layer.push_triangle(fill(sw_p), fill(se_p), fill(right));
                    layer.push_segment(line(right), line(left));
                }
                4 => {
                    layer.push_triangle(fill(top), fill(right), fill(ne_p));
                    layer.push_segment(line(top), line(right));
                }
                // Saddle, NE + SW above: treat as connected, one four-point
                // loop and a fan over the whole land portion.
                5 => {
                    layer.push_triangle(fill(top), fill(right), fill(ne_p));
                    layer.push_triangle(fill(bottom), fill(left), fill(sw_p));
                    layer.push_triangle(fill(bottom), fill(left), fill(top));
                    layer.push_triangle(fill(bottom), fill(right), fill(top));
                    layer.push_segment(line(top), line(left));
                    layer.push_segment(line(right), line(bottom));
                }
                6 => {
                    layer.push_triangle(fill(top), fill(bottom), fill(se_p));
                    layer.push_triangle(fill(top), fill(ne_p), fill(se_p));
                    layer.push_segment(line(top), line(bottom));
                }
                7 => {
                    layer.push_triangle(fill(top), fill(ne_p), fill(se_p));
                    layer.push_triangle(fill(left), fill(sw_p), fill(se_p));
                    layer.push_triangle(fill(top), fill(left), fill(se_p));
                    layer.push_segment(line(top), line(left));
                }
                8 => {
                    layer.push_triangle(fill(top), fill(left), fill(nw_p));
                    layer.push_segment(line(top), line(left));
                }
                9 => {
                    layer.push_triangle(fill(nw_p), fill(top), fill(bottom));
                    layer.push_triangle(fill(nw_p), fill(sw_p), fill(bottom));
                    layer.push_segment(line(top), line(bottom));
                }
                // Saddle, NW + SE above: same connected resolution as code 5.
                10 => {
                    layer.push_triangle(fill(nw_p), fill(top), fill(left));
                    layer.push_triangle(fill(right), fill(bottom), fill(se_p));
                    layer.push_triangle(fill(right), fill(bottom), fill(left));
                    layer.push_triangle(fill(top), fill(right), fill(left));
                    layer.push_segment(line(top), line(right));
                    layer.push_segment(line(bottom), line(left));
                }
                11 => {
                    layer.push_triangle(fill(nw_p), fill(top), fill(sw_p));
                    layer.push_triangle(fill(right), fill(se_p), fill(sw_p));
                    layer.push_triangle(fill(top), fill(right), fill(sw_p));
                    layer.push_segment(line(top), line(right));
                }
                12 => {
                    layer.push_triangle(fill(nw_p), fill(ne_p), fill(right));
                    layer.push_triangle(fill(nw_p), fill(left), fill(right));
                    layer.push_segment(line(right), line(left));
                }
                13 => {
                    layer.push_triangle(fill(nw_p), fill(ne_p), fill(right));
                    layer.push_triangle(fill(nw_p), fill(sw_p), fill(bottom));
                    layer.push_triangle(fill(right), fill(bottom), fill(nw_p));
                    layer.push_segment(line(right), line(bottom));
                }
                14 => {
                    layer.push_triangle(fill(left), fill(nw_p), fill(ne_p));
                    layer.push_triangle(fill(bottom), fill(ne_p), fill(se_p));
                    layer.push_triangle(fill(bottom), fill(left), fill(ne_p));
                    layer.push_segment(line(bottom), line(left));
                }
                // Fully covered: a lower threshold already filled this cell
                // unless it sits right at the band edge.
                _ => {
                    if (threshold - cell.nw).abs() < params.cover_epsilon {
                        layer.push_triangle(fill(nw_p), fill(ne_p), fill(se_p));
                        layer.push_triangle(fill(nw_p), fill(sw_p), fill(se_p));
                    }
                }
            }
        }
    }

    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    const HI: f64 = 0.9;
    const LO: f64 = 0.1;
    const THRESHOLD: f64 = 0.5;

    fn unit_params() -> ExtractParams {
        ExtractParams {
            spacing: 1.0,
            origin: Vec2::ZERO,
            elevation_scale: 1.0,
            vertical_bias: 0.0,
            fill_drop: 0.5,
            cover_epsilon: 0.025,
        }
    }

    /// One-cell grid whose corner pattern encodes `code` (NW=8, NE=4, SE=2, SW=1).
    fn cell_grid(code: u8) -> ElevationGrid {
        let nw = if code & 8 != 0 { HI } else { LO };
        let ne = if code & 4 != 0 { HI } else { LO };
        let se = if code & 2 != 0 { HI } else { LO };
        let sw = if code & 1 != 0 { HI } else { LO };
        ElevationGrid::from_samples(vec![vec![nw, ne], vec![sw, se]])
    }

    #[test]
    fn test_topology_completeness_segment_counts() {
        for code in 0u8..16 {
            let layer = extract(&cell_grid(code), THRESHOLD, &unit_params());
            let expected = match code {
                0 | 15 => 0,
                5 | 10 => 2,
                _ => 1,
            };
            assert_eq!(
                layer.segment_count(),
                expected,
                "Code {code}: expected {expected} segments, got {}",
                layer.segment_count()
            );
        }
    }

    #[test]
    fn test_topology_completeness_triangle_counts() {
        let expected = [0, 1, 1, 2, 1, 4, 2, 3, 1, 2, 4, 3, 2, 3, 3, 0];
        for code in 0u8..16 {
            let layer = extract(&cell_grid(code), THRESHOLD, &unit_params());
            assert_eq!(
                layer.triangle_count(),
                expected[code as usize],
                "Code {code}: expected {} fill triangles",
                expected[code as usize]
            );
        }
    }

    #[test]
    fn test_interpolation_midpoint_top_edge() {
        // a=0.2, b=0.8 at threshold 0.5: the a-b crossing lands mid-edge.
        let grid = ElevationGrid::from_samples(vec![vec![0.2, 0.8], vec![0.2, 0.8]]);
        let layer = extract(&grid, 0.5, &unit_params());
        // Code 6 (NE + SE above): segment runs top crossing to bottom crossing.
        assert_eq!(layer.segment_count(), 1);
        let [a, b] = layer.segments[0];
        assert_eq!(a, Vec3::new(0.5, 0.0, 0.5), "Top crossing must be mid-edge");
        assert_eq!(b, Vec3::new(0.5, 1.0, 0.5), "Bottom crossing must be mid-edge");
    }

    #[test]
    fn test_interpolation_midpoint_left_edge() {
        // a=0.2, d=0.8: the a-d crossing lands halfway down the left edge.
        let grid = ElevationGrid::from_samples(vec![vec![0.2, 0.2], vec![0.8, 0.8]]);
        let layer = extract(&grid, 0.5, &unit_params());
        // Code 3 (SE + SW above): segment runs right crossing to left crossing.
        assert_eq!(layer.segment_count(), 1);
        let [a, b] = layer.segments[0];
        assert_eq!(a, Vec3::new(1.0, 0.5, 0.5), "Right crossing must be mid-edge");
        assert_eq!(b, Vec3::new(0.0, 0.5, 0.5), "Left crossing must be mid-edge");
    }

    #[test]
    fn test_asymmetric_interpolation() {
        // a=0.4, b=0.8 at threshold 0.5 crosses a quarter of the way along.
        let grid = ElevationGrid::from_samples(vec![vec![0.4, 0.8], vec![0.4, 0.8]]);
        let layer = extract(&grid, 0.5, &unit_params());
        let [a, _] = layer.segments[0];
        assert!(
            (a.x - 0.25).abs() < 1e-6,
            "Expected crossing at x=0.25, got {}",
            a.x
        );
    }

    #[test]
    fn test_saddle_emits_closed_loop() {
        for code in [5u8, 10] {
            let layer = extract(&cell_grid(code), THRESHOLD, &unit_params());
            assert_eq!(layer.segment_count(), 2, "Saddle {code} is one 4-point loop");
            assert_eq!(layer.triangle_count(), 4, "Saddle {code} fans four triangles");
        }
    }

    #[test]
    fn test_code_15_fills_only_near_band_edge() {
        // NW far above the threshold: the cell was filled by lower passes.
        let far = ElevationGrid::from_samples(vec![vec![0.9, 0.9], vec![0.9, 0.9]]);
        let layer = extract(&far, 0.5, &unit_params());
        assert_eq!(layer.triangle_count(), 0, "Interior covered cell re-fills nothing");
        assert_eq!(layer.segment_count(), 0);

        // NW just above the threshold: close the gap at the band edge.
        let near = ElevationGrid::from_samples(vec![vec![0.51, 0.9], vec![0.9, 0.9]]);
        let layer = extract(&near, 0.5, &unit_params());
        assert_eq!(layer.triangle_count(), 2, "Boundary covered cell emits a full fill");
        assert_eq!(layer.segment_count(), 0);
    }

    #[test]
    fn test_contour_sits_above_fill() {
        let params = ExtractParams {
            elevation_scale: 200.0,
            vertical_bias: 10.0,
            ..unit_params()
        };
        let layer = extract(&cell_grid(1), 0.5, &params);
        let contour_z = 0.5 * 200.0 + 10.0;
        assert_eq!(layer.segments[0][0].z, contour_z);
        assert_eq!(layer.triangles[0][0].z, contour_z - params.fill_drop);
    }

    #[test]
    fn test_flat_cell_at_threshold_is_empty() {
        // All corners exactly at the threshold: strict comparison gives
        // code 0, and the degenerate edges never get consumed.
        let grid = ElevationGrid::from_samples(vec![vec![0.5, 0.5], vec![0.5, 0.5]]);
        let layer = extract(&grid, 0.5, &unit_params());
        assert!(layer.is_empty());
    }

    #[test]
    fn test_golden_three_by_three_fixture() {
        // Cells classify as codes 7, 11, 14, 13 clockwise from the top-left:
        // one segment and three triangles each.
        let grid = ElevationGrid::from_samples(vec![
            vec![0.1, 0.9, 0.1],
            vec![0.9, 0.9, 0.9],
            vec![0.1, 0.9, 0.1],
        ]);
        let layer = extract(&grid, 0.5, &unit_params());
        assert_eq!(layer.segment_count(), 4, "Four boundary cells, one segment each");
        assert_eq!(layer.triangle_count(), 12, "Four boundary cells, three triangles each");
    }

    #[test]
    fn test_extraction_is_pure() {
        let grid = cell_grid(9);
        let params = unit_params();
        let a = extract(&grid, THRESHOLD, &params);
        let b = extract(&grid, THRESHOLD, &params);
        assert_eq!(a, b, "Extraction must be a pure function of grid and threshold");
    }
}
