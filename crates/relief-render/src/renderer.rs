//! The terrain renderer: owns the seed and the cached elevation grid, and
//! produces one [`FrameGeometry`] per frame.

use std::time::Instant;

use glam::{Vec2, Vec3};
use tracing::{debug, info};

use relief_contour::{ContourLayer, ExtractParams, extract};
use relief_terrain::{ElevationGrid, FbmParams, HeightfieldSampler, NoiseField};

use crate::frame::{FrameGeometry, thresholds};

/// Full parameter set for the frame pass.
#[derive(Clone, Debug)]
pub struct RenderParams {
    /// Distance between adjacent grid samples, in world units.
    pub spacing: u32,
    /// World width covered by the grid.
    pub width: u32,
    /// World height covered by the grid.
    pub height: u32,
    /// Fractal noise parameters.
    pub fbm: FbmParams,
    /// Elevation at and below which a sample counts as water; also the
    /// lowest isoline.
    pub land_threshold: f64,
    /// Spacing between successive isoline thresholds.
    pub isoline_inc: f64,
    /// Multiplier mapping elevation thresholds to z heights.
    pub elevation_scale: f32,
    /// Constant z offset added after scaling.
    pub vertical_bias: f32,
    /// How far below its contour line a fill renders.
    pub fill_drop: f32,
    /// Band-edge epsilon for re-filling fully covered cells. Should scale
    /// with `isoline_inc` if that changes.
    pub cover_epsilon: f64,
    /// Extract threshold layers on a worker pool instead of serially.
    /// Output is identical either way.
    pub parallel: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            spacing: 4,
            width: 2000,
            height: 2000,
            fbm: FbmParams::default(),
            land_threshold: 0.45,
            isoline_inc: 0.012,
            elevation_scale: 200.0,
            vertical_bias: 0.0,
            fill_drop: 1.5,
            cover_epsilon: 0.025,
            parallel: false,
        }
    }
}

impl RenderParams {
    /// Samples per row: `width / spacing + 1`.
    pub fn cols(&self) -> usize {
        (self.width / self.spacing) as usize + 1
    }

    /// Number of rows: `height / spacing + 1`.
    pub fn rows(&self) -> usize {
        (self.height / self.spacing) as usize + 1
    }

    /// World-space position of sample `(0, 0)`, centering the grid.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(-(self.width as f32) / 2.0, -(self.height as f32) / 2.0)
    }

    fn extract_params(&self) -> ExtractParams {
        ExtractParams {
            spacing: self.spacing as f32,
            origin: self.origin(),
            elevation_scale: self.elevation_scale,
            vertical_bias: self.vertical_bias,
            fill_drop: self.fill_drop,
            cover_epsilon: self.cover_epsilon,
        }
    }

    /// Sea-level z: the land threshold mapped through scale and bias.
    fn sea_level_z(&self) -> f32 {
        self.land_threshold as f32 * self.elevation_scale + self.vertical_bias
    }
}

/// Drives heightfield synthesis and contour extraction once per frame.
///
/// Holds no state across frames except the seed and the elevation grid; the
/// grid is rebuilt only on construction and after [`regenerate`], so a host
/// that pans or rotates its camera between frames sees stable terrain.
///
/// [`regenerate`]: TerrainRenderer::regenerate
pub struct TerrainRenderer {
    params: RenderParams,
    seed: u64,
    sampler: HeightfieldSampler,
    grid: ElevationGrid,
    dirty: bool,
    grid_rebuilds: u64,
}

impl TerrainRenderer {
    /// Create a renderer and sample its initial elevation grid.
    pub fn new(params: RenderParams, seed: u64) -> Self {
        let sampler = HeightfieldSampler::new(NoiseField::new(seed), params.fbm.clone());
        let start = Instant::now();
        let grid = ElevationGrid::build(&sampler, params.cols(), params.rows());
        info!(
            seed,
            cols = params.cols(),
            rows = params.rows(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built initial elevation grid"
        );

        Self {
            params,
            seed,
            sampler,
            grid,
            dirty: false,
            grid_rebuilds: 1,
        }
    }

    /// Reseed the noise field; the next frame rebuilds the elevation grid.
    pub fn regenerate(&mut self, seed: u64) {
        self.seed = seed;
        self.sampler = HeightfieldSampler::new(NoiseField::new(seed), self.params.fbm.clone());
        self.dirty = true;
        info!(seed, "regenerated terrain seed");
    }

    /// The current seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The current elevation grid.
    pub fn grid(&self) -> &ElevationGrid {
        &self.grid
    }

    /// How many times the elevation grid has been sampled from scratch.
    pub fn grid_rebuilds(&self) -> u64 {
        self.grid_rebuilds
    }

    /// Produce the geometry for one frame.
    ///
    /// Rebuilds the elevation grid only when a regenerate is pending, then
    /// emits the water mask and one contour layer per isoline threshold,
    /// lowest first. Calling this twice without an intervening
    /// [`regenerate`](Self::regenerate) yields identical geometry.
    pub fn render_frame(&mut self) -> FrameGeometry {
        if self.dirty {
            let start = Instant::now();
            self.grid =
                ElevationGrid::build(&self.sampler, self.params.cols(), self.params.rows());
            self.dirty = false;
            self.grid_rebuilds += 1;
            debug!(
                seed = self.seed,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "rebuilt elevation grid"
            );
        }

        let water_points = self.water_mask();

        let levels: Vec<f64> = thresholds(
            self.params.land_threshold,
            self.grid.max_elevation(),
            self.params.isoline_inc,
        )
        .collect();

        let extract_params = self.params.extract_params();
        let layers = if self.params.parallel && levels.len() > 1 {
            extract_layers_parallel(&self.grid, &extract_params, &levels)
        } else {
            levels
                .iter()
                .map(|&t| extract(&self.grid, t, &extract_params))
                .collect()
        };

        let geometry = FrameGeometry {
            water_points,
            layers,
        };
        debug!(
            layers = geometry.layers.len(),
            segments = geometry.total_segments(),
            triangles = geometry.total_triangles(),
            water_points = geometry.water_points.len(),
            "rendered frame"
        );
        geometry
    }

    /// Every other grid sample below the land threshold, at sea-level z.
    fn water_mask(&self) -> Vec<Vec3> {
        let origin = self.params.origin();
        let spacing = self.params.spacing as f32;
        let sea_z = self.params.sea_level_z();

        let mut points = Vec::new();
        for row in (0..self.grid.rows()).step_by(2) {
            for col in (0..self.grid.cols()).step_by(2) {
                if self.grid.get(row, col) < self.params.land_threshold {
                    points.push(Vec3::new(
                        origin.x + col as f32 * spacing,
                        origin.y + row as f32 * spacing,
                        sea_z,
                    ));
                }
            }
        }
        points
    }
}

/// Fan threshold passes out over a worker pool.
///
/// Each pass reads only the finished grid and writes only its own layer, so
/// the passes are independent; results are reassembled by index to keep the
/// ascending layer order byte-identical to the serial path.
fn extract_layers_parallel(
    grid: &ElevationGrid,
    params: &ExtractParams,
    levels: &[f64],
) -> Vec<ContourLayer> {
    let workers = num_cpus::get().max(2).min(levels.len());

    let (task_tx, task_rx) = crossbeam_channel::unbounded::<(usize, f64)>();
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, ContourLayer)>();

    for (index, &threshold) in levels.iter().enumerate() {
        let _ = task_tx.send((index, threshold));
    }
    drop(task_tx);

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                while let Ok((index, threshold)) = task_rx.recv() {
                    let layer = extract(grid, threshold, params);
                    let _ = result_tx.send((index, layer));
                }
            });
        }
    });
    drop(result_tx);

    let mut slots: Vec<Option<ContourLayer>> = levels.iter().map(|_| None).collect();
    while let Ok((index, layer)) = result_rx.try_recv() {
        slots[index] = Some(layer);
    }
    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> RenderParams {
        RenderParams {
            spacing: 4,
            width: 128,
            height: 128,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_frame_deterministic() {
        let mut renderer = TerrainRenderer::new(small_params(), 42);
        let a = renderer.render_frame();
        let b = renderer.render_frame();
        assert_eq!(
            a, b,
            "Two frames without a regenerate must be byte-identical"
        );
    }

    #[test]
    fn test_grid_rebuilt_only_when_dirty() {
        let mut renderer = TerrainRenderer::new(small_params(), 42);
        renderer.render_frame();
        renderer.render_frame();
        assert_eq!(renderer.grid_rebuilds(), 1, "Clean frames reuse the grid");

        renderer.regenerate(43);
        renderer.render_frame();
        assert_eq!(renderer.grid_rebuilds(), 2, "Regenerate forces one rebuild");
    }

    #[test]
    fn test_regenerate_changes_geometry() {
        let mut renderer = TerrainRenderer::new(small_params(), 1);
        let before = renderer.render_frame();
        renderer.regenerate(2);
        let after = renderer.render_frame();
        assert_ne!(before, after, "A new seed should change the terrain");
        assert_eq!(renderer.seed(), 2);
    }

    #[test]
    fn test_layer_count_matches_formula() {
        let mut renderer = TerrainRenderer::new(small_params(), 42);
        let frame = renderer.render_frame();
        let params = small_params();
        let max = renderer.grid().max_elevation();
        let expected = if max < params.land_threshold {
            0
        } else {
            ((max - params.land_threshold) / params.isoline_inc).floor() as usize + 1
        };
        assert_eq!(
            frame.layers.len(),
            expected,
            "Layer count must follow floor((max - land) / inc) + 1"
        );
    }

    #[test]
    fn test_layers_ascend_from_land_threshold() {
        let mut renderer = TerrainRenderer::new(small_params(), 42);
        let frame = renderer.render_frame();
        if let Some(first) = frame.layers.first() {
            assert_eq!(first.threshold, small_params().land_threshold);
        }
        for pair in frame.layers.windows(2) {
            assert!(
                pair[0].threshold < pair[1].threshold,
                "Layers must be ordered lowest threshold first"
            );
        }
    }

    #[test]
    fn test_water_mask_exclusivity() {
        let params = small_params();
        let origin = params.origin();
        let spacing = params.spacing as f32;
        let land = params.land_threshold;

        let mut renderer = TerrainRenderer::new(params, 42);
        let frame = renderer.render_frame();
        for point in &frame.water_points {
            let col = ((point.x - origin.x) / spacing).round() as usize;
            let row = ((point.y - origin.y) / spacing).round() as usize;
            let elevation = renderer.grid().get(row, col);
            assert!(
                elevation < land,
                "Water point at ({col}, {row}) maps to land elevation {elevation}"
            );
        }
    }

    #[test]
    fn test_water_points_sit_at_sea_level() {
        let params = small_params();
        let sea_z = params.land_threshold as f32 * params.elevation_scale + params.vertical_bias;
        let mut renderer = TerrainRenderer::new(params, 42);
        let frame = renderer.render_frame();
        for point in &frame.water_points {
            assert_eq!(point.z, sea_z, "Water renders as a flat sheet at sea level");
        }
    }

    #[test]
    fn test_empty_threshold_range_renders_water_only() {
        let params = RenderParams {
            land_threshold: 2.0, // above any possible elevation
            ..small_params()
        };
        let mut renderer = TerrainRenderer::new(params, 42);
        let frame = renderer.render_frame();
        assert!(frame.layers.is_empty(), "No land means no contour layers");
        assert!(
            !frame.water_points.is_empty(),
            "Everything below the threshold is water"
        );
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut serial = TerrainRenderer::new(small_params(), 42);
        let mut parallel = TerrainRenderer::new(
            RenderParams {
                parallel: true,
                ..small_params()
            },
            42,
        );
        assert_eq!(
            serial.render_frame(),
            parallel.render_frame(),
            "Parallel extraction must be byte-identical to the serial path"
        );
    }

    #[test]
    fn test_grid_dimensions_from_params() {
        let params = small_params();
        assert_eq!(params.cols(), 33);
        assert_eq!(params.rows(), 33);
        let renderer = TerrainRenderer::new(params, 1);
        assert_eq!(renderer.grid().cols(), 33);
        assert_eq!(renderer.grid().rows(), 33);
    }
}
