//! Demo binary that generates one topographic frame and reports its geometry.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p relief-demo` for a random seed, or
//! `cargo run -p relief-demo -- --seed 42 --spacing 8` to pin one down.

use clap::Parser;
use relief_config::{CliArgs, Config, ConfigError};
use relief_render::{RenderParams, TerrainRenderer};
use relief_terrain::FbmParams;
use tracing::info;

fn render_params(config: &Config) -> RenderParams {
    RenderParams {
        spacing: config.grid.spacing,
        width: config.grid.width,
        height: config.grid.height,
        fbm: FbmParams {
            octaves: config.noise.octaves,
            persistence: config.noise.persistence,
            lacunarity: config.noise.lacunarity,
            frequency: config.noise.frequency,
            offset: config.noise.offset,
        },
        land_threshold: config.contour.land_threshold,
        isoline_inc: config.contour.isoline_inc,
        elevation_scale: config.contour.elevation_scale,
        vertical_bias: config.contour.vertical_bias,
        fill_drop: config.contour.fill_drop,
        cover_epsilon: config.contour.cover_epsilon,
        parallel: config.contour.parallel,
    }
}

fn main() -> Result<(), ConfigError> {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| ".".into())
            .join("relief")
    });
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(&args);
    config.validate()?;

    relief_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    let palette = config.palette.resolve()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, ?palette, "generating terrain");

    let mut renderer = TerrainRenderer::new(render_params(&config), seed);
    let frame = renderer.render_frame();

    info!(
        max_elevation = renderer.grid().max_elevation(),
        layers = frame.layers.len(),
        segments = frame.total_segments(),
        triangles = frame.total_triangles(),
        water_points = frame.water_points.len(),
        "frame complete"
    );

    Ok(())
}
