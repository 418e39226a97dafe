//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Topographic-map renderer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "relief", about = "Procedural topographic contour maps")]
pub struct CliArgs {
    /// Terrain seed; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Distance between grid samples in world units.
    #[arg(long)]
    pub spacing: Option<u32>,

    /// World width covered by the grid.
    #[arg(long)]
    pub width: Option<u32>,

    /// World height covered by the grid.
    #[arg(long)]
    pub height: Option<u32>,

    /// Elevation below which a sample is water.
    #[arg(long)]
    pub land_threshold: Option<f64>,

    /// Spacing between successive isoline thresholds.
    #[arg(long)]
    pub isoline_inc: Option<f64>,

    /// Number of noise octaves.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Extract threshold layers on a worker pool.
    #[arg(long)]
    pub parallel: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(spacing) = args.spacing {
            self.grid.spacing = spacing;
        }
        if let Some(width) = args.width {
            self.grid.width = width;
        }
        if let Some(height) = args.height {
            self.grid.height = height;
        }
        if let Some(threshold) = args.land_threshold {
            self.contour.land_threshold = threshold;
        }
        if let Some(inc) = args.isoline_inc {
            self.contour.isoline_inc = inc;
        }
        if let Some(octaves) = args.octaves {
            self.noise.octaves = octaves;
        }
        if let Some(parallel) = args.parallel {
            self.contour.parallel = parallel;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
