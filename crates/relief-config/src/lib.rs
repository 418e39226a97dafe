//! Configuration for the topographic-map renderer: RON persistence, CLI
//! overrides, startup validation, and the color palette.

mod cli;
mod color;
mod config;
mod error;

pub use cli::CliArgs;
pub use color::{Color, Palette};
pub use config::{Config, ContourConfig, DebugConfig, GridConfig, NoiseConfig, PaletteConfig};
pub use error::ConfigError;
