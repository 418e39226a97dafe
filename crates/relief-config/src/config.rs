//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level renderer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sample grid settings.
    pub grid: GridConfig,
    /// Fractal noise settings.
    pub noise: NoiseConfig,
    /// Isoline and fill settings.
    pub contour: ContourConfig,
    /// Render colors as hex strings.
    pub palette: PaletteConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Sample grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Distance between adjacent samples in world units.
    pub spacing: u32,
    /// World width covered by the grid.
    pub width: u32,
    /// World height covered by the grid.
    pub height: u32,
}

/// Fractal noise configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    /// Frequency applied to grid coordinates for the first octave.
    pub frequency: f64,
    /// Constant offset shifting the sample window away from the noise origin.
    pub offset: f64,
    /// Number of octaves in the fractal sum.
    pub octaves: u32,
    /// Weight multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
}

/// Isoline and fill configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContourConfig {
    /// Elevation below which a sample is water; also the lowest isoline.
    pub land_threshold: f64,
    /// Spacing between successive isoline thresholds.
    pub isoline_inc: f64,
    /// Multiplier mapping elevation to z height.
    pub elevation_scale: f32,
    /// Constant z offset added after scaling.
    pub vertical_bias: f32,
    /// How far below its contour line a fill renders.
    pub fill_drop: f32,
    /// Band-edge epsilon for re-filling fully covered cells.
    pub cover_epsilon: f64,
    /// Extract threshold layers on a worker pool.
    pub parallel: bool,
}

/// Render colors, as `rrggbb` hex strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    /// Background and land-fill color.
    pub background: String,
    /// Contour outline color.
    pub outline: String,
    /// Water point color.
    pub water: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: 4,
            width: 2000,
            height: 2000,
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            frequency: 0.0075,
            offset: 150.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
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

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: "fef0d9".to_string(),
            outline: "c0526e".to_string(),
            water: "00b4d8".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Validate the configuration at startup.
    ///
    /// Rejects anything the core cannot run on: non-positive spacing or
    /// dimensions, a grid with fewer than one cell per axis, zero octaves,
    /// non-finite or non-positive thresholds and increments, and palette
    /// entries that fail to parse as hex colors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.spacing == 0 {
            return Err(ConfigError::Invalid("grid.spacing must be positive".into()));
        }
        if self.grid.width < self.grid.spacing || self.grid.height < self.grid.spacing {
            return Err(ConfigError::Invalid(
                "grid.width and grid.height must be at least one spacing".into(),
            ));
        }
        if self.noise.octaves == 0 {
            return Err(ConfigError::Invalid("noise.octaves must be at least 1".into()));
        }
        if !self.noise.frequency.is_finite() || self.noise.frequency <= 0.0 {
            return Err(ConfigError::Invalid(
                "noise.frequency must be finite and positive".into(),
            ));
        }
        if !self.contour.land_threshold.is_finite() {
            return Err(ConfigError::Invalid(
                "contour.land_threshold must be finite".into(),
            ));
        }
        if !self.contour.isoline_inc.is_finite() || self.contour.isoline_inc <= 0.0 {
            return Err(ConfigError::Invalid(
                "contour.isoline_inc must be finite and positive".into(),
            ));
        }
        if self.contour.cover_epsilon < 0.0 {
            return Err(ConfigError::Invalid(
                "contour.cover_epsilon must be non-negative".into(),
            ));
        }
        self.palette.resolve()?;
        Ok(())
    }
}
