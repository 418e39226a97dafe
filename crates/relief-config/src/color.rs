//! Hex color parsing and the resolved render palette.

use crate::error::ConfigError;

/// An RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Parse a `rrggbb` or `rrggbbaa` hex string, with or without a leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |offset: usize| {
            u8::from_str_radix(&hex[offset..offset + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };

        match hex.len() {
            6 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: 1.0,
            }),
            8 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }
}

/// The three resolved colors of a rendered map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Background and land-fill color.
    pub background: Color,
    /// Contour outline color.
    pub outline: Color,
    /// Water point color.
    pub water: Color,
}

impl crate::config::PaletteConfig {
    /// Resolve the configured hex strings into a [`Palette`].
    pub fn resolve(&self) -> Result<Palette, ConfigError> {
        let parse = |name: &'static str, value: &str| {
            Color::from_hex(value).ok_or_else(|| ConfigError::InvalidColor {
                name,
                value: value.to_string(),
            })
        };
        Ok(Palette {
            background: parse("background", &self.background)?,
            outline: parse("outline", &self.outline)?,
            water: parse("water", &self.water)?,
        })
    }
}
