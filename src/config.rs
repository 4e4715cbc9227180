//! Rasterizer configuration.
//!
//! The rasterizer itself takes only a font scale and a foreground color; text
//! composition adds the destination size, pixel font size and background.
//! With the `config` feature the settings load from YAML.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Settings for rasterizing and composing text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct RasterConfig {
    /// Nominal font size in pixels; sets the baseline at 80% of it.
    pub font_size_px: f32,

    /// Pixels per design unit. When unset, derived from `font_size_px` and
    /// the font's units per em.
    pub font_scale: Option<f32>,

    /// Glyph color.
    pub foreground: Rgba,

    /// Color behind the glyphs.
    pub background: Rgba,

    /// Destination width in pixels.
    pub width: u32,

    /// Destination height in pixels.
    pub height: u32,
}

fn default_font_size_px() -> f32 {
    32.0
}
fn default_foreground() -> Rgba {
    Rgba::WHITE
}
fn default_width() -> u32 {
    512
}
fn default_height() -> u32 {
    48
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            font_size_px: default_font_size_px(),
            font_scale: None,
            foreground: default_foreground(),
            background: Rgba::TRANSPARENT,
            width: default_width(),
            height: default_height(),
        }
    }
}

impl RasterConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale to use for a font with `units_per_em` design units per em.
    #[must_use]
    pub fn scale_for(&self, units_per_em: u16) -> f32 {
        self.font_scale
            .unwrap_or_else(|| self.font_size_px / f32::from(units_per_em.max(1)))
    }

    /// Checks that every value can drive a rasterization.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] naming the first bad key, or
    /// [`Error::InvalidScale`] for an unusable explicit font scale.
    pub fn validate(&self) -> Result<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(Error::ConfigInvalid {
                key: "font_size_px".to_string(),
                message: format!("must be a positive number, got {}", self.font_size_px),
            });
        }
        if let Some(scale) = self.font_scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(Error::InvalidScale(scale));
            }
        }
        if self.width == 0 || self.height == 0 {
            let key = if self.width == 0 { "width" } else { "height" };
            return Err(Error::ConfigInvalid {
                key: key.to_string(),
                message: "must be at least 1 pixel".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(feature = "config")]
impl RasterConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<std::path::Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::debug!(
                    "using default raster config ({}): {e}",
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RasterConfig::new();
        assert_eq!(config.font_size_px, 32.0);
        assert_eq!(config.foreground, Rgba::WHITE);
        assert_eq!(config.background, Rgba::TRANSPARENT);
        assert!(config.font_scale.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scale_for_prefers_explicit_scale() {
        let mut config = RasterConfig::new();
        assert!((config.scale_for(1000) - 0.032).abs() < 1e-6);

        config.font_scale = Some(0.5);
        assert_eq!(config.scale_for(1000), 0.5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RasterConfig::new();
        config.font_scale = Some(0.0);
        assert!(matches!(config.validate(), Err(Error::InvalidScale(_))));

        let mut config = RasterConfig::new();
        config.width = 0;
        match config.validate() {
            Err(Error::ConfigInvalid { key, .. }) => assert_eq!(key, "width"),
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }

        let mut config = RasterConfig::new();
        config.font_size_px = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_config_parse_partial() {
        let yaml = r"
font_size_px: 24
foreground: { r: 10, g: 20, b: 30, a: 255 }
";
        let config = RasterConfig::parse(yaml).unwrap();
        assert_eq!(config.font_size_px, 24.0);
        assert_eq!(config.foreground, Rgba::rgb(10, 20, 30));
        assert_eq!(config.width, 512);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r"
font_size_px: 24
width: not_a_number
";
        let err = RasterConfig::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("line 3"), "got: {err}");
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raster.yaml");
        std::fs::write(&path, "font_scale: 0.25\nheight: 100\n").unwrap();

        let config = RasterConfig::load(&path).unwrap();
        assert_eq!(config.font_scale, Some(0.25));
        assert_eq!(config.height, 100);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_config_load_or_default() {
        let config = RasterConfig::load_or_default("/nonexistent/path/raster.yaml");
        assert_eq!(config, RasterConfig::default());
    }
}
